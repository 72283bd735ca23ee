//! Tests for decoder configuration and entry points.

#![allow(
    clippy::unwrap_used,
    reason = "test code uses unwrap for concise assertions"
)]

use super::*;
use crate::error::ErrorKind;
use crate::kv::MapKv;
use crate::{Decode, ScanTarget};
use pretty_assertions::assert_eq;

#[derive(Debug, Default, PartialEq, Decode)]
struct Server {
    #[decode(kv = "host")]
    host: String,
    #[decode(kv = "port")]
    port: u16,
}

#[test]
fn defaults() {
    let decoder = Decoder::new(MapKv::new());
    let config = decoder.config();
    assert_eq!(config.separator, "/");
    assert_eq!(config.slice_separator, ",");
    assert_eq!(config.tag, "kv");
    assert_eq!(config.prefix, "");
    assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    assert_eq!(config, &DecoderConfig::default());
}

#[test]
fn options_apply_in_order() {
    let decoder = Decoder::with_options(
        MapKv::new(),
        [
            DecoderOption::separator("."),
            DecoderOption::separator(":"),
            DecoderOption::tag("consul"),
            DecoderOption::prefix("svc:"),
            DecoderOption::MaxDepth(4),
        ],
    )
    .unwrap();
    let config = decoder.config();
    assert_eq!(config.separator, ":");
    assert_eq!(config.tag, "consul");
    assert_eq!(config.prefix, "svc:");
    assert_eq!(config.max_depth, 4);
}

#[test]
fn invalid_options_are_all_reported() {
    let errs = Decoder::with_options(
        MapKv::new(),
        [
            DecoderOption::separator(""),
            DecoderOption::prefix("ok/"),
            DecoderOption::slice_separator(""),
            DecoderOption::tag(""),
            DecoderOption::MaxDepth(0),
        ],
    )
    .unwrap_err();
    assert_eq!(
        errs.errors(),
        [
            ConfigError::EmptySeparator,
            ConfigError::EmptySliceSeparator,
            ConfigError::EmptyTag,
            ConfigError::ZeroMaxDepth,
        ]
    );
    assert_eq!(
        errs.to_string(),
        "empty key separator\nempty slice separator\nempty tag name\nmax depth must be greater than zero"
    );
}

#[test]
fn empty_prefix_is_valid() {
    assert!(Decoder::with_options(MapKv::new(), [DecoderOption::prefix("")]).is_ok());
}

#[test]
fn from_config_validates() {
    let config = DecoderConfig {
        separator: String::new(),
        max_depth: 0,
        ..DecoderConfig::default()
    };
    let errs = Decoder::from_config(MapKv::new(), config).unwrap_err();
    assert!(errs.contains(ConfigError::EmptySeparator));
    assert!(errs.contains(ConfigError::ZeroMaxDepth));
    assert!(!errs.contains(ConfigError::EmptyTag));
}

#[test]
fn prefix_applies_to_root_keys() {
    let kv = MapKv::new()
        .with("cfg/host", "example.org")
        .with("cfg/port", "443")
        .with("host", "wrong");
    let decoder = Decoder::with_options(kv, [DecoderOption::prefix("cfg/")]).unwrap();
    let mut server = Server::default();
    decoder.decode(&mut server).unwrap();
    assert_eq!(
        server,
        Server {
            host: "example.org".to_owned(),
            port: 443,
        }
    );
}

#[test]
fn root_must_be_a_struct() {
    let kv = MapKv::new().with("", "1");
    let mut number = 0_u32;
    let err = unmarshal(&kv, &mut number).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TargetShape);
    assert_eq!(number, 0);
}

#[test]
fn scan_root_is_rejected() {
    #[derive(Default, ScanTarget)]
    struct Raw(String);

    impl crate::Scan for Raw {
        fn scan(&mut self, raw: &str) -> Result<(), crate::BoxError> {
            raw.clone_into(&mut self.0);
            Ok(())
        }
    }

    let mut raw = Raw::default();
    let err = unmarshal(MapKv::new(), &mut raw).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::TargetShape {
            found: "scan target"
        }
    ));
}

#[test]
fn optional_root_is_vivified() {
    let kv = MapKv::new().with("port", "80");
    let mut server: Option<Server> = None;
    unmarshal(&kv, &mut server).unwrap();
    assert_eq!(server.map(|s| s.port), Some(80));
}

#[test]
fn unmarshal_context_honours_cancellation() {
    let kv = MapKv::new().with("host", "h");
    let ctx = Context::background();
    ctx.cancel();
    let mut server = Server::default();
    let err = unmarshal_context(&ctx, &kv, &mut server).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert_eq!(server.host, "");
}

#[cfg(feature = "serde")]
mod serde_config {
    use super::*;
    use serde::de::value::{Error as DeError, MapDeserializer};
    use serde::Deserialize;

    fn from_pairs(pairs: &[(&'static str, &'static str)]) -> Result<DecoderConfig, DeError> {
        DecoderConfig::deserialize(MapDeserializer::<_, DeError>::new(pairs.iter().copied()))
    }

    #[test]
    fn missing_entries_take_defaults() {
        let config = from_pairs(&[("prefix", "app/")]).unwrap();
        assert_eq!(config.prefix, "app/");
        assert_eq!(config.separator, DEFAULT_SEPARATOR);
        assert_eq!(config.tag, DEFAULT_TAG);
    }

    #[test]
    fn unknown_entries_are_rejected() {
        assert!(from_pairs(&[("sep", ".")]).is_err());
    }
}
