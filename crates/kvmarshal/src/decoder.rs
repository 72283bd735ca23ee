//! Decoder façade: configuration, target validation, and entry points.

use tracing::debug;

use crate::context::Context;
use crate::error::{ConfigError, ConfigErrors, DecodeError};
use crate::kv::Kv;
use crate::target::AsTarget;
use crate::walker::Walker;

/// Default key separator.
pub const DEFAULT_SEPARATOR: &str = "/";
/// Default separator for `Vec<String>` values.
pub const DEFAULT_SLICE_SEPARATOR: &str = ",";
/// Default tag name.
pub const DEFAULT_TAG: &str = "kv";
/// Default limit on struct nesting.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Decoder settings.
///
/// With the `serde` feature this can be deserialized from an application's
/// own config file; missing entries take their defaults. Run
/// [`DecoderConfig::validate`] (or use [`Decoder::from_config`]) before use.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct DecoderConfig {
    /// Joins path segments.
    pub separator: String,
    /// Splits `Vec<String>` values.
    pub slice_separator: String,
    /// Which field tag is read.
    pub tag: String,
    /// Prepended to every root-level key.
    pub prefix: String,
    /// Deepest struct nesting accepted below the root.
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_owned(),
            slice_separator: DEFAULT_SLICE_SEPARATOR.to_owned(),
            tag: DEFAULT_TAG.to_owned(),
            prefix: String::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecoderConfig {
    /// Check every setting, reporting all problems together.
    pub fn validate(&self) -> Result<(), ConfigErrors> {
        let mut errors = Vec::new();
        if self.separator.is_empty() {
            errors.push(ConfigError::EmptySeparator);
        }
        if self.slice_separator.is_empty() {
            errors.push(ConfigError::EmptySliceSeparator);
        }
        if self.tag.is_empty() {
            errors.push(ConfigError::EmptyTag);
        }
        if self.max_depth == 0 {
            errors.push(ConfigError::ZeroMaxDepth);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigErrors::new(errors))
        }
    }
}

/// One decoder setting. Applied in order by [`Decoder::with_options`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecoderOption {
    /// Key separator. Default `/`.
    Separator(String),
    /// `Vec<String>` separator. Default `,`.
    SliceSeparator(String),
    /// Tag name. Default `kv`.
    Tag(String),
    /// Root key prefix. Default empty.
    Prefix(String),
    /// Maximum struct nesting. Default 32.
    MaxDepth(usize),
}

impl DecoderOption {
    pub fn separator(separator: impl Into<String>) -> Self {
        Self::Separator(separator.into())
    }

    pub fn slice_separator(separator: impl Into<String>) -> Self {
        Self::SliceSeparator(separator.into())
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::Prefix(prefix.into())
    }

    /// Apply to `config`, leaving it unchanged if the option is invalid.
    fn apply(self, config: &mut DecoderConfig) -> Result<(), ConfigError> {
        match self {
            Self::Separator(separator) => {
                if separator.is_empty() {
                    return Err(ConfigError::EmptySeparator);
                }
                config.separator = separator;
            }
            Self::SliceSeparator(separator) => {
                if separator.is_empty() {
                    return Err(ConfigError::EmptySliceSeparator);
                }
                config.slice_separator = separator;
            }
            Self::Tag(tag) => {
                if tag.is_empty() {
                    return Err(ConfigError::EmptyTag);
                }
                config.tag = tag;
            }
            Self::Prefix(prefix) => config.prefix = prefix,
            Self::MaxDepth(max_depth) => {
                if max_depth == 0 {
                    return Err(ConfigError::ZeroMaxDepth);
                }
                config.max_depth = max_depth;
            }
        }
        Ok(())
    }
}

/// Reads values from a key-value store and decodes them into structs.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use kvmarshal::{Decode, Decoder, MapKv};
///
/// #[derive(Default, Decode)]
/// struct Logger {
///     #[decode(kv = "level")]
///     level: String,
/// }
///
/// #[derive(Default, Decode)]
/// struct Config {
///     #[decode(kv = "port")]
///     port: u16,
///     #[decode(kv = "timeout")]
///     timeout: Duration,
///     #[decode(kv = "logger")]
///     logger: Option<Logger>,
/// }
///
/// let kv = MapKv::new()
///     .with("port", "8080")
///     .with("timeout", "5s")
///     .with("logger/level", "info");
///
/// let mut cfg = Config::default();
/// Decoder::new(kv).decode(&mut cfg)?;
/// assert_eq!(cfg.port, 8080);
/// assert_eq!(cfg.timeout, Duration::from_secs(5));
/// assert_eq!(cfg.logger.map(|l| l.level).as_deref(), Some("info"));
/// # Ok::<(), kvmarshal::DecodeError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Decoder<K> {
    kv: K,
    config: DecoderConfig,
}

impl<K: Kv> Decoder<K> {
    /// A decoder with default settings.
    pub fn new(kv: K) -> Self {
        Self {
            kv,
            config: DecoderConfig::default(),
        }
    }

    /// A decoder with `options` applied over the defaults.
    ///
    /// Every option is applied; all invalid ones are reported together.
    pub fn with_options(
        kv: K,
        options: impl IntoIterator<Item = DecoderOption>,
    ) -> Result<Self, ConfigErrors> {
        let mut config = DecoderConfig::default();
        let errors: Vec<ConfigError> = options
            .into_iter()
            .filter_map(|opt| opt.apply(&mut config).err())
            .collect();
        if !errors.is_empty() {
            return Err(ConfigErrors::new(errors));
        }
        Ok(Self { kv, config })
    }

    /// A decoder using a complete, validated config.
    pub fn from_config(kv: K, config: DecoderConfig) -> Result<Self, ConfigErrors> {
        config.validate()?;
        Ok(Self { kv, config })
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    /// Decode into `target` with a background context.
    pub fn decode<T: AsTarget + ?Sized>(&self, target: &mut T) -> Result<(), DecodeError> {
        self.decode_context(&Context::background(), target)
    }

    /// Decode into `target`, checking `ctx` before every backend lookup.
    ///
    /// `target` must be a struct (`#[derive(Decode)]`, with or without
    /// `#[decode(scan)]`); anything else fails with
    /// [`DecodeError::TargetShape`] before any lookup.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(prefix = %self.config.prefix, tag = %self.config.tag)
    )]
    pub fn decode_context<T: AsTarget + ?Sized>(
        &self,
        ctx: &Context,
        target: &mut T,
    ) -> Result<(), DecodeError> {
        let Some(root) = target.as_decode() else {
            return Err(DecodeError::TargetShape {
                found: target.as_target().describe(),
            });
        };

        let walker = Walker::new(&self.kv, ctx, &self.config);
        walker
            .walk(root, &self.config.prefix, 0)
            .inspect_err(|err| debug!(error = %err, "decode failed"))
    }
}

/// Decode `target` from `kv` with default settings.
pub fn unmarshal<K: Kv, T: AsTarget + ?Sized>(kv: K, target: &mut T) -> Result<(), DecodeError> {
    Decoder::new(kv).decode(target)
}

/// Decode `target` from `kv` with default settings, honouring `ctx`.
pub fn unmarshal_context<K: Kv, T: AsTarget + ?Sized>(
    ctx: &Context,
    kv: K,
    target: &mut T,
) -> Result<(), DecodeError> {
    Decoder::new(kv).decode_context(ctx, target)
}

#[cfg(test)]
mod tests;
