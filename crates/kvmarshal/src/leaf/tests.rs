//! Tests for the leaf conversion table.

#![allow(
    clippy::unwrap_used,
    clippy::float_cmp,
    reason = "test code uses unwrap and exact float literals"
)]

use super::*;
use pretty_assertions::assert_eq;
use time::macros::datetime;

fn parse_kind(err: ValueError) -> LeafKind {
    match err {
        ValueError::Parse { kind, .. } => kind,
        other => panic!("expected parse error, got {other:?}"),
    }
}

// === Strings ===

#[test]
fn string_is_copied_verbatim() {
    let mut out = String::from("old");
    Leaf::String(&mut out).assign(" spaced, value ", None).unwrap();
    assert_eq!(out, " spaced, value ");
}

#[test]
fn empty_string_overwrites() {
    let mut out = String::from("old");
    Leaf::String(&mut out).assign("", None).unwrap();
    assert_eq!(out, "");
}

// === Integers ===

#[test]
fn signed_widths() {
    let mut a = 0i8;
    let mut b = 0i16;
    let mut c = 0i32;
    let mut d = 0i64;
    let mut e = 0isize;
    Leaf::I8(&mut a).assign("-128", None).unwrap();
    Leaf::I16(&mut b).assign("32767", None).unwrap();
    Leaf::I32(&mut c).assign("+42", None).unwrap();
    Leaf::I64(&mut d).assign("-9223372036854775808", None).unwrap();
    Leaf::Isize(&mut e).assign("42", None).unwrap();
    assert_eq!((a, b, c, d, e), (i8::MIN, i16::MAX, 42, i64::MIN, 42));
}

#[test]
fn unsigned_widths() {
    let mut a = 0u8;
    let mut b = 0u16;
    let mut c = 0u32;
    let mut d = 0u64;
    let mut e = 0usize;
    Leaf::U8(&mut a).assign("255", None).unwrap();
    Leaf::U16(&mut b).assign("8080", None).unwrap();
    Leaf::U32(&mut c).assign("42", None).unwrap();
    Leaf::U64(&mut d).assign("18446744073709551615", None).unwrap();
    Leaf::Usize(&mut e).assign("42", None).unwrap();
    assert_eq!((a, b, c, d, e), (255, 8080, 42, u64::MAX, 42));
}

#[test]
fn out_of_range_reports_width() {
    let mut small = 7i8;
    let err = Leaf::I8(&mut small).assign("128", None).unwrap_err();
    assert_eq!(parse_kind(err), LeafKind::Int(8));
    assert_eq!(small, 7);

    let mut port = 7u16;
    let err = Leaf::U16(&mut port).assign("65536", None).unwrap_err();
    assert_eq!(parse_kind(err), LeafKind::Uint(16));
    assert_eq!(port, 7);
}

#[test]
fn negative_unsigned_rejected() {
    let mut out = 3u32;
    let err = Leaf::U32(&mut out).assign("-1", None).unwrap_err();
    assert_eq!(parse_kind(err), LeafKind::Uint(32));
    assert_eq!(out, 3);
}

#[test]
fn non_numeric_int_rejected() {
    let mut out = 1i64;
    let err = Leaf::I64(&mut out).assign("invalid", None).unwrap_err();
    assert_eq!(parse_kind(err), LeafKind::Int(64));
    assert_eq!(out, 1);
}

#[test]
fn parse_error_message_names_kind_and_raw() {
    let mut out = 0u8;
    let err = Leaf::U8(&mut out).assign("x1", None).unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("parse uint8 from \"x1\""), "{msg}");
}

// === Booleans ===

#[test]
fn bool_literals() {
    for raw in ["1", "t", "T", "TRUE", "true", "True"] {
        let mut out = false;
        Leaf::Bool(&mut out).assign(raw, None).unwrap();
        assert!(out, "{raw} should be true");
    }
    for raw in ["0", "f", "F", "FALSE", "false", "False"] {
        let mut out = true;
        Leaf::Bool(&mut out).assign(raw, None).unwrap();
        assert!(!out, "{raw} should be false");
    }
}

#[test]
fn bool_rejects_other_spellings() {
    for raw in ["yes", "tRuE", "", " true"] {
        let mut out = true;
        let err = Leaf::Bool(&mut out).assign(raw, None).unwrap_err();
        assert_eq!(parse_kind(err), LeafKind::Bool);
        assert!(out);
    }
}

// === Floats ===

#[test]
fn floats() {
    let mut a = 0f32;
    let mut b = 0f64;
    Leaf::F32(&mut a).assign("42.42", None).unwrap();
    Leaf::F64(&mut b).assign("-1.5e3", None).unwrap();
    assert_eq!(a, 42.42f32);
    assert_eq!(b, -1500.0);
}

#[test]
fn invalid_float_reports_width() {
    let mut out = 1.0f32;
    let err = Leaf::F32(&mut out).assign("4.2.1", None).unwrap_err();
    assert_eq!(parse_kind(err), LeafKind::Float(32));
    assert_eq!(out, 1.0);
}

// === Temporal ===

#[test]
fn duration_leaf() {
    let mut out = Duration::ZERO;
    Leaf::Duration(&mut out).assign("1h30m", None).unwrap();
    assert_eq!(out, Duration::from_secs(90 * 60));
}

#[test]
fn invalid_duration_keeps_prior_value() {
    let mut out = Duration::from_secs(3);
    let err = Leaf::Duration(&mut out).assign("soon", None).unwrap_err();
    assert_eq!(parse_kind(err), LeafKind::Duration);
    assert_eq!(out, Duration::from_secs(3));
}

#[test]
fn time_leaf_rfc3339() {
    let mut out = OffsetDateTime::UNIX_EPOCH;
    Leaf::Time(&mut out)
        .assign("2021-01-01T00:00:00Z", None)
        .unwrap();
    assert_eq!(out, datetime!(2021-01-01 00:00:00 UTC));
}

#[test]
fn time_leaf_keeps_offset() {
    let mut out = OffsetDateTime::UNIX_EPOCH;
    Leaf::Time(&mut out)
        .assign("2024-05-06T07:08:09+02:00", None)
        .unwrap();
    assert_eq!(out, datetime!(2024-05-06 07:08:09 +2));
}

#[test]
fn invalid_time_rejected() {
    let mut out = OffsetDateTime::UNIX_EPOCH;
    let err = Leaf::Time(&mut out).assign("2021-01-01", None).unwrap_err();
    assert_eq!(parse_kind(err), LeafKind::Time);
    assert_eq!(out, OffsetDateTime::UNIX_EPOCH);
}

// === Sequences ===

#[test]
fn strings_split_on_separator() {
    let mut out = Vec::new();
    Leaf::Strings(&mut out)
        .assign("hello,world", Some(","))
        .unwrap();
    assert_eq!(out, vec!["hello".to_owned(), "world".to_owned()]);
}

#[test]
fn strings_multi_char_separator() {
    let mut out = Vec::new();
    Leaf::Strings(&mut out).assign("a::b::c", Some("::")).unwrap();
    assert_eq!(out, vec!["a", "b", "c"]);
}

#[test]
fn strings_keep_empty_segments() {
    let mut out = Vec::new();
    Leaf::Strings(&mut out).assign(",a,", Some(",")).unwrap();
    assert_eq!(out, vec!["", "a", ""]);
}

#[test]
fn strings_require_separator() {
    let mut out = vec!["kept".to_owned()];
    let err = Leaf::Strings(&mut out).assign("hello", None).unwrap_err();
    assert!(matches!(err, ValueError::MissingSliceSeparator));
    let err = Leaf::Strings(&mut out).assign("hello", Some("")).unwrap_err();
    assert!(matches!(err, ValueError::MissingSliceSeparator));
    assert_eq!(out, vec!["kept"]);
}

// === Kinds ===

#[test]
fn kind_display() {
    assert_eq!(LeafKind::Int(8).to_string(), "int8");
    assert_eq!(LeafKind::Uint(64).to_string(), "uint64");
    assert_eq!(LeafKind::Float(32).to_string(), "float32");
    assert_eq!(LeafKind::Duration.to_string(), "duration");
    assert_eq!(LeafKind::Time.to_string(), "time");
    assert_eq!(LeafKind::Bool.to_string(), "bool");
}

#[test]
fn platform_width_kinds() {
    let mut a = 0isize;
    let mut b = 0usize;
    assert_eq!(Leaf::Isize(&mut a).kind(), LeafKind::Int(isize::BITS));
    assert_eq!(Leaf::Usize(&mut b).kind(), LeafKind::Uint(usize::BITS));
}

mod proptest_ranges {
    use super::super::Leaf;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn i16_accepts_exactly_its_range(n in -100_000i64..100_000) {
            let mut out = 0i16;
            let result = Leaf::I16(&mut out).assign(&n.to_string(), None);
            let in_range = i16::try_from(n).is_ok();
            prop_assert_eq!(result.is_ok(), in_range);
            if in_range {
                prop_assert_eq!(i64::from(out), n);
            } else {
                prop_assert_eq!(out, 0);
            }
        }

        #[test]
        fn u8_accepts_exactly_its_range(n in -1_000i64..1_000) {
            let mut out = 0u8;
            let result = Leaf::U8(&mut out).assign(&n.to_string(), None);
            prop_assert_eq!(result.is_ok(), u8::try_from(n).is_ok());
        }

        #[test]
        fn strings_round_trip_join(parts in proptest::collection::vec("[a-z]{0,5}", 1..6)) {
            let raw = parts.join(";");
            let mut out = Vec::new();
            Leaf::Strings(&mut out).assign(&raw, Some(";")).map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(out, parts);
        }
    }
}
