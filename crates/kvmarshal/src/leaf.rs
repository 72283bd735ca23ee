//! Leaf conversion table.
//!
//! Every built-in leaf type has one variant in [`Leaf`], holding a mutable
//! borrow of the destination. The variant is fixed by the field's static type
//! (through its `AsTarget` impl), so conversion is a plain `match` with no
//! runtime type inspection.
//!
//! Conversions parse into a temporary and only assign on success, so a
//! rejected value never clobbers the field's previous contents.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::duration::parse_duration;
use crate::error::ValueError;

/// Mutable borrow of a built-in leaf destination.
#[derive(Debug)]
pub enum Leaf<'a> {
    String(&'a mut String),
    Bool(&'a mut bool),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Duration(&'a mut Duration),
    /// RFC 3339 timestamp.
    Time(&'a mut OffsetDateTime),
    /// Sequence split on the slice separator.
    Strings(&'a mut Vec<String>),
}

/// Static kind of a leaf, used in error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LeafKind {
    String,
    Bool,
    /// Signed integer of the given bit width.
    Int(u32),
    /// Unsigned integer of the given bit width.
    Uint(u32),
    /// Float of the given bit width.
    Float(u32),
    Duration,
    Time,
    Strings,
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Bool => f.write_str("bool"),
            Self::Int(bits) => write!(f, "int{bits}"),
            Self::Uint(bits) => write!(f, "uint{bits}"),
            Self::Float(bits) => write!(f, "float{bits}"),
            Self::Duration => f.write_str("duration"),
            Self::Time => f.write_str("time"),
            Self::Strings => f.write_str("string slice"),
        }
    }
}

impl Leaf<'_> {
    pub fn kind(&self) -> LeafKind {
        match self {
            Self::String(_) => LeafKind::String,
            Self::Bool(_) => LeafKind::Bool,
            Self::I8(_) => LeafKind::Int(8),
            Self::I16(_) => LeafKind::Int(16),
            Self::I32(_) => LeafKind::Int(32),
            Self::I64(_) => LeafKind::Int(64),
            Self::Isize(_) => LeafKind::Int(isize::BITS),
            Self::U8(_) => LeafKind::Uint(8),
            Self::U16(_) => LeafKind::Uint(16),
            Self::U32(_) => LeafKind::Uint(32),
            Self::U64(_) => LeafKind::Uint(64),
            Self::Usize(_) => LeafKind::Uint(usize::BITS),
            Self::F32(_) => LeafKind::Float(32),
            Self::F64(_) => LeafKind::Float(64),
            Self::Duration(_) => LeafKind::Duration,
            Self::Time(_) => LeafKind::Time,
            Self::Strings(_) => LeafKind::Strings,
        }
    }

    /// Parse `raw` and store it in the destination.
    ///
    /// `slice_separator` is only consulted for [`Leaf::Strings`], where an
    /// unset or empty separator is an error rather than "no split".
    pub fn assign(self, raw: &str, slice_separator: Option<&str>) -> Result<(), ValueError> {
        let kind = self.kind();
        match self {
            Self::String(out) => raw.clone_into(out),
            Self::Bool(out) => *out = parse_bool(raw).ok_or_else(|| ValueError::Parse {
                kind,
                raw: raw.to_owned(),
                reason: "invalid syntax".to_owned(),
            })?,
            Self::I8(out) => *out = parse_number(raw, kind)?,
            Self::I16(out) => *out = parse_number(raw, kind)?,
            Self::I32(out) => *out = parse_number(raw, kind)?,
            Self::I64(out) => *out = parse_number(raw, kind)?,
            Self::Isize(out) => *out = parse_number(raw, kind)?,
            Self::U8(out) => *out = parse_number(raw, kind)?,
            Self::U16(out) => *out = parse_number(raw, kind)?,
            Self::U32(out) => *out = parse_number(raw, kind)?,
            Self::U64(out) => *out = parse_number(raw, kind)?,
            Self::Usize(out) => *out = parse_number(raw, kind)?,
            Self::F32(out) => *out = parse_number(raw, kind)?,
            Self::F64(out) => *out = parse_number(raw, kind)?,
            Self::Duration(out) => {
                *out = parse_duration(raw).map_err(|err| ValueError::Parse {
                    kind,
                    raw: raw.to_owned(),
                    reason: err.to_string(),
                })?;
            }
            Self::Time(out) => {
                *out = OffsetDateTime::parse(raw, &Rfc3339).map_err(|err| ValueError::Parse {
                    kind,
                    raw: raw.to_owned(),
                    reason: err.to_string(),
                })?;
            }
            Self::Strings(out) => {
                let sep = slice_separator
                    .filter(|sep| !sep.is_empty())
                    .ok_or(ValueError::MissingSliceSeparator)?;
                *out = raw.split(sep).map(str::to_owned).collect();
            }
        }
        Ok(())
    }
}

/// Parse a number with the range of `T`, reporting failures as `kind`.
fn parse_number<T>(raw: &str, kind: LeafKind) -> Result<T, ValueError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.parse().map_err(|err: T::Err| ValueError::Parse {
        kind,
        raw: raw.to_owned(),
        reason: err.to_string(),
    })
}

/// Canonical boolean literals.
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
