//! Raw lookup results.

use std::string::FromUtf8Error;

use crate::error::ValueError;
use crate::target::Target;

/// Options for [`Value::unmarshal_to`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnmarshalOptions<'a> {
    /// Separator for `Vec<String>` targets. Required by those targets.
    pub slice_separator: Option<&'a str>,
}

/// A value read from a key-value store: absent, or a raw string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Value {
    /// The key does not exist. Unmarshaling it is a no-op.
    #[default]
    Null,
    String(String),
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Build a value from raw bytes returned by a backend.
    pub fn from_utf8(bytes: Vec<u8>) -> Result<Self, FromUtf8Error> {
        String::from_utf8(bytes).map(Self::String)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Null => None,
            Self::String(s) => Some(s),
        }
    }

    /// Convert this value into `target`.
    ///
    /// A null value leaves the target untouched. A present value goes to the
    /// target's scan hook if it has one, and to the leaf table otherwise.
    /// The target is only written once conversion has succeeded.
    pub fn unmarshal_to(
        &self,
        target: Target<'_>,
        opts: &UnmarshalOptions<'_>,
    ) -> Result<(), ValueError> {
        let Self::String(raw) = self else {
            return Ok(());
        };
        match target {
            Target::Scan(scanner) => scanner.scan(raw).map_err(ValueError::Scan),
            Target::Leaf(leaf) => leaf.assign(raw, opts.slice_separator),
            Target::Struct(nested) => Err(ValueError::UnsupportedType(nested.type_name())),
            Target::Unsupported(type_name) => Err(ValueError::UnsupportedType(type_name)),
        }
    }
}

impl From<Option<String>> for Value {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Null, Self::String)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}
