//! Error types for decoding.
//!
//! Errors nest the way the walk does: a leaf failure is a [`ValueError`] or
//! [`BackendError`], wrapped in a [`DecodeError`] carrying the full key, and
//! then in one [`DecodeError::Field`] layer per struct on the way back up.

use std::fmt;

use crate::leaf::LeafKind;

/// Boxed error returned by backends and scan hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Invalid decoder option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("empty key separator")]
    EmptySeparator,
    #[error("empty slice separator")]
    EmptySliceSeparator,
    #[error("empty tag name")]
    EmptyTag,
    #[error("max depth must be greater than zero")]
    ZeroMaxDepth,
}

/// Every invalid option found while building a decoder.
///
/// Options are all applied before reporting, so a caller sees each problem
/// at once rather than fixing them one by one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigErrors(Vec<ConfigError>);

impl ConfigErrors {
    pub(crate) fn new(errors: Vec<ConfigError>) -> Self {
        Self(errors)
    }

    /// The individual errors, in option order.
    pub fn errors(&self) -> &[ConfigError] {
        &self.0
    }

    pub fn contains(&self, err: ConfigError) -> bool {
        self.0.contains(&err)
    }
}

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigErrors {}

/// Failure reported by (or on behalf of) a key-value backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The decode context was cancelled before the call.
    #[error("context canceled")]
    Cancelled,
    /// The decode context's deadline passed before the call.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
    /// Any backend-specific failure (network, permission, encoding).
    #[error("{0}")]
    Other(#[source] BoxError),
}

impl BackendError {
    /// Wrap a backend-specific error.
    pub fn other(err: impl Into<BoxError>) -> Self {
        Self::Other(err.into())
    }

    /// Returns `true` for cancellation and deadline failures.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }
}

/// Failure converting a raw value into a typed target.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    /// The raw string is not a valid literal of the target type.
    #[error("parse {kind} from {raw:?}: {reason}")]
    Parse {
        kind: LeafKind,
        raw: String,
        reason: String,
    },
    /// The target's scan hook rejected the value.
    #[error("scan value: {0}")]
    Scan(#[source] BoxError),
    /// A sequence target was decoded without a slice separator.
    #[error("slice separator is not set")]
    MissingSliceSeparator,
    /// The target type has no conversion rule.
    #[error("unsupported type {0}")]
    UnsupportedType(&'static str),
}

/// Failure decoding a target structure.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The decode root is not a struct.
    #[error("decode target must be a struct, found {found}")]
    TargetShape { found: &'static str },
    /// The backend lookup for `key` failed.
    #[error("get key {key:?}: {source}")]
    Backend {
        key: String,
        #[source]
        source: BackendError,
    },
    /// The value stored at `key` could not be converted.
    #[error("unmarshal value of {key:?}: {source}")]
    Value {
        key: String,
        #[source]
        source: ValueError,
    },
    /// A field table lists a field its type does not hand out.
    #[error("field table of {ty} lists {field:?}, which has no target")]
    FieldTable {
        ty: &'static str,
        field: &'static str,
    },
    /// Struct nesting went deeper than the configured maximum.
    #[error("struct nesting at {prefix:?} exceeds max depth {max_depth}")]
    DepthLimit { prefix: String, max_depth: usize },
    /// Context layer naming the field whose decoding failed.
    #[error("decode field {field}: {source}")]
    Field {
        field: &'static str,
        #[source]
        source: Box<DecodeError>,
    },
}

/// Coarse classification of a [`DecodeError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Configuration missing at use time (slice separator).
    Config,
    /// Root is not a struct, or a field table is inconsistent.
    TargetShape,
    /// Cancellation or deadline expiry.
    Cancelled,
    Backend,
    Parse,
    Scan,
    UnsupportedType,
    DepthLimit,
}

impl DecodeError {
    pub(crate) fn in_field(self, field: &'static str) -> Self {
        Self::Field {
            field,
            source: Box::new(self),
        }
    }

    /// The innermost error, with all field layers stripped.
    pub fn root_cause(&self) -> &DecodeError {
        let mut err = self;
        while let Self::Field { source, .. } = err {
            err = source.as_ref();
        }
        err
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Field { source, .. } => source.kind(),
            Self::TargetShape { .. } | Self::FieldTable { .. } => ErrorKind::TargetShape,
            Self::Backend { source, .. } if source.is_cancellation() => ErrorKind::Cancelled,
            Self::Backend { .. } => ErrorKind::Backend,
            Self::Value { source, .. } => match source {
                ValueError::Parse { .. } => ErrorKind::Parse,
                ValueError::Scan(_) => ErrorKind::Scan,
                ValueError::MissingSliceSeparator => ErrorKind::Config,
                ValueError::UnsupportedType(_) => ErrorKind::UnsupportedType,
            },
            Self::DepthLimit { .. } => ErrorKind::DepthLimit,
        }
    }

    /// The full key of the failing lookup, if the failure involved one.
    pub fn key(&self) -> Option<&str> {
        match self.root_cause() {
            Self::Backend { key, .. } | Self::Value { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Field names from the root struct down to the failing field.
    pub fn field_path(&self) -> Vec<&'static str> {
        let mut path = Vec::new();
        let mut err = self;
        while let Self::Field { field, source } = err {
            path.push(*field);
            err = source.as_ref();
        }
        path
    }
}
