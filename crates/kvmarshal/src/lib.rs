//! kvmarshal - decode nested structs from flat key-value stores.
//!
//! Fields opt in with a tag naming their key segment. Nested structs extend
//! the key with a separator, so `Config.logger.level` tagged `logger` and
//! `level` reads the key `logger/level`.
//!
//! ```
//! use kvmarshal::{unmarshal, Decode, MapKv};
//!
//! #[derive(Default, Decode)]
//! struct Logger {
//!     #[decode(kv = "level")]
//!     level: String,
//!     #[decode(kv = "output")]
//!     output: String,
//! }
//!
//! #[derive(Default, Decode)]
//! struct Config {
//!     #[decode(kv = "host")]
//!     host: String,
//!     #[decode(kv = "debug")]
//!     debug: bool,
//!     #[decode(kv = "logger")]
//!     logger: Logger,
//!     #[decode(kv = "params")]
//!     params: Vec<String>,
//! }
//!
//! let kv = MapKv::new()
//!     .with("host", "localhost")
//!     .with("debug", "true")
//!     .with("logger/level", "info")
//!     .with("params", "a,b,c");
//!
//! let mut cfg = Config::default();
//! unmarshal(&kv, &mut cfg)?;
//! assert_eq!(cfg.host, "localhost");
//! assert!(cfg.debug);
//! assert_eq!(cfg.logger.level, "info");
//! assert_eq!(cfg.logger.output, ""); // absent keys leave fields untouched
//! assert_eq!(cfg.params, ["a", "b", "c"]);
//! # Ok::<(), kvmarshal::DecodeError>(())
//! ```
//!
//! # Pieces
//!
//! - [`Kv`]: the backend capability (`get(ctx, key) -> Value`). [`MapKv`] is
//!   an in-memory implementation.
//! - [`Value`]: a lookup result, converted into a typed field by
//!   [`Value::unmarshal_to`].
//! - [`Leaf`]: the built-in conversion table (integers, floats, `bool`,
//!   `String`, `Duration`, RFC 3339 `OffsetDateTime`, `Vec<String>`).
//! - [`Scan`]: a hook letting a type parse its own raw string.
//! - [`Decode`] / [`AsTarget`]: the static field tables generated by
//!   `#[derive(Decode)]`, which the walker traverses.
//! - [`Decoder`]: configuration and entry point.
//!
//! Only derived (or hand-written) tables are consulted; nothing is
//! reflected at runtime.
//!
//! The derive rejects shapes it cannot describe:
//!
//! ```compile_fail
//! use kvmarshal::Decode;
//!
//! // Tuple structs have no field names to tag.
//! #[derive(Decode)]
//! struct Pair(#[decode(kv = "a")] String, String);
//! ```
//!
//! ```compile_fail
//! use kvmarshal::Decode;
//!
//! #[derive(Decode)]
//! struct Config {
//!     // Every tag needs a string annotation.
//!     #[decode(kv)]
//!     host: String,
//! }
//! ```

// Lets `#[derive(Decode)]` (which emits `::kvmarshal::...` paths) work in
// this crate's own tests.
extern crate self as kvmarshal;

mod context;
mod decoder;
mod duration;
mod error;
mod kv;
mod leaf;
mod scan;
mod tag;
mod target;
mod value;
mod walker;

pub use context::Context;
pub use decoder::{
    unmarshal, unmarshal_context, Decoder, DecoderConfig, DecoderOption, DEFAULT_MAX_DEPTH,
    DEFAULT_SEPARATOR, DEFAULT_SLICE_SEPARATOR, DEFAULT_TAG,
};
pub use duration::{parse_duration, DurationError};
pub use error::{
    BackendError, BoxError, ConfigError, ConfigErrors, DecodeError, ErrorKind, ValueError,
};
pub use kv::{Kv, MapKv};
pub use leaf::{Leaf, LeafKind};
pub use scan::Scan;
pub use tag::{TagModifiers, TagSpec};
pub use target::{AsTarget, Decode, FieldDescriptor, Target};
pub use value::{UnmarshalOptions, Value};

pub use kvmarshal_macros::{Decode, ScanTarget};

pub use tokio_util::sync::CancellationToken;
