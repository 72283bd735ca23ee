//! Procedural macros for kvmarshal.
//!
//! The decoder never inspects types at runtime. Instead, these derives emit a
//! static field table (`FieldDescriptor`s carrying each field's tags) and an
//! accessor that hands the walker a typed `Target` for one field at a time.
//!
//! # Decode Derive
//!
//! ```text
//! #[derive(Default, Decode)]
//! pub struct Config {
//!     #[decode(kv = "host", consul = "service/host")]
//!     pub host: String,
//!     #[decode(kv = "port")]
//!     pub port: u16,
//!     #[decode(kv = "logger")]
//!     pub logger: Option<LoggerConfig>,
//!     // no tags: never decoded, type needs no `AsTarget` impl
//!     pub cache: Vec<u8>,
//! }
//! ```
//!
//! # `ScanTarget` Derive
//!
//! Marks a type implementing `kvmarshal::Scan` as a leaf decoded by its own
//! hook:
//!
//! ```text
//! #[derive(Default, ScanTarget)]
//! pub struct Endpoint { host: String, port: u16 }
//!
//! impl Scan for Endpoint {
//!     fn scan(&mut self, raw: &str) -> Result<(), BoxError> { ... }
//! }
//! ```

mod decode;
mod scan_target;
mod utils;

use proc_macro::TokenStream;

/// Derive macro generating the field table and target accessors of a struct.
///
/// # Attributes
///
/// ## Struct-level
/// - `#[decode(scan)]` - Treat the struct as a leaf decoded by its `Scan`
///   impl when it appears as a field of another struct.
///
/// ## Field-level
/// - `#[decode(<tag> = "<key>[,<modifier>...]", ...)]` - One entry per tag
///   name. The decoder reads the entry matching its configured tag (`kv` by
///   default). Fields without any entry are left out of the table.
#[proc_macro_derive(Decode, attributes(decode))]
pub fn derive_decode(input: TokenStream) -> TokenStream {
    decode::derive_decode(input)
}

/// Derive macro exposing a `Scan` implementor as a decode target.
#[proc_macro_derive(ScanTarget)]
pub fn derive_scan_target(input: TokenStream) -> TokenStream {
    scan_target::derive_scan_target(input)
}
