//! Custom-scan hook.

use crate::error::BoxError;

/// A type that converts a raw stored string into itself.
///
/// Scan targets always bypass the built-in leaf table, even when the type
/// is a struct the walker could otherwise recurse into. To use a `Scan`
/// implementor as a field, expose it with `#[derive(ScanTarget)]` (or
/// `#[decode(scan)]` on a `#[derive(Decode)]` struct).
///
/// # Example
///
/// ```
/// use kvmarshal::{BoxError, Scan, ScanTarget};
///
/// #[derive(Default, ScanTarget)]
/// struct Endpoint {
///     host: String,
///     port: u16,
/// }
///
/// impl Scan for Endpoint {
///     fn scan(&mut self, raw: &str) -> Result<(), BoxError> {
///         let (host, port) = raw.split_once(':').ok_or("expected host:port")?;
///         self.port = port.parse()?;
///         self.host = host.to_owned();
///         Ok(())
///     }
/// }
/// ```
pub trait Scan {
    /// Replace `self` with the value parsed from `raw`.
    fn scan(&mut self, raw: &str) -> Result<(), BoxError>;
}
