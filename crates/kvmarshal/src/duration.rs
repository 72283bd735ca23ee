//! Duration literal grammar.
//!
//! A duration is an optional sign followed by one or more
//! `<decimal><unit>` groups, such as `300ms`, `1.5h` or `2h45m`.
//! Valid units are `ns`, `us` (or `µs`/`μs`), `ms`, `s`, `m` and `h`.
//! The bare literal `0` needs no unit.
//!
//! Only non-negative durations are representable; `-0s` is accepted,
//! any other negative value is rejected.

use std::fmt;
use std::time::Duration;

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Error from parsing a duration literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DurationError {
    /// Empty input or a group without digits.
    InvalidSyntax,
    /// A number without a unit suffix (other than the bare `0`).
    MissingUnit,
    /// Unit suffix not in the unit table.
    UnknownUnit(String),
    /// Value does not fit in 64-bit nanoseconds.
    Overflow,
    /// Non-zero value with a leading `-`.
    Negative,
}

impl fmt::Display for DurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSyntax => f.write_str("invalid duration"),
            Self::MissingUnit => f.write_str("missing unit in duration"),
            Self::UnknownUnit(unit) => write!(f, "unknown unit {unit:?} in duration"),
            Self::Overflow => f.write_str("duration out of range"),
            Self::Negative => f.write_str("negative durations are not supported"),
        }
    }
}

impl std::error::Error for DurationError {}

/// Nanoseconds per unit suffix.
fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{00b5}s" | "\u{03bc}s" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(60 * 60 * NANOS_PER_SEC),
        _ => None,
    }
}

/// Parse a duration literal.
///
/// # Examples
///
/// ```ignore
/// parse_duration("5s")      // 5 seconds
/// parse_duration("1h30m")   // 90 minutes
/// parse_duration("1.5ms")   // 1_500_000 nanoseconds
/// parse_duration("0")       // zero
/// ```
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let mut rest = input;
    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(DurationError::InvalidSyntax);
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        // Integer part.
        let int_len = leading_digits(rest);
        let mut whole: u64 = 0;
        for b in rest[..int_len].bytes() {
            whole = whole
                .checked_mul(10)
                .and_then(|v| v.checked_add(u64::from(b - b'0')))
                .ok_or(DurationError::Overflow)?;
        }
        rest = &rest[int_len..];

        // Fractional part. Digits beyond u64 precision are dropped.
        let mut frac: u64 = 0;
        let mut scale: f64 = 1.0;
        let mut frac_len = 0;
        if let Some(stripped) = rest.strip_prefix('.') {
            rest = stripped;
            frac_len = leading_digits(rest);
            let mut overflowed = false;
            for b in rest[..frac_len].bytes() {
                if overflowed {
                    continue;
                }
                match frac
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(u64::from(b - b'0')))
                {
                    Some(v) => {
                        frac = v;
                        scale *= 10.0;
                    }
                    None => overflowed = true,
                }
            }
            rest = &rest[frac_len..];
        }
        if int_len == 0 && frac_len == 0 {
            return Err(DurationError::InvalidSyntax);
        }

        // Unit.
        let unit_len = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_len == 0 {
            return Err(DurationError::MissingUnit);
        }
        let unit = &rest[..unit_len];
        let per_unit =
            unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit(unit.to_owned()))?;
        rest = &rest[unit_len..];

        let mut nanos = whole.checked_mul(per_unit).ok_or(DurationError::Overflow)?;
        if frac > 0 {
            #[expect(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                clippy::cast_precision_loss,
                reason = "fractional nanoseconds are truncated toward zero"
            )]
            let frac_nanos = (frac as f64 * (per_unit as f64 / scale)) as u64;
            nanos = nanos.checked_add(frac_nanos).ok_or(DurationError::Overflow)?;
        }
        total = total.checked_add(nanos).ok_or(DurationError::Overflow)?;
    }

    if negative && total != 0 {
        return Err(DurationError::Negative);
    }
    Ok(Duration::from_nanos(total))
}

/// Length of the leading ASCII-digit run.
fn leading_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}
