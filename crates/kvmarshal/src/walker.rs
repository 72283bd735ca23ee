//! Structural walker.
//!
//! Depth-first traversal of a [`Decode`] struct. For each tagged field, in
//! declaration order, the walker builds the field's key from the current
//! prefix, then either recurses (nested structs) or issues exactly one
//! backend lookup and converts the result (leaves and scan targets).
//!
//! ```text
//! prefix "cfg/"
//!   host     → get("cfg/host")
//!   logger   → recurse with prefix "cfg/logger/"
//!     level  → get("cfg/logger/level")
//!   timeout  → get("cfg/timeout")
//! ```
//!
//! The first failure aborts the walk, including a field table that lists a
//! field its type does not hand out. Fields decoded before it keep their
//! new values.

use tracing::trace;

use crate::context::Context;
use crate::decoder::DecoderConfig;
use crate::error::DecodeError;
use crate::kv::Kv;
use crate::tag::TagSpec;
use crate::target::{Decode, Target};
use crate::value::UnmarshalOptions;

/// Per-call traversal state. Nothing outlives one decode.
pub(crate) struct Walker<'d, K: ?Sized> {
    kv: &'d K,
    ctx: &'d Context,
    config: &'d DecoderConfig,
}

impl<'d, K: Kv + ?Sized> Walker<'d, K> {
    pub(crate) fn new(kv: &'d K, ctx: &'d Context, config: &'d DecoderConfig) -> Self {
        Self { kv, ctx, config }
    }

    /// Decode every tagged field of `target` under `prefix`.
    ///
    /// `depth` counts enclosing structs; the root is depth 0.
    pub(crate) fn walk(
        &self,
        target: &mut dyn Decode,
        prefix: &str,
        depth: usize,
    ) -> Result<(), DecodeError> {
        if depth > self.config.max_depth {
            return Err(DecodeError::DepthLimit {
                prefix: prefix.to_owned(),
                max_depth: self.config.max_depth,
            });
        }

        for (index, field) in target.fields().iter().enumerate() {
            let Some(tag) = field.tag(&self.config.tag).filter(|tag| !tag.is_empty()) else {
                trace!(field = field.name(), "no tag, skipping");
                continue;
            };
            let spec = TagSpec::parse(tag);
            let key = format!("{prefix}{}", spec.key());

            let Some(slot) = target.field_target(index) else {
                return Err(DecodeError::FieldTable {
                    ty: target.type_name(),
                    field: field.name(),
                });
            };
            self.decode_field(slot, key, depth)
                .map_err(|err| err.in_field(field.name()))?;
        }
        Ok(())
    }

    fn decode_field(
        &self,
        target: Target<'_>,
        key: String,
        depth: usize,
    ) -> Result<(), DecodeError> {
        match target {
            Target::Struct(nested) => {
                let mut prefix = key;
                prefix.push_str(&self.config.separator);
                trace!(%prefix, "descending into struct");
                self.walk(nested, &prefix, depth + 1)
            }
            leaf => {
                if let Err(source) = self.ctx.check() {
                    return Err(DecodeError::Backend { key, source });
                }
                trace!(%key, "lookup");
                let value = match self.kv.get(self.ctx, &key) {
                    Ok(value) => value,
                    Err(source) => return Err(DecodeError::Backend { key, source }),
                };
                let opts = UnmarshalOptions {
                    slice_separator: Some(&self.config.slice_separator),
                };
                value
                    .unmarshal_to(leaf, &opts)
                    .map_err(|source| DecodeError::Value { key, source })
            }
        }
    }
}
