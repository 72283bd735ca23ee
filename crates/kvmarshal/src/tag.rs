//! Tag annotation parsing.
//!
//! An annotation is `key[,modifier...]`. The key is the field's path
//! segment; modifiers adjust handling. Unknown modifiers are ignored.

use bitflags::bitflags;

bitflags! {
    /// Modifiers following the key in a tag annotation.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TagModifiers: u8 {
        /// `omitempty`. Parsed, but decoding does not consult it: a missing
        /// key already leaves the field untouched.
        const OMIT_EMPTY = 1 << 0;
    }
}

/// Parsed tag annotation.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct TagSpec<'a> {
    key: &'a str,
    modifiers: TagModifiers,
}

impl<'a> TagSpec<'a> {
    pub fn parse(tag: &'a str) -> Self {
        let mut parts = tag.split(',');
        // split always yields at least one item
        let key = parts.next().unwrap_or_default();
        let mut modifiers = TagModifiers::empty();
        for part in parts {
            if part == "omitempty" {
                modifiers |= TagModifiers::OMIT_EMPTY;
            }
        }
        Self { key, modifiers }
    }

    /// Path segment for this field.
    pub fn key(&self) -> &'a str {
        self.key
    }

    pub fn modifiers(&self) -> TagModifiers {
        self.modifiers
    }

    pub fn omit_empty(&self) -> bool {
        self.modifiers.contains(TagModifiers::OMIT_EMPTY)
    }
}
