//! Decode targets and field descriptor tables.
//!
//! The walker never reflects over types. Each decodable struct provides a
//! static table of [`FieldDescriptor`]s through [`Decode::fields`], and hands
//! out one field at a time as a [`Target`] through [`Decode::field_target`].
//! A field's static type decides its `Target` variant via [`AsTarget`]:
//!
//! | Field type                         | Target                 |
//! |------------------------------------|------------------------|
//! | built-in leaf (`u16`, `String`...) | [`Target::Leaf`]       |
//! | `#[derive(ScanTarget)]` type       | [`Target::Scan`]       |
//! | `#[derive(Decode)]` struct         | [`Target::Struct`]     |
//! | `Option<T>`, `Box<T>`              | whatever `T` yields    |
//!
//! `#[derive(Decode)]` generates both traits. Hand-written impls are fine as
//! long as `field_target(i)` matches `fields()[i]`.

use std::time::Duration;

use time::OffsetDateTime;

use crate::leaf::Leaf;
use crate::scan::Scan;

/// Static description of one tagged field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    type_name: &'static str,
    tags: &'static [(&'static str, &'static str)],
}

impl FieldDescriptor {
    /// `tags` pairs a tag name (such as `kv`) with its annotation string.
    pub const fn new(
        name: &'static str,
        type_name: &'static str,
        tags: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            name,
            type_name,
            tags,
        }
    }

    /// Field name as declared in the struct.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared type, as source text.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn tags(&self) -> &'static [(&'static str, &'static str)] {
        self.tags
    }

    /// Annotation string for tag `name`, if the field carries one.
    pub fn tag(&self, name: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(tag, _)| *tag == name)
            .map(|(_, spec)| *spec)
    }
}

/// A struct whose tagged fields can be populated from a key-value store.
pub trait Decode {
    /// Tagged fields in declaration order.
    fn fields(&self) -> &'static [FieldDescriptor];

    /// Borrow field `index` (an index into [`Decode::fields`]) as a target.
    ///
    /// Optional fields are filled with a default value by this call.
    fn field_target(&mut self, index: usize) -> Option<Target<'_>>;

    /// Name of the implementing type, for diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Where a decoded value goes.
pub enum Target<'a> {
    /// Built-in leaf conversion.
    Leaf(Leaf<'a>),
    /// Custom scan hook.
    Scan(&'a mut dyn Scan),
    /// Nested struct, decoded field by field under a deeper prefix.
    Struct(&'a mut dyn Decode),
    /// A type with no conversion rule. Decoding a present value fails.
    Unsupported(&'static str),
}

impl Target<'_> {
    /// Short description for logs and shape errors.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Leaf(_) => "leaf value",
            Self::Scan(_) => "scan target",
            Self::Struct(_) => "struct",
            Self::Unsupported(name) => *name,
        }
    }
}

/// Exposes a value as a decode [`Target`].
pub trait AsTarget {
    fn as_target(&mut self) -> Target<'_>;

    /// The value's field table, if it has one.
    ///
    /// Used for the decode root, which is walked even when the type is a
    /// scan target as a field. Leaves and plain scan types return `None`.
    fn as_decode(&mut self) -> Option<&mut dyn Decode> {
        None
    }
}

macro_rules! leaf_targets {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl AsTarget for $ty {
                fn as_target(&mut self) -> Target<'_> {
                    Target::Leaf(Leaf::$variant(self))
                }
            }
        )*
    };
}

leaf_targets! {
    String => String,
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    Duration => Duration,
    OffsetDateTime => Time,
    Vec<String> => Strings,
}

/// Optional fields are auto-vivified: an empty slot gets `T::default()`
/// before the inner target is produced.
impl<T: AsTarget + Default> AsTarget for Option<T> {
    fn as_target(&mut self) -> Target<'_> {
        self.get_or_insert_with(T::default).as_target()
    }

    fn as_decode(&mut self) -> Option<&mut dyn Decode> {
        self.get_or_insert_with(T::default).as_decode()
    }
}

impl<T: AsTarget + ?Sized> AsTarget for Box<T> {
    fn as_target(&mut self) -> Target<'_> {
        (**self).as_target()
    }

    fn as_decode(&mut self) -> Option<&mut dyn Decode> {
        (**self).as_decode()
    }
}
