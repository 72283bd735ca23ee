//! Key-value backend capability.
//!
//! The decoder only needs point lookups. A backend returns [`Value::Null`]
//! for a missing key; errors are reserved for backend failures.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::context::Context;
use crate::error::BackendError;
use crate::value::Value;

/// Read access to a key-value store.
pub trait Kv {
    /// Look up `key`.
    ///
    /// The decoder checks `ctx` before every call, so simple in-memory
    /// backends may ignore it; backends that block should honour it.
    fn get(&self, ctx: &Context, key: &str) -> Result<Value, BackendError>;
}

impl<K: Kv + ?Sized> Kv for &K {
    fn get(&self, ctx: &Context, key: &str) -> Result<Value, BackendError> {
        (**self).get(ctx, key)
    }
}

impl<K: Kv + ?Sized> Kv for Box<K> {
    fn get(&self, ctx: &Context, key: &str) -> Result<Value, BackendError> {
        (**self).get(ctx, key)
    }
}

impl<K: Kv + ?Sized> Kv for Arc<K> {
    fn get(&self, ctx: &Context, key: &str) -> Result<Value, BackendError> {
        (**self).get(ctx, key)
    }
}

impl<S: BuildHasher> Kv for HashMap<String, String, S> {
    fn get(&self, _ctx: &Context, key: &str) -> Result<Value, BackendError> {
        Ok(HashMap::get(self, key).cloned().into())
    }
}

impl Kv for BTreeMap<String, String> {
    fn get(&self, _ctx: &Context, key: &str) -> Result<Value, BackendError> {
        Ok(BTreeMap::get(self, key).cloned().into())
    }
}

/// In-memory store backed by a string map.
///
/// # Example
///
/// ```
/// use kvmarshal::MapKv;
///
/// let kv = MapKv::new()
///     .with("host", "localhost")
///     .with("logger/level", "info");
/// assert_eq!(kv.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MapKv {
    entries: FxHashMap<String, String>,
}

impl MapKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapKv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl Kv for MapKv {
    fn get(&self, _ctx: &Context, key: &str) -> Result<Value, BackendError> {
        Ok(self.entries.get(key).cloned().into())
    }
}
