//! Snapshot adapter over an in-memory map.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use super::{Origin, Source};
use crate::KeyNotFound;

/// Values supplied programmatically, captured when the source is built.
#[derive(Clone, Debug)]
pub struct MapSource {
    values: BTreeMap<String, String>,
    origin: Origin,
}

impl Default for MapSource {
    fn default() -> Self {
        Self::from(BTreeMap::new())
    }
}

impl MapSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace `key`, returning the updated source.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Number of keys held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when no keys are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MapSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            origin: Origin::Memory,
        }
    }
}

impl From<BTreeMap<String, String>> for MapSource {
    fn from(values: BTreeMap<String, String>) -> Self {
        Self {
            values,
            origin: Origin::Memory,
        }
    }
}

impl<S: BuildHasher> From<HashMap<String, String, S>> for MapSource {
    fn from(values: HashMap<String, String, S>) -> Self {
        values.into_iter().collect()
    }
}

impl Source for MapSource {
    fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn get(&self, key: &str) -> Result<Cow<'_, str>, KeyNotFound> {
        self.values
            .get(key)
            .map(|v| Cow::Borrowed(v.as_str()))
            .ok_or_else(|| KeyNotFound::new(key))
    }

    fn origin(&self) -> &Origin {
        &self.origin
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.values.len())
    }
}
