//! Live adapter over a map shared with the rest of the process.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{Liveness, Origin, Source};
use crate::KeyNotFound;

/// A mutable property store whose current contents are seen by every
/// resolver it was pushed into.
///
/// Clones share the same store, so one handle can be pushed onto a stack
/// while another keeps updating it; this plays the role of process-wide
/// system properties.
///
/// ```rust
/// use propstack::LayerStack;
/// use propstack::source::SharedMapSource;
///
/// let props = SharedMapSource::new();
/// let mut stack = LayerStack::new();
/// stack.push(props.clone());
/// let resolver = stack.build();
///
/// props.set("conf1", "sys-1");
/// assert_eq!(resolver.lookup("conf1").as_deref(), Some("sys-1"));
/// ```
#[derive(Clone, Debug)]
pub struct SharedMapSource {
    values: Arc<RwLock<BTreeMap<String, String>>>,
    origin: Origin,
}

impl Default for SharedMapSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedMapSource {
    /// Create an empty shared store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Arc::new(RwLock::new(BTreeMap::new())),
            origin: Origin::Memory,
        }
    }

    /// Set `key` to `value`, returning the previous value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.write().insert(key.into(), value.into())
    }

    /// Remove `key`, returning its value.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.values.write().remove(key)
    }

    /// Remove every key.
    pub fn clear(&self) {
        self.values.write().clear();
    }
}

impl<K, V> FromIterator<(K, V)> for SharedMapSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let source = Self::new();
        source.values.write().extend(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into())),
        );
        source
    }
}

impl Source for SharedMapSource {
    fn has(&self, key: &str) -> bool {
        self.values.read().contains_key(key)
    }

    fn get(&self, key: &str) -> Result<Cow<'_, str>, KeyNotFound> {
        self.values
            .read()
            .get(key)
            .map(|v| Cow::Owned(v.clone()))
            .ok_or_else(|| KeyNotFound::new(key))
    }

    fn origin(&self) -> &Origin {
        &self.origin
    }

    fn liveness(&self) -> Liveness {
        Liveness::Live
    }
}
