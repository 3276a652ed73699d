//! Once-per-type storage of constructed configuration objects.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

type Erased = Arc<dyn Any + Send + Sync>;

#[derive(Default)]
struct Slot {
    value: Mutex<Option<Erased>>,
}

/// Type-keyed cache that constructs each entry at most once.
///
/// Concurrent first requests for the same type wait on that type's slot while
/// one of them builds; requests for other types proceed independently.
#[derive(Default)]
pub struct BindingCache {
    slots: Mutex<HashMap<TypeId, Arc<Slot>>>,
}

impl fmt::Debug for BindingCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingCache")
            .field("len", &self.len())
            .finish()
    }
}

impl BindingCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached `T`, building and storing it first if needed.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `build`; nothing is stored and a
    /// later call builds again.
    pub fn get_or_create<T, E>(&self, build: impl FnOnce() -> Result<T, E>) -> Result<Arc<T>, E>
    where
        T: Send + Sync + 'static,
    {
        let slot = self.slot::<T>();
        let mut value = slot.value.lock();
        if let Some(existing) = value.as_ref().and_then(|v| Arc::clone(v).downcast::<T>().ok()) {
            trace!(shape = type_name::<T>(), "binding cache hit");
            return Ok(existing);
        }
        debug!(shape = type_name::<T>(), "constructing configuration object");
        let built = Arc::new(build()?);
        *value = Some(Arc::clone(&built) as Erased);
        Ok(built)
    }

    /// Returns `true` when a `T` has been stored.
    #[must_use]
    pub fn contains<T: 'static>(&self) -> bool {
        let slot = self.slots.lock().get(&TypeId::of::<T>()).cloned();
        slot.is_some_and(|s| s.value.lock().is_some())
    }

    /// Number of stored objects.
    #[must_use]
    pub fn len(&self) -> usize {
        let slots: Vec<Arc<Slot>> = self.slots.lock().values().cloned().collect();
        slots.iter().filter(|s| s.value.lock().is_some()).count()
    }

    /// Returns `true` when nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot<T: 'static>(&self) -> Arc<Slot> {
        Arc::clone(self.slots.lock().entry(TypeId::of::<T>()).or_default())
    }
}
