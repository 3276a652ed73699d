//! Builds configuration objects from a resolver, caching them per type.

use std::sync::Arc;

use crate::{Binder, BindingCache, ConfigError, ConfigResult, ConfigShape, Resolver};

/// Produces [`ConfigShape`] instances from one frozen resolver.
///
/// [`ConfigFactory::get`] constructs each shape at most once and then hands
/// out the same `Arc`; [`ConfigFactory::build`] always constructs a fresh
/// value and leaves the cache alone.
#[derive(Debug)]
pub struct ConfigFactory {
    resolver: Resolver,
    cache: BindingCache,
}

impl From<Resolver> for ConfigFactory {
    fn from(resolver: Resolver) -> Self {
        Self::new(resolver)
    }
}

impl ConfigFactory {
    /// Create a factory with an empty cache.
    #[must_use]
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver,
            cache: BindingCache::new(),
        }
    }

    /// The resolver shapes are bound against.
    #[must_use]
    pub const fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// The per-type instance cache.
    #[must_use]
    pub const fn cache(&self) -> &BindingCache {
        &self.cache
    }

    /// Construct a `T` without consulting or filling the cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Bind`] tagged with `T::NAME` when any accessor
    /// fails; no partially built value is produced.
    pub fn build<T: ConfigShape>(&self) -> ConfigResult<T> {
        T::bind(&Binder::new(&self.resolver)).map_err(|err| ConfigError::bind(T::NAME, err))
    }

    /// Return the shared `T`, constructing it on first use.
    ///
    /// # Errors
    ///
    /// As [`ConfigFactory::build`]. A failure is not cached.
    pub fn get<T: ConfigShape>(&self) -> ConfigResult<Arc<T>> {
        self.cache.get_or_create(|| self.build::<T>())
    }
}
