//! Immutable composite view over a frozen layer stack.

use std::sync::Arc;

use tracing::debug;

use crate::{BindError, Origin, Source};

mod interpolate;

/// A value together with the layer that supplied it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved<'r> {
    /// The raw value.
    pub value: String,
    /// Zero-based push index of the supplying layer.
    pub layer: usize,
    /// Origin of the supplying layer.
    pub origin: &'r Origin,
}

/// Read-only lookup over a frozen sequence of sources.
///
/// Lookups scan from the most recently pushed layer to the first and stop at
/// the first layer that defines the key. Nothing is merged ahead of time, so
/// live sources are consulted at query time. Cloning is cheap and clones
/// share the layers.
#[derive(Clone, Debug)]
pub struct Resolver {
    layers: Arc<[Arc<dyn Source>]>,
    interpolate: bool,
}

impl Resolver {
    pub(crate) fn new(layers: Vec<Arc<dyn Source>>, interpolate: bool) -> Self {
        debug!(layers = layers.len(), interpolate, "built configuration resolver");
        Self {
            layers: layers.into(),
            interpolate,
        }
    }

    /// Returns the value of `key` from the highest-priority layer defining
    /// it, or `None` when no layer does.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.resolve(key).map(|resolved| resolved.value)
    }

    /// As [`Resolver::lookup`], also reporting which layer won.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<Resolved<'_>> {
        self.matches(key).next()
    }

    /// Every layer defining `key`, highest priority first.
    ///
    /// The first entry is the value [`Resolver::lookup`] returns; the rest
    /// are shadowed.
    #[must_use]
    pub fn explain(&self, key: &str) -> Vec<Resolved<'_>> {
        self.matches(key).collect()
    }

    /// Returns `true` when some layer defines `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.layers.iter().any(|layer| layer.has(key))
    }

    /// Looks `key` up and expands `${...}` references in the value when
    /// interpolation is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::InterpolationCycle`] when references loop.
    pub fn lookup_interpolated(&self, key: &str) -> Result<Option<String>, BindError> {
        self.lookup(key).map(|raw| self.expand(key, raw)).transpose()
    }

    /// Expand references in `raw`, the value found for `key`, unless
    /// interpolation is disabled.
    pub(crate) fn expand(&self, key: &str, raw: String) -> Result<String, BindError> {
        if self.interpolate {
            interpolate::expand(self, key, &raw)
        } else {
            Ok(raw)
        }
    }

    /// Whether bound values are interpolated.
    #[must_use]
    pub const fn interpolates(&self) -> bool {
        self.interpolate
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` when the resolver has no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layer origins in push order.
    pub fn origins(&self) -> impl Iterator<Item = &Origin> + '_ {
        self.layers.iter().map(|layer| layer.origin())
    }

    fn matches<'r>(&'r self, key: &str) -> impl Iterator<Item = Resolved<'r>> {
        self.layers
            .iter()
            .enumerate()
            .rev()
            .filter(move |(_, layer)| layer.has(key))
            .filter_map(move |(idx, layer)| {
                // A live source may drop the key between `has` and `get`;
                // that layer then counts as not defining it.
                let value = layer.get(key).ok()?.into_owned();
                Some(Resolved {
                    value,
                    layer: idx,
                    origin: layer.origin(),
                })
            })
    }
}
