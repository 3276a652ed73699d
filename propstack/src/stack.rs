//! Push-only builder collecting sources before they are frozen.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use figment::Provider;
use tracing::debug;
use url::Url;

use crate::source::{EnvSource, MapSource, PropertiesSource, ProviderSource};
use crate::{Resolver, Source, SourceLoadError};

/// Ordered collection of sources; later pushes take priority.
///
/// Sources are layered from general to specific:
///
/// ```rust,no_run
/// use propstack::LayerStack;
///
/// let mut stack = LayerStack::new();
/// stack
///     .push_from_file("/etc/app/global.properties")?
///     .push_from_file("/etc/app/environment.properties")?
///     .push_from_file("/etc/app/instance.properties")?;
/// let resolver = stack.build();
/// # Ok::<_, propstack::SourceLoadError>(())
/// ```
///
/// A key defined by several files resolves to the instance file's value.
/// There is no way to remove or reorder layers; priority is decided by
/// push order alone.
#[derive(Debug)]
pub struct LayerStack {
    layers: Vec<Arc<dyn Source>>,
    interpolate: bool,
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStack {
    /// Create an empty stack with interpolation enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            layers: Vec::new(),
            interpolate: true,
        }
    }

    /// Enable or disable `${...}` expansion for resolvers built from this
    /// stack.
    #[must_use]
    pub fn with_interpolation(mut self, enabled: bool) -> Self {
        self.interpolate = enabled;
        self
    }

    /// Push `source` with the highest priority so far.
    pub fn push<S: Source + 'static>(&mut self, source: S) -> &mut Self {
        self.push_shared(Arc::new(source))
    }

    /// Push a source that is already shared.
    pub fn push_shared(&mut self, source: Arc<dyn Source>) -> &mut Self {
        debug!(
            layer = self.layers.len(),
            origin = %source.origin(),
            liveness = ?source.liveness(),
            keys = ?source.size_hint(),
            "pushed configuration layer"
        );
        self.layers.push(source);
        self
    }

    /// Push an in-memory map built from `entries`.
    pub fn push_map<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.push(entries.into_iter().collect::<MapSource>())
    }

    /// Push a live view of the process environment, keyed by variable name.
    pub fn push_env(&mut self) -> &mut Self {
        self.push(EnvSource::raw())
    }

    /// Load a UTF-8 properties file and push it.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceLoadError`] naming `path` when the file cannot be
    /// read or parsed. The stack is unchanged on failure.
    pub fn push_from_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, SourceLoadError> {
        let source = PropertiesSource::from_file(path)?;
        Ok(self.push(source))
    }

    /// Fetch UTF-8 properties data from `url` and push it.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceLoadError`] naming `url` when the data cannot be
    /// fetched or parsed. The stack is unchanged on failure.
    pub fn push_from_url(&mut self, url: &Url) -> Result<&mut Self, SourceLoadError> {
        let source = PropertiesSource::from_url(url)?;
        Ok(self.push(source))
    }

    /// Read UTF-8 properties data from `reader` to its end and push it.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceLoadError`] when reading or parsing fails. The
    /// stack is unchanged on failure.
    pub fn push_from_reader<R: Read>(&mut self, reader: R) -> Result<&mut Self, SourceLoadError> {
        let source = PropertiesSource::from_reader(reader)?;
        Ok(self.push(source))
    }

    /// Parse UTF-8 properties data and push it.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceLoadError`] when the data is not UTF-8 or cannot be
    /// parsed.
    pub fn push_from_bytes(&mut self, data: &[u8]) -> Result<&mut Self, SourceLoadError> {
        let source = PropertiesSource::from_bytes(data)?;
        Ok(self.push(source))
    }

    /// Parse properties text and push it.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceLoadError`] when the text cannot be parsed.
    pub fn push_from_str(&mut self, text: &str) -> Result<&mut Self, SourceLoadError> {
        let source = PropertiesSource::parse(text)?;
        Ok(self.push(source))
    }

    /// Flatten the data of a `figment` provider and push it.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceLoadError`] when the provider fails.
    pub fn push_provider<P: Provider>(&mut self, provider: P) -> Result<&mut Self, SourceLoadError> {
        let source = ProviderSource::from_provider(provider)?;
        Ok(self.push(source))
    }

    /// Number of layers pushed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` when nothing has been pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Build a resolver over the layers pushed so far, keeping the builder.
    ///
    /// Later pushes to this stack do not affect the returned resolver.
    #[must_use]
    pub fn freeze(&self) -> Resolver {
        Resolver::new(self.layers.clone(), self.interpolate)
    }

    /// Consume the builder and return its resolver.
    #[must_use]
    pub fn build(self) -> Resolver {
        Resolver::new(self.layers, self.interpolate)
    }
}

#[cfg(test)]
mod tests {
    //! Tests for layer pushing and freezing.

    use super::*;
    use crate::{LoadCause, Origin};
    use rstest::rstest;

    #[rstest]
    fn failed_loads_leave_the_stack_unchanged() {
        let mut stack = LayerStack::new();
        stack.push_map([("conf1", "map-1")]);
        let err = stack
            .push_from_file("/foo/bar/baz")
            .map(|_| ())
            .expect_err("missing file");
        assert!(matches!(err.cause(), LoadCause::Io(_)));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.build().lookup("conf1").as_deref(), Some("map-1"));
    }

    #[rstest]
    fn freeze_ignores_later_pushes() {
        let mut stack = LayerStack::new();
        stack.push_map([("conf1", "first")]);
        let frozen = stack.freeze();
        stack.push_map([("conf1", "second"), ("conf2", "extra")]);

        assert_eq!(frozen.len(), 1);
        assert_eq!(frozen.lookup("conf1").as_deref(), Some("first"));
        assert_eq!(frozen.lookup("conf2"), None);
        assert_eq!(stack.build().lookup("conf1").as_deref(), Some("second"));
    }

    #[rstest]
    fn records_layer_origins_in_push_order() -> Result<(), SourceLoadError> {
        let mut stack = LayerStack::new();
        stack
            .push_env()
            .push_from_str("a=1")?
            .push_from_reader("b=2".as_bytes())?;
        let resolver = stack.build();
        let origins: Vec<&Origin> = resolver.origins().collect();
        assert_eq!(
            origins,
            vec![
                &Origin::Environment { prefix: None },
                &Origin::Inline,
                &Origin::Stream
            ]
        );
        Ok(())
    }
}
