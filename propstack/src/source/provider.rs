//! Snapshot adapter over any `figment` provider.

use std::borrow::Cow;
use std::collections::BTreeMap;

use figment::value::{Dict, Value};
use figment::{Figment, Provider};
use tracing::warn;

use super::{Origin, Source};
use crate::{KeyNotFound, LoadCause, SourceLoadError};

/// Values extracted from a [`figment::Provider`] when the source is built.
///
/// Nested dictionaries are flattened into dotted keys (`db.host`) and scalar
/// values are rendered as strings. Arrays have no key/value representation
/// and are skipped.
///
/// ```rust
/// use figment::providers::Serialized;
/// use propstack::Source as _;
/// use propstack::source::ProviderSource;
///
/// #[derive(serde::Serialize)]
/// struct Db {
///     host: &'static str,
///     port: u16,
/// }
///
/// let source = ProviderSource::from_provider(Serialized::default(
///     "db",
///     Db { host: "db.internal", port: 5432 },
/// ))?;
/// assert_eq!(source.get("db.port").as_deref(), Ok("5432"));
/// # Ok::<_, propstack::SourceLoadError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ProviderSource {
    values: BTreeMap<String, String>,
    origin: Origin,
}

impl ProviderSource {
    /// Extract and flatten the data of `provider`.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceLoadError`] when the provider fails to produce data.
    pub fn from_provider<P: Provider>(provider: P) -> Result<Self, SourceLoadError> {
        let origin = Origin::Provider(provider.metadata().name.into_owned());
        let dict: Dict = match Figment::from(provider).extract() {
            Ok(dict) => dict,
            Err(err) => {
                return Err(SourceLoadError::new(
                    origin,
                    LoadCause::Provider(Box::new(err)),
                ));
            }
        };
        let mut values = BTreeMap::new();
        flatten("", &dict, &mut values);
        Ok(Self { values, origin })
    }

    /// Number of flattened keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the provider yielded no scalar values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn flatten(prefix: &str, dict: &Dict, out: &mut BTreeMap<String, String>) {
    for (name, value) in dict {
        let key = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        if let Some(nested) = value.as_dict() {
            flatten(&key, nested, out);
        } else if let Some(rendered) = render(value) {
            out.insert(key, rendered);
        } else if value.as_array().is_some() {
            warn!(key = %key, "skipping array value; sources hold single strings");
        }
    }
}

fn render(value: &Value) -> Option<String> {
    match value {
        Value::String(_, s) => Some(s.clone()),
        Value::Char(_, c) => Some(c.to_string()),
        Value::Bool(_, b) => Some(b.to_string()),
        Value::Num(_, n) => n
            .to_u128()
            .map(|v| v.to_string())
            .or_else(|| n.to_i128().map(|v| v.to_string()))
            .or_else(|| n.to_f64().map(|v| v.to_string())),
        _ => None,
    }
}

impl Source for ProviderSource {
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
