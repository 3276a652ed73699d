//! Typed accessors and the binder that resolves them.

use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use crate::{BindError, ConfigValue, Resolver};

/// Declaration of one typed configuration property.
///
/// Accessors are `const`-constructible so shapes can describe themselves in
/// static tables:
///
/// ```rust
/// use propstack::Accessor;
///
/// const PORT: Accessor<u16> = Accessor::new(&["server.port", "port"]).with_default("8080");
/// assert_eq!(PORT.info().key(), "server.port");
/// ```
pub struct Accessor<T> {
    keys: &'static [&'static str],
    default: Option<&'static str>,
    allow_null: bool,
    target: PhantomData<fn() -> T>,
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Accessor<T> {}

impl<T: ConfigValue> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.info(), f)
    }
}

impl<T: ConfigValue> Accessor<T> {
    /// Declare a required accessor looked up under `keys`, primary key first.
    #[must_use]
    pub const fn new(keys: &'static [&'static str]) -> Self {
        Self {
            keys,
            default: None,
            allow_null: false,
            target: PhantomData,
        }
    }

    /// Use `default` when no key is present.
    #[must_use]
    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    /// Bind to the type's null representation when no key is present.
    #[must_use]
    pub const fn allow_null(mut self) -> Self {
        self.allow_null = true;
        self
    }

    /// Type-erased description of the accessor.
    #[must_use]
    pub const fn info(&self) -> AccessorInfo {
        AccessorInfo {
            keys: self.keys,
            default: self.default,
            allow_null: self.allow_null,
            target: T::TYPE_NAME,
        }
    }
}

/// Description of an accessor without its target type parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessorInfo {
    /// Lookup keys, primary key first followed by fallbacks.
    pub keys: &'static [&'static str],
    /// Declared default value, if any.
    pub default: Option<&'static str>,
    /// Whether absence binds to the null representation.
    pub allow_null: bool,
    /// Name of the target type.
    pub target: &'static str,
}

impl AccessorInfo {
    /// The key named in error messages.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.keys.first().copied().unwrap_or_default()
    }

    /// Keys consulted when the primary key is absent.
    #[must_use]
    pub fn aliases(&self) -> &'static [&'static str] {
        self.keys.get(1..).unwrap_or_default()
    }
}

/// Binds accessors against one resolver.
#[derive(Clone, Copy, Debug)]
pub struct Binder<'r> {
    resolver: &'r Resolver,
}

impl<'r> Binder<'r> {
    /// Create a binder reading from `resolver`.
    #[must_use]
    pub const fn new(resolver: &'r Resolver) -> Self {
        Self { resolver }
    }

    /// The resolver values are read from.
    #[must_use]
    pub const fn resolver(&self) -> &'r Resolver {
        self.resolver
    }

    /// Resolve `accessor` to a typed value.
    ///
    /// The first key present in the resolver supplies the value; otherwise
    /// the declared default is used, then the null allowance. Errors always
    /// name the primary key, even when an alias supplied the value; a cycle's
    /// chain starts at the alias.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::TypeCoercion`] when the value or default does not
    /// convert, [`BindError::NullNotRepresentable`] when null is allowed but
    /// `T` has no null, [`BindError::InterpolationCycle`] when references
    /// loop and [`BindError::MissingRequired`] when nothing applies.
    pub fn bind<T: ConfigValue>(&self, accessor: &Accessor<T>) -> Result<T, BindError> {
        let info = accessor.info();
        let primary = info.key();
        for &key in info.keys {
            let Some(hit) = self.resolver.resolve(key) else {
                continue;
            };
            trace!(key, layer = hit.layer, origin = %hit.origin, "resolved accessor");
            let value = self
                .resolver
                .expand(key, hit.value)
                .map_err(|err| err.reported_as(primary))?;
            return coerce(primary, value);
        }

        if let Some(default) = info.default {
            trace!(key = primary, default, "using declared default");
            return coerce(primary, default.to_owned());
        }
        if info.allow_null {
            trace!(key = primary, "binding null");
            return T::null().ok_or_else(|| BindError::NullNotRepresentable {
                key: primary.to_owned(),
                target: T::TYPE_NAME,
            });
        }
        Err(BindError::MissingRequired {
            key: primary.to_owned(),
        })
    }
}

/// Resolve `accessor` against `resolver`.
///
/// # Errors
///
/// See [`Binder::bind`].
pub fn bind<T: ConfigValue>(resolver: &Resolver, accessor: &Accessor<T>) -> Result<T, BindError> {
    Binder::new(resolver).bind(accessor)
}

fn coerce<T: ConfigValue>(key: &str, value: String) -> Result<T, BindError> {
    T::coerce(&value).map_err(|failure| BindError::TypeCoercion {
        key: key.to_owned(),
        reason: failure.reason().to_owned(),
        value,
        target: T::TYPE_NAME,
    })
}
