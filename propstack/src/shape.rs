//! Declared configuration shapes.

use crate::{AccessorInfo, BindError, Binder};

/// A struct assembled from typed accessors.
///
/// Usually derived with `#[derive(ConfigShape)]`. A hand-written
/// implementation declares its accessors as constants and binds each of
/// them, returning the first failure:
///
/// ```rust
/// use propstack::{Accessor, AccessorInfo, BindError, Binder, ConfigShape};
///
/// struct Limits {
///     connections: u32,
/// }
///
/// const CONNECTIONS: Accessor<u32> = Accessor::new(&["limits.connections"]).with_default("64");
///
/// impl ConfigShape for Limits {
///     const NAME: &'static str = "Limits";
///
///     fn accessors() -> &'static [AccessorInfo] {
///         const ACCESSORS: &[AccessorInfo] = &[CONNECTIONS.info()];
///         ACCESSORS
///     }
///
///     fn bind(binder: &Binder<'_>) -> Result<Self, BindError> {
///         Ok(Self {
///             connections: binder.bind(&CONNECTIONS)?,
///         })
///     }
/// }
/// ```
pub trait ConfigShape: Sized + Send + Sync + 'static {
    /// Identity used to tag binding failures.
    const NAME: &'static str;

    /// The accessors bound by [`ConfigShape::bind`], in declaration order.
    fn accessors() -> &'static [AccessorInfo];

    /// Bind every accessor and assemble the value.
    ///
    /// # Errors
    ///
    /// Returns the first accessor failure unchanged.
    fn bind(binder: &Binder<'_>) -> Result<Self, BindError>;
}
