//! Conversion of raw string values into typed accessor results.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use camino::Utf8PathBuf;
use thiserror::Error;

mod duration;
#[cfg(test)]
mod tests;

/// Reason a raw value could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct CoercionFailure {
    reason: String,
}

impl CoercionFailure {
    /// Wrap a conversion error message.
    #[must_use]
    pub fn new(reason: impl fmt::Display) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }

    /// The conversion error message.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// A type an accessor can produce from a resolved string.
///
/// Types with a meaningful string syntax can implement this with the
/// [`config_value_from_str!`](crate::config_value_from_str) macro.
pub trait ConfigValue: Sized {
    /// Human-readable type name used in error messages.
    const TYPE_NAME: &'static str;

    /// Convert a raw value.
    ///
    /// # Errors
    ///
    /// Returns a [`CoercionFailure`] when `raw` has no representation in
    /// `Self`.
    fn coerce(raw: &str) -> Result<Self, CoercionFailure>;

    /// The value used when an accessor resolves to null, if the type has
    /// one.
    #[must_use]
    fn null() -> Option<Self> {
        None
    }
}

/// Implement [`ConfigValue`] for types whose `FromStr` errors implement
/// `Display`.
///
/// ```rust
/// use std::net::Ipv6Addr;
///
/// struct Bind(Ipv6Addr);
///
/// impl std::str::FromStr for Bind {
///     type Err = std::net::AddrParseError;
///
///     fn from_str(s: &str) -> Result<Self, Self::Err> {
///         s.parse().map(Bind)
///     }
/// }
///
/// propstack::config_value_from_str!(Bind => "IPv6 address");
/// # use propstack::ConfigValue as _;
/// # assert!(Bind::coerce("::1").is_ok());
/// ```
#[macro_export]
macro_rules! config_value_from_str {
    ($($ty:ty => $name:literal),+ $(,)?) => {$(
        impl $crate::ConfigValue for $ty {
            const TYPE_NAME: &'static str = $name;

            fn coerce(raw: &str) -> ::core::result::Result<Self, $crate::CoercionFailure> {
                <$ty as ::core::str::FromStr>::from_str(raw).map_err($crate::CoercionFailure::new)
            }
        }
    )+};
}

impl ConfigValue for String {
    const TYPE_NAME: &'static str = "string";

    fn coerce(raw: &str) -> Result<Self, CoercionFailure> {
        Ok(raw.to_owned())
    }
}

const TRUE: [&str; 4] = ["true", "yes", "on", "1"];
const FALSE: [&str; 4] = ["false", "no", "off", "0"];

impl ConfigValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn coerce(raw: &str) -> Result<Self, CoercionFailure> {
        let word = raw.trim();
        if TRUE.iter().any(|t| t.eq_ignore_ascii_case(word)) {
            Ok(true)
        } else if FALSE.iter().any(|f| f.eq_ignore_ascii_case(word)) {
            Ok(false)
        } else {
            Err(CoercionFailure::new(
                "expected true/false, yes/no, on/off or 1/0",
            ))
        }
    }
}

macro_rules! trimmed_from_str {
    ($($ty:ty),+ $(,)?) => {$(
        impl ConfigValue for $ty {
            const TYPE_NAME: &'static str = stringify!($ty);

            fn coerce(raw: &str) -> Result<Self, CoercionFailure> {
                raw.trim().parse::<$ty>().map_err(CoercionFailure::new)
            }
        }
    )+};
}

trimmed_from_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

impl ConfigValue for char {
    const TYPE_NAME: &'static str = "char";

    fn coerce(raw: &str) -> Result<Self, CoercionFailure> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(CoercionFailure::new("expected exactly one character")),
        }
    }
}

impl ConfigValue for PathBuf {
    const TYPE_NAME: &'static str = "path";

    fn coerce(raw: &str) -> Result<Self, CoercionFailure> {
        Ok(Self::from(raw))
    }
}

impl ConfigValue for Utf8PathBuf {
    const TYPE_NAME: &'static str = "path";

    fn coerce(raw: &str) -> Result<Self, CoercionFailure> {
        Ok(Self::from(raw))
    }
}

impl ConfigValue for Duration {
    const TYPE_NAME: &'static str = "duration";

    fn coerce(raw: &str) -> Result<Self, CoercionFailure> {
        duration::parse(raw)
    }
}

/// `Option<T>` represents null as `None`; a present value binds to `Some`.
impl<T: ConfigValue> ConfigValue for Option<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;

    fn coerce(raw: &str) -> Result<Self, CoercionFailure> {
        T::coerce(raw).map(Some)
    }

    fn null() -> Option<Self> {
        Some(None)
    }
}
