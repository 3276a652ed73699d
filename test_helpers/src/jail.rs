//! Running test bodies inside a `figment::Jail`.
//!
//! A jail gives the closure a scratch working directory and restores every
//! environment variable it sets once the closure returns.

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`] and returns its output.
///
/// # Errors
///
/// Returns an error when the jail cannot be created or `f` fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure produced no value"))
}

/// Converts any displayable error into a [`figment::Error`] so it can be
/// returned from a jail closure with `?`.
pub fn jail_error<E: ToString + ?Sized>(err: &E) -> figment::Error {
    figment::Error::from(err.to_string())
}

#[cfg(test)]
mod tests {
    //! Tests for the `figment` jail wrappers.

    use super::*;

    #[test]
    fn returns_the_closure_output() -> Result<()> {
        let value = with_jail(|jail| {
            jail.set_env("PROPSTACK_JAIL_PROBE", "inside");
            std::env::var("PROPSTACK_JAIL_PROBE").map_err(|err| jail_error(&err))
        })?;
        assert_eq!(value, "inside");
        assert!(std::env::var("PROPSTACK_JAIL_PROBE").is_err());
        Ok(())
    }

    #[test]
    fn propagates_closure_errors() {
        let result: Result<()> = with_jail(|_| Err(jail_error("boom")));
        let err = result.expect_err("closure failed");
        assert!(err.to_string().contains("boom"), "unexpected error {err}");
    }
}
