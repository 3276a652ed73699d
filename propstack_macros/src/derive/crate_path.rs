//! Path of the runtime crate used in generated code.
//!
//! `#[propstack(crate = "...")]` replaces the default `propstack` path so
//! the derive works when the dependency is renamed or re-exported.

use proc_macro2::TokenStream;
use quote::quote;

/// Tokens naming the runtime crate in generated code.
///
/// Falls back to `propstack` when the struct carries no
/// `#[propstack(crate = "...")]` attribute. With an override, generated
/// impls and accessor tables go through the given path instead, so a crate
/// that renames the dependency or re-exports it from a facade still derives.
///
/// # Examples
///
/// ```rust,ignore
/// assert_eq!(resolve(None).to_string(), "propstack");
///
/// let path: syn::Path = syn::parse_str("app::deps::propstack").unwrap();
/// assert_eq!(resolve(Some(&path)).to_string(), "app :: deps :: propstack");
/// ```
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { propstack }, |path| quote! { #path })
}

#[cfg(test)]
mod tests {
    //! Unit tests for runtime path resolution with and without overrides.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default(None, "propstack")]
    #[case::renamed(Some("config"), "config")]
    #[case::reexported(Some("app::deps::propstack"), "app :: deps :: propstack")]
    fn resolves_the_runtime_path(#[case] input: Option<&str>, #[case] expected: &str) {
        let parsed = input.map(|s| syn::parse_str::<syn::Path>(s).expect("valid path"));
        assert_eq!(resolve(parsed.as_ref()).to_string(), expected);
    }
}
