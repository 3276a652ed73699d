//! Procedural macros for `propstack`.
//!
//! `#[derive(ConfigShape)]` turns a struct with named fields into a
//! configuration shape: every field becomes a typed accessor whose key is
//! derived from the field name (optionally prefixed and renamed) or given
//! explicitly.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `propstack::ConfigShape`.
///
/// Field attributes, inside `#[propstack(...)]`:
/// - `key = "..."` sets the lookup key; the struct prefix is not applied.
/// - `default = "..."` supplies the value used when no layer defines the
///   key. It is coerced like any other value.
/// - `default_null` binds the type's null representation when absent.
///   `Option<T>` fields allow null implicitly.
/// - `alias = "..."` adds a fallback key; may be repeated.
///
/// Struct attributes: `prefix`, `rename_all`, `name` and `crate`.
#[proc_macro_derive(ConfigShape, attributes(propstack))]
pub fn derive_config_shape(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
