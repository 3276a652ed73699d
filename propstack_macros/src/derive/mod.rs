//! Expansion of `#[derive(ConfigShape)]`.

use proc_macro2::TokenStream;
use syn::DeriveInput;

mod crate_path;
mod generate;
mod parse;

/// Parse `input` and generate its `ConfigShape` implementation.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let shape = parse::parse_input(input)?;
    let crate_path = crate_path::resolve(shape.attrs.crate_path.as_ref());
    Ok(generate::config_shape_impl(&shape, &crate_path))
}
