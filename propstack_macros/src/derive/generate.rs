//! Token generation for the `ConfigShape` implementation.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{ShapeField, ShapeInput};

/// Accessor constructor expression for one field.
fn accessor(field: &ShapeField, krate: &TokenStream) -> TokenStream {
    let ty = &field.ty;
    let keys = &field.keys;
    let mut tokens = quote! { #krate::Accessor::<#ty>::new(&[#(#keys),*]) };
    if let Some(default) = &field.default {
        tokens = quote! { #tokens.with_default(#default) };
    } else if field.allow_null {
        tokens = quote! { #tokens.allow_null() };
    }
    tokens
}

pub(crate) fn config_shape_impl(shape: &ShapeInput, krate: &TokenStream) -> TokenStream {
    let ident = &shape.ident;
    let name = shape.name();
    let accessors: Vec<TokenStream> = shape.fields.iter().map(|f| accessor(f, krate)).collect();
    let field_idents = shape.fields.iter().map(|f| &f.ident);

    quote! {
        impl #krate::ConfigShape for #ident {
            const NAME: &'static str = #name;

            fn accessors() -> &'static [#krate::AccessorInfo] {
                const ACCESSORS: &[#krate::AccessorInfo] = &[#(#accessors.info()),*];
                ACCESSORS
            }

            fn bind(
                binder: &#krate::Binder<'_>,
            ) -> ::core::result::Result<Self, #krate::BindError> {
                ::core::result::Result::Ok(Self {
                    #(#field_idents: binder.bind(&#accessors)?,)*
                })
            }
        }
    }
}
