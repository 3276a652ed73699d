//! Collects the struct and field metadata the generator needs.

use syn::{Data, DeriveInput, Fields};

use super::{FieldAttrs, StructAttrs, option_inner, parse_field_attrs, parse_struct_attrs};

pub(crate) struct ShapeInput {
    pub ident: syn::Ident,
    pub attrs: StructAttrs,
    pub fields: Vec<ShapeField>,
}

pub(crate) struct ShapeField {
    pub ident: syn::Ident,
    pub ty: syn::Type,
    /// Primary key followed by aliases.
    pub keys: Vec<String>,
    pub default: Option<String>,
    pub allow_null: bool,
}

impl ShapeInput {
    /// Shape identity used in error messages.
    pub(crate) fn name(&self) -> String {
        self.attrs
            .name
            .clone()
            .unwrap_or_else(|| self.ident.to_string())
    }
}

/// Validate `input` and resolve every field's keys and fallbacks.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ShapeInput> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "ConfigShape cannot be derived for generic structs",
        ));
    }
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "ConfigShape can only be derived for structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            data.struct_token,
            "ConfigShape requires named fields",
        ));
    };

    let attrs = parse_struct_attrs(&input.attrs)?;
    let mut fields = Vec::with_capacity(named.named.len());
    for field in &named.named {
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "unnamed fields are not supported"));
        };
        let field_attrs = parse_field_attrs(&field.attrs)?;
        fields.push(resolve_field(ident, field.ty.clone(), field_attrs, &attrs));
    }
    Ok(ShapeInput {
        ident: input.ident.clone(),
        attrs,
        fields,
    })
}

fn resolve_field(
    ident: syn::Ident,
    ty: syn::Type,
    field_attrs: FieldAttrs,
    attrs: &StructAttrs,
) -> ShapeField {
    let primary = field_attrs.key.map_or_else(
        || {
            let raw = ident.to_string();
            let name = raw.strip_prefix("r#").unwrap_or(&raw);
            let renamed = attrs
                .rename_all
                .map_or_else(|| name.to_owned(), |rule| rule.apply(name));
            format!("{}{renamed}", attrs.prefix.as_deref().unwrap_or_default())
        },
        |key| key.value(),
    );
    let mut keys = vec![primary];
    keys.extend(field_attrs.aliases.iter().map(syn::LitStr::value));

    let default = field_attrs.default.map(|lit| lit.value());
    let allow_null = default.is_none() && (field_attrs.default_null || option_inner(&ty).is_some());
    ShapeField {
        ident,
        ty,
        keys,
        default,
        allow_null,
    }
}
