//! Attribute and input parsing for `#[derive(ConfigShape)]`.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr};

mod input;
mod literals;
mod rename;
#[cfg(test)]
mod tests;
mod type_utils;

pub(crate) use input::{ShapeField, ShapeInput, parse_input};
use literals::lit_str;
pub(crate) use rename::RenameAll;
pub(crate) use type_utils::option_inner;

/// Struct-level `#[propstack(...)]` options.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Prepended verbatim to every derived key.
    pub prefix: Option<String>,
    pub rename_all: Option<RenameAll>,
    /// Shape identity reported in errors.
    pub name: Option<String>,
    pub crate_path: Option<syn::Path>,
}

/// Field-level `#[propstack(...)]` options.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub key: Option<LitStr>,
    pub default: Option<LitStr>,
    pub default_null: bool,
    pub aliases: Vec<LitStr>,
}

/// Visit every nested meta of all `#[propstack(...)]` attributes.
fn for_each_meta<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("propstack")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

fn unknown(meta: &ParseNestedMeta, level: &str) -> syn::Error {
    let name = meta
        .path
        .get_ident()
        .map_or_else(|| "<path>".to_owned(), ToString::to_string);
    meta.error(format!("unknown {level} attribute `{name}`"))
}

fn set_once<T>(slot: &mut Option<T>, value: T, meta: &ParseNestedMeta, key: &str) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error(format!("duplicate `{key}` attribute")));
    }
    *slot = Some(value);
    Ok(())
}

pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    for_each_meta(attrs, |meta| {
        if meta.path.is_ident("prefix") {
            let value = lit_str(meta, "prefix")?.value();
            set_once(&mut out.prefix, value, meta, "prefix")
        } else if meta.path.is_ident("rename_all") {
            let rule = RenameAll::parse(&lit_str(meta, "rename_all")?)?;
            set_once(&mut out.rename_all, rule, meta, "rename_all")
        } else if meta.path.is_ident("name") {
            let value = lit_str(meta, "name")?.value();
            set_once(&mut out.name, value, meta, "name")
        } else if meta.path.is_ident("crate") {
            let path = lit_str(meta, "crate")?.parse::<syn::Path>()?;
            set_once(&mut out.crate_path, path, meta, "crate")
        } else {
            Err(unknown(meta, "struct"))
        }
    })?;
    Ok(out)
}

pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for_each_meta(attrs, |meta| {
        if meta.path.is_ident("key") {
            let key = lit_str(meta, "key")?;
            if key.value().is_empty() {
                return Err(syn::Error::new(key.span(), "key must not be empty"));
            }
            set_once(&mut out.key, key, meta, "key")
        } else if meta.path.is_ident("default") {
            if out.default_null {
                return Err(meta.error("`default` and `default_null` are mutually exclusive"));
            }
            let value = lit_str(meta, "default")?;
            set_once(&mut out.default, value, meta, "default")
        } else if meta.path.is_ident("default_null") {
            if out.default.is_some() {
                return Err(meta.error("`default` and `default_null` are mutually exclusive"));
            }
            out.default_null = true;
            Ok(())
        } else if meta.path.is_ident("alias") {
            out.aliases.push(lit_str(meta, "alias")?);
            Ok(())
        } else {
            Err(unknown(meta, "field"))
        }
    })?;
    Ok(out)
}
