//! Tests for derive input parsing.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{DeriveInput, parse_quote};

use super::{RenameAll, ShapeInput, option_inner, parse_input};

fn parse(input: &DeriveInput) -> Result<ShapeInput> {
    parse_input(input).map_err(|err| anyhow!(err.to_string()))
}

fn field_keys(shape: &ShapeInput) -> Vec<Vec<String>> {
    shape.fields.iter().map(|f| f.keys.clone()).collect()
}

#[rstest]
fn derives_keys_from_field_names() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Settings {
            conf1: String,
            r#type: String,
        }
    };
    let shape = parse(&input)?;
    ensure!(
        field_keys(&shape) == vec![vec!["conf1".to_owned()], vec!["type".to_owned()]],
        "unexpected keys {:?}",
        field_keys(&shape)
    );
    ensure!(shape.name() == "Settings", "unexpected name {}", shape.name());
    Ok(())
}

#[rstest]
fn applies_prefix_and_rename_but_not_to_explicit_keys() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[propstack(prefix = "app.", rename_all = "kebab-case", name = "App")]
        struct AppConfig {
            http_port: u16,
            #[propstack(key = "legacy_key", alias = "older.key", alias = "oldest")]
            other_value: String,
        }
    };
    let shape = parse(&input)?;
    ensure!(
        field_keys(&shape)
            == vec![
                vec!["app.http-port".to_owned()],
                vec!["legacy_key".to_owned(), "older.key".to_owned(), "oldest".to_owned()],
            ],
        "unexpected keys {:?}",
        field_keys(&shape)
    );
    ensure!(shape.name() == "App", "name attribute ignored");
    Ok(())
}

#[rstest]
fn option_fields_allow_null_unless_defaulted() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Settings {
            conf2: Option<String>,
            #[propstack(default = "x")]
            conf3: Option<String>,
            #[propstack(default_null)]
            conf4: Custom,
            conf5: String,
        }
    };
    let shape = parse(&input)?;
    let nulls: Vec<bool> = shape.fields.iter().map(|f| f.allow_null).collect();
    ensure!(nulls == vec![true, false, true, false], "unexpected {nulls:?}");
    let defaults: Vec<Option<&str>> = shape.fields.iter().map(|f| f.default.as_deref()).collect();
    ensure!(defaults == vec![None, Some("x"), None, None], "unexpected {defaults:?}");
    Ok(())
}

#[rstest]
#[case::default_then_null(parse_quote! {
    struct S { #[propstack(default = "1", default_null)] a: Option<u8> }
}, "mutually exclusive")]
#[case::null_then_default(parse_quote! {
    struct S { #[propstack(default_null)] #[propstack(default = "1")] a: Option<u8> }
}, "mutually exclusive")]
#[case::duplicate_key(parse_quote! {
    struct S { #[propstack(key = "a", key = "b")] a: u8 }
}, "duplicate `key`")]
#[case::empty_key(parse_quote! {
    struct S { #[propstack(key = "")] a: u8 }
}, "must not be empty")]
#[case::non_string_default(parse_quote! {
    struct S { #[propstack(default = 5)] a: u8 }
}, "default must be a string")]
#[case::unknown_field_attr(parse_quote! {
    struct S { #[propstack(skip)] a: u8 }
}, "unknown field attribute `skip`")]
#[case::unknown_struct_attr(parse_quote! {
    #[propstack(flatten)]
    struct S { a: u8 }
}, "unknown struct attribute `flatten`")]
#[case::bad_rename(parse_quote! {
    #[propstack(rename_all = "Title Case")]
    struct S { a: u8 }
}, "unsupported rename_all value")]
#[case::generic(parse_quote! {
    struct S<T> { a: T }
}, "generic structs")]
#[case::tuple(parse_quote! {
    struct S(u8);
}, "requires named fields")]
#[case::enumeration(parse_quote! {
    enum S { A }
}, "only be derived for structs")]
fn rejects_invalid_input(#[case] input: DeriveInput, #[case] message: &str) -> Result<()> {
    let Err(err) = parse_input(&input) else {
        return Err(anyhow!("input should be rejected"));
    };
    ensure!(
        err.to_string().contains(message),
        "expected {message:?} in {err}"
    );
    Ok(())
}

#[rstest]
#[case::lower(RenameAll::Lower, "http_port", "http_port")]
#[case::upper(RenameAll::Upper, "http_port", "HTTP_PORT")]
#[case::pascal(RenameAll::Pascal, "http_port", "HttpPort")]
#[case::camel(RenameAll::Camel, "http_port", "httpPort")]
#[case::snake(RenameAll::Snake, "http_port", "http_port")]
#[case::screaming_snake(RenameAll::ScreamingSnake, "http_port", "HTTP_PORT")]
#[case::kebab(RenameAll::Kebab, "http_port", "http-port")]
#[case::screaming_kebab(RenameAll::ScreamingKebab, "http_port", "HTTP-PORT")]
fn renames_field_names(#[case] rule: RenameAll, #[case] field: &str, #[case] expected: &str) {
    assert_eq!(rule.apply(field), expected);
}

#[rstest]
#[case::plain(parse_quote!(Option<String>), true)]
#[case::qualified(parse_quote!(std::option::Option<u8>), true)]
#[case::not_option(parse_quote!(Vec<String>), false)]
#[case::bare(parse_quote!(String), false)]
fn recognises_option_types(#[case] ty: syn::Type, #[case] expected: bool) {
    assert_eq!(option_inner(&ty).is_some(), expected);
}
