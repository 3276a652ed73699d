//! `${name}` expansion against the resolver's own layers.

use std::env;

use super::Resolver;
use crate::BindError;

const OPEN: &str = "${";
const ENV_PREFIX: &str = "env:";

/// Expand references in `raw`, the value of `key`.
///
/// Unresolvable references are kept verbatim.
pub(super) fn expand(resolver: &Resolver, key: &str, raw: &str) -> Result<String, BindError> {
    let mut chain = vec![key.to_owned()];
    expand_value(resolver, raw, &mut chain)
}

fn expand_value(resolver: &Resolver, raw: &str, chain: &mut Vec<String>) -> Result<String, BindError> {
    if !raw.contains(OPEN) {
        return Ok(raw.to_owned());
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some((before, tail)) = rest.split_once(OPEN) {
        out.push_str(before);
        let Some((name, after)) = tail.split_once('}') else {
            out.push_str(OPEN);
            out.push_str(tail);
            return Ok(out);
        };
        if let Some(value) = reference(resolver, name, chain)? {
            out.push_str(&value);
        } else {
            out.push_str(OPEN);
            out.push_str(name);
            out.push('}');
        }
        rest = after;
    }
    out.push_str(rest);
    Ok(out)
}

fn reference(
    resolver: &Resolver,
    name: &str,
    chain: &mut Vec<String>,
) -> Result<Option<String>, BindError> {
    if let Some(var) = name.strip_prefix(ENV_PREFIX) {
        if var.is_empty() || var.contains(['=', '\0']) {
            return Ok(None);
        }
        return Ok(env::var(var).ok());
    }
    if chain.iter().any(|seen| seen == name) {
        chain.push(name.to_owned());
        return Err(BindError::InterpolationCycle {
            key: chain.first().cloned().unwrap_or_default(),
            chain: chain.join(" -> "),
        });
    }
    let Some(raw) = resolver.lookup(name) else {
        return Ok(None);
    };
    chain.push(name.to_owned());
    let expanded = expand_value(resolver, &raw, chain)?;
    chain.pop();
    Ok(Some(expanded))
}
