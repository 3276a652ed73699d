//! Parser for `.properties` text.
//!
//! Follows the conventional line format: `#`/`!` comments, `=`, `:` or
//! whitespace separators, backslash continuations and escapes including
//! `\uXXXX`. Values are never split on list delimiters.

use std::iter::Peekable;
use std::str::Chars;

use crate::LoadCause;

/// Parse `text` into entries in document order.
///
/// Repeated keys are all returned; callers decide which definition wins.
pub(crate) fn parse(text: &str) -> Result<Vec<(String, String)>, LoadCause> {
    let body = text.strip_prefix('\u{feff}').unwrap_or(text);
    let normalised = body.replace("\r\n", "\n");
    let mut entries = Vec::new();
    for (line, logical) in logical_lines(&normalised) {
        entries.push(split_entry(&logical, line)?);
    }
    Ok(entries)
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

/// Joins continued physical lines, skipping blanks and comments.
///
/// Each item carries the one-based number of its first physical line.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut pending: Option<(usize, String)> = None;
    for (idx, physical) in text.split(['\n', '\r']).enumerate() {
        let trimmed = physical.trim_start_matches(is_blank);
        let (start, mut buffer) = match pending.take() {
            Some(open) => open,
            None => {
                if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
                    continue;
                }
                (idx + 1, String::new())
            }
        };
        if continues(trimmed) {
            buffer.push_str(trimmed.strip_suffix('\\').unwrap_or(trimmed));
            pending = Some((start, buffer));
        } else {
            buffer.push_str(trimmed);
            out.push((start, buffer));
        }
    }
    if let Some(open) = pending {
        out.push(open);
    }
    out
}

/// A line continues when it ends with an odd number of backslashes.
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_entry(logical: &str, line: usize) -> Result<(String, String), LoadCause> {
    let mut chars = logical.chars().peekable();
    let mut key = String::new();
    let mut separated = false;
    while let Some(c) = chars.next() {
        match c {
            '\\' => unescape(&mut chars, &mut key, line)?,
            '=' | ':' => {
                separated = true;
                break;
            }
            blank if is_blank(blank) => break,
            other => key.push(other),
        }
    }
    skip_blanks(&mut chars);
    if !separated && chars.next_if(|c| matches!(c, '=' | ':')).is_some() {
        skip_blanks(&mut chars);
    }
    let mut value = String::new();
    while let Some(c) = chars.next() {
        if c == '\\' {
            unescape(&mut chars, &mut value, line)?;
        } else {
            value.push(c);
        }
    }
    Ok((key, value))
}

fn skip_blanks(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| is_blank(*c)).is_some() {}
}

fn unescape(chars: &mut Peekable<Chars<'_>>, out: &mut String, line: usize) -> Result<(), LoadCause> {
    let Some(c) = chars.next() else {
        return Ok(());
    };
    match c {
        't' => out.push('\t'),
        'n' => out.push('\n'),
        'r' => out.push('\r'),
        'f' => out.push('\u{c}'),
        'u' => out.push(unicode_escape(chars, line)?),
        other => out.push(other),
    }
    Ok(())
}

fn unicode_escape(chars: &mut Peekable<Chars<'_>>, line: usize) -> Result<char, LoadCause> {
    let unit = hex_unit(chars, line)?;
    if (0xD800..0xDC00).contains(&unit) {
        let low_follows = chars.next() == Some('\\') && chars.next() == Some('u');
        if !low_follows {
            return Err(LoadCause::parse(line, "unpaired surrogate in \\u escape"));
        }
        let low = hex_unit(chars, line)?;
        return char::decode_utf16([unit, low])
            .next()
            .and_then(Result::ok)
            .ok_or_else(|| LoadCause::parse(line, "invalid surrogate pair in \\u escape"));
    }
    char::from_u32(u32::from(unit))
        .ok_or_else(|| LoadCause::parse(line, "unpaired surrogate in \\u escape"))
}

fn hex_unit(chars: &mut Peekable<Chars<'_>>, line: usize) -> Result<u16, LoadCause> {
    let mut unit: u16 = 0;
    for _ in 0..4 {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| LoadCause::parse(line, "malformed \\uXXXX escape"))?;
        unit = unit * 16 + u16::try_from(digit).unwrap_or_default();
    }
    Ok(unit)
}
