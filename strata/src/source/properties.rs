//! Parser for the `.properties` text format.
//!
//! Supports the usual conventions of the format:
//! - `#` and `!` comment lines
//! - `key=value`, `key:value` and `key value` separators, with optional
//!   surrounding whitespace
//! - line continuation with a trailing unescaped backslash
//! - escapes `\t`, `\n`, `\r`, `\f`, `\uXXXX` and escaped separators

use crate::error::{Error, Result};
use crate::value::{PropertyMap, PropertyValue};

/// Parse properties text into an ordered map of resolvable values.
///
/// Later duplicates overwrite earlier ones but keep the first key position.
///
/// # Errors
///
/// Returns [`Error::Parse`] when a line contains a malformed `\u` escape.
///
/// # Examples
///
/// ```
/// use strata::source::properties::parse;
///
/// let map = parse("# comment\nserver.port = 8080\nname: demo\n", "inline").unwrap();
/// assert_eq!(map["server.port"].value(), "8080");
/// assert_eq!(map["name"].value(), "demo");
/// ```
pub fn parse(text: &str, source_name: &str) -> Result<PropertyMap> {
    let mut map = PropertyMap::new();

    for (line_number, logical) in logical_lines(text) {
        let (raw_key, raw_value) = split_key_value(&logical);
        let key = unescape(raw_key, source_name, line_number)?;
        let value = unescape(raw_value, source_name, line_number)?;
        map.insert(key, PropertyValue::new(value));
    }

    Ok(map)
}

/// Joins continuation lines and drops blanks and comments.
///
/// Yields the one-based number of the first physical line of each logical
/// line together with its text, leading whitespace removed.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut current: Option<(usize, String)> = None;

    for (index, physical) in text.lines().enumerate() {
        let trimmed = physical.trim_start();

        let continuing = current.is_some();
        if !continuing && (trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!')) {
            continue;
        }

        let (body, continues) = strip_continuation(trimmed);
        let (number, mut buffer) = current.take().unwrap_or((index + 1, String::new()));
        buffer.push_str(body);

        if continues {
            current = Some((number, buffer));
        } else {
            lines.push((number, buffer));
        }
    }

    if let Some(pending) = current {
        lines.push(pending);
    }
    lines
}

/// Removes a trailing continuation backslash, if the line ends in an odd
/// number of backslashes.
fn strip_continuation(line: &str) -> (&str, bool) {
    let trailing = line.chars().rev().take_while(|&c| c == '\\').count();
    if trailing % 2 == 1 {
        (&line[..line.len() - 1], true)
    } else {
        (line, false)
    }
}

/// Splits a logical line into raw (still escaped) key and value.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (index, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\u{c}' => {
                key_end = index;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches([' ', '\t', '\u{c}']);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches([' ', '\t', '\u{c}']);
    }
    (key, rest)
}

fn unescape(raw: &str, source_name: &str, line: usize) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32)
                    .ok_or_else(|| Error::Parse {
                        source_name: source_name.to_string(),
                        line,
                        message: format!("malformed \\uXXXX escape: \\u{hex}"),
                    })?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}
