//! Parser for Java-style `.properties` text.
//!
//! Supports `key=value`, `key: value` and `key value` entries, `#` and `!`
//! comment lines, trailing-backslash continuations and the usual escapes
//! (`\t`, `\n`, `\r`, `\f`, `\uXXXX` and escaped separators).

use std::collections::BTreeMap;

use super::Format;
use crate::error::{LoadError, LoadResult};
use crate::value::Value;

/// Parses `data` into flat dotted keys.
pub(super) fn parse(data: &str) -> LoadResult<BTreeMap<String, Value>> {
    let mut entries = BTreeMap::new();
    for (number, line) in logical_lines(data) {
        let (raw_key, raw_value) = split_entry(&line);
        let key = unescape(raw_key).map_err(|msg| syntax_error(number, &msg))?;
        let value = unescape(raw_value).map_err(|msg| syntax_error(number, &msg))?;
        entries.insert(key, Value::Scalar(value));
    }
    Ok(entries)
}

fn syntax_error(line: usize, message: &str) -> LoadError {
    LoadError::format(Format::Properties.name(), format!("line {line}: {message}"))
}

/// Joins continuation lines and drops blanks and comments.
///
/// Each logical line is paired with the 1-based number of its first line.
fn logical_lines(data: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;
    for (index, raw) in data.lines().enumerate() {
        let trimmed = raw.trim_start();
        let (start, mut text) = match pending.take() {
            Some((start, text)) => (start, text),
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                (index + 1, String::new())
            }
        };
        if continues(trimmed) {
            text.push_str(trimmed.strip_suffix('\\').unwrap_or(trimmed));
            pending = Some((start, text));
        } else {
            text.push_str(trimmed);
            lines.push((start, text));
        }
    }
    if let Some(last) = pending {
        lines.push(last);
    }
    lines
}

/// A line continues when it ends in an odd number of backslashes.
fn continues(line: &str) -> bool {
    !line.chars().rev().take_while(|&c| c == '\\').count().is_multiple_of(2)
}

/// Splits a logical line at the first unescaped `=`, `:` or whitespace.
///
/// Whitespace after the key may be followed by one `=` or `:`.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let separator = line.char_indices().find_map(|(index, c)| {
        if escaped {
            escaped = false;
            return None;
        }
        escaped = c == '\\';
        (c == '=' || c == ':' || c.is_whitespace()).then_some(index)
    });
    let Some(index) = separator else {
        return (line, "");
    };
    let (key, tail) = line.split_at(index);
    let rest = tail.trim_start();
    (key, rest.strip_prefix(['=', ':']).unwrap_or(rest).trim())
}

fn unescape(text: &str) -> Result<String, String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
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
                let code = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32)
                    .ok_or_else(|| format!("invalid unicode escape '\\u{hex}'"))?;
                out.push(code);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{parse, split_entry};
    use crate::value::Value;

    #[rstest]
    #[case("key=value", ("key", "value"))]
    #[case("key = value", ("key", "value"))]
    #[case("key: value", ("key", "value"))]
    #[case("key value", ("key", "value"))]
    #[case("key   =   spaced out  ", ("key", "spaced out"))]
    #[case("key", ("key", ""))]
    #[case(r"a\=b=c", (r"a\=b", "c"))]
    fn splits_entries(#[case] line: &str, #[case] expected: (&str, &str)) {
        assert_eq!(split_entry(line), expected);
    }

    #[test]
    fn skips_comments_and_joins_continuations() {
        let text = "# header\n! legacy\n\nlist = a,\\\n    b,\\\n    c\nname=x\n";
        let entries = parse(text).expect("valid properties");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.get("list"), Some(&Value::from("a,b,c")));
        assert_eq!(entries.get("name"), Some(&Value::from("x")));
    }

    #[test]
    fn decodes_escapes() {
        let entries = parse(r"greeting = café\tbar").expect("valid escape");
        assert_eq!(entries.get("greeting"), Some(&Value::from("café\tbar")));
    }

    #[test]
    fn rejects_truncated_unicode_escape() {
        let err = parse("bad = \\u12").expect_err("truncated escape");
        assert!(err.to_string().contains("line 1"), "{err}");
    }
}
