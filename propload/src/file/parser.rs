//! Parser for the flat `.properties` text format.
//!
//! Handles `#`/`!` comments, `=`/`:`/whitespace separators, backslash line
//! continuation and the usual escape sequences (including `\uXXXX`). Keys
//! declared more than once keep their first position and their last value.

use std::char::REPLACEMENT_CHARACTER;

use crate::PropertyMap;

/// A malformed line in properties text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// One-based natural line number where the offending logical line starts.
    pub line: usize,
    /// Human-readable explanation.
    pub message: String,
}

/// Whitespace recognised between tokens of a properties line.
const fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

/// Parse properties text into an ordered map of decoded keys and values.
///
/// # Examples
///
/// ```
/// use propload::parse_properties;
///
/// let map = parse_properties("# comment\nhost = example.org\nport: 8080\n").unwrap();
/// assert_eq!(map.get("host"), Some("example.org"));
/// assert_eq!(map.get("port"), Some("8080"));
/// ```
///
/// # Errors
///
/// Returns a [`SyntaxError`] when an escape sequence is malformed.
pub fn parse_properties(text: &str) -> Result<PropertyMap, SyntaxError> {
    let mut map = PropertyMap::new();
    for (line, logical) in logical_lines(text) {
        let (raw_key, raw_value) = split_key_value(&logical);
        let key = decode_escapes(&raw_key).map_err(|message| SyntaxError { line, message })?;
        let value = decode_escapes(raw_value).map_err(|message| SyntaxError { line, message })?;
        map.insert(key, value);
    }
    Ok(map)
}

fn natural_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\n' => lines.push(std::mem::take(&mut current)),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                lines.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Strip a continuation backslash, reporting whether the line continues.
///
/// Only an odd run of trailing backslashes continues; an even run is a
/// sequence of escaped backslashes.
fn split_continuation(line: &str) -> (&str, bool) {
    let continues = line
        .chars()
        .rev()
        .take_while(|&c| c == '\\')
        .fold(false, |odd, _| !odd);
    if continues {
        (line.strip_suffix('\\').unwrap_or(line), true)
    } else {
        (line, false)
    }
}

/// Join natural lines into logical lines, dropping blanks and comments.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut logical = Vec::new();
    let mut pending: Option<(usize, String)> = None;
    for (index, natural) in natural_lines(text).iter().enumerate() {
        let stripped = natural.trim_start_matches(is_blank);
        let (start, mut buffer) = match pending.take() {
            Some(open) => open,
            None => {
                if stripped.is_empty() || stripped.starts_with(['#', '!']) {
                    continue;
                }
                (index + 1, String::new())
            }
        };
        let (body, continues) = split_continuation(stripped);
        buffer.push_str(body);
        if continues {
            pending = Some((start, buffer));
        } else {
            logical.push((start, buffer));
        }
    }
    logical.extend(pending);
    logical
}

/// Split a logical line into its still-escaped key and value.
fn split_key_value(line: &str) -> (String, &str) {
    let mut key = String::new();
    let mut chars = line.chars();
    let mut explicit_separator = false;
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                key.push(c);
                if let Some(escaped) = chars.next() {
                    key.push(escaped);
                }
            }
            '=' | ':' => {
                explicit_separator = true;
                break;
            }
            _ if is_blank(c) => break,
            _ => key.push(c),
        }
    }
    let mut value = chars.as_str().trim_start_matches(is_blank);
    if !explicit_separator
        && let Some(rest) = value.strip_prefix(['=', ':'])
    {
        value = rest.trim_start_matches(is_blank);
    }
    (key, value)
}

/// Decode backslash escapes in a key or value.
fn decode_escapes(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut units: Vec<u16> = Vec::new();
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('u') => {
                    units.push(read_unicode_escape(&mut chars)?);
                    continue;
                }
                Some(escaped) => {
                    flush_units(&mut units, &mut out);
                    out.push(match escaped {
                        't' => '\t',
                        'n' => '\n',
                        'r' => '\r',
                        'f' => '\u{c}',
                        other => other,
                    });
                }
                None => flush_units(&mut units, &mut out),
            }
        } else {
            flush_units(&mut units, &mut out);
            out.push(c);
        }
    }
    flush_units(&mut units, &mut out);
    Ok(out)
}

fn read_unicode_escape(chars: &mut std::str::Chars<'_>) -> Result<u16, String> {
    let mut unit: u16 = 0;
    for _ in 0..4 {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .and_then(|d| u16::try_from(d).ok())
            .ok_or_else(|| String::from("malformed \\uxxxx encoding"))?;
        unit = (unit << 4) | digit;
    }
    Ok(unit)
}

/// Emit buffered UTF-16 code units, replacing unpaired surrogates.
fn flush_units(units: &mut Vec<u16>, out: &mut String) {
    if units.is_empty() {
        return;
    }
    out.extend(
        char::decode_utf16(units.drain(..)).map(|unit| unit.unwrap_or(REPLACEMENT_CHARACTER)),
    );
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests panic to surface unexpected failures")]
mod tests {
    use super::{parse_properties, split_continuation};
    use rstest::rstest;

    fn pairs(text: &str) -> Vec<(String, String)> {
        parse_properties(text)
            .expect("properties should parse")
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }

    #[rstest]
    #[case::equals("x=1", "x", "1")]
    #[case::colon("x:1", "x", "1")]
    #[case::whitespace("x 1", "x", "1")]
    #[case::padded_equals("  x  =  1", "x", "1")]
    #[case::whitespace_then_colon("x   :   1", "x", "1")]
    #[case::empty_value("x=", "x", "")]
    #[case::key_only("x", "x", "")]
    #[case::trailing_space_kept("x=1  ", "x", "1  ")]
    #[case::second_separator_is_value("x==1", "x", "=1")]
    #[case::escaped_separator_in_key("a\\=b=c", "a=b", "c")]
    #[case::escaped_space_in_key("a\\ b=c", "a b", "c")]
    #[case::tab_escape("x=a\\tb", "x", "a\tb")]
    #[case::unicode_escape("x=\\u0041\\u00e9", "x", "Aé")]
    #[case::surrogate_pair("x=\\uD83D\\uDE00", "x", "😀")]
    #[case::placeholder_kept_raw("x=${sys.y:default}", "x", "${sys.y:default}")]
    fn parses_single_lines(#[case] text: &str, #[case] key: &str, #[case] value: &str) {
        assert_eq!(pairs(text), vec![(key.to_owned(), value.to_owned())]);
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let text = "# hash comment\n! bang comment\n\n   \n   # indented\nx=1\n";
        assert_eq!(pairs(text), vec![("x".to_owned(), "1".to_owned())]);
    }

    #[test]
    fn joins_continuation_lines() {
        let text = "list = a, \\\n       b, \\\n       c\nnext=2";
        assert_eq!(
            pairs(text),
            vec![
                ("list".to_owned(), "a, b, c".to_owned()),
                ("next".to_owned(), "2".to_owned()),
            ]
        );
    }

    #[test]
    fn continuation_may_start_with_comment_marker() {
        let text = "x=a\\\n#b";
        assert_eq!(pairs(text), vec![("x".to_owned(), "a#b".to_owned())]);
    }

    #[test]
    fn comment_lines_do_not_continue() {
        let text = "# note \\\nx=1";
        assert_eq!(pairs(text), vec![("x".to_owned(), "1".to_owned())]);
    }

    #[test]
    fn accepts_all_line_terminators() {
        let text = "a=1\r\nb=2\rc=3\n";
        let keys: Vec<_> = pairs(text).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn duplicate_keys_keep_first_position_and_last_value() {
        let text = "x=1\ny=2\nx=3\n";
        assert_eq!(
            pairs(text),
            vec![
                ("x".to_owned(), "3".to_owned()),
                ("y".to_owned(), "2".to_owned()),
            ]
        );
    }

    #[test]
    fn reports_malformed_unicode_escape_with_line() {
        let err = parse_properties("ok=1\n\nbad=\\u12G4\n").expect_err("malformed escape");
        assert_eq!(err.line, 3);
        assert!(err.message.contains("\\uxxxx"));
    }

    #[rstest]
    #[case("a\\", ("a", true))]
    #[case("a\\\\", ("a\\\\", false))]
    #[case("a\\\\\\", ("a\\\\", true))]
    #[case("a", ("a", false))]
    fn continuation_needs_odd_backslashes(#[case] line: &str, #[case] expected: (&str, bool)) {
        assert_eq!(split_continuation(line), expected);
    }
}
