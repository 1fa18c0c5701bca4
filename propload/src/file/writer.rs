//! Serialisation of properties back into `.properties` text.

use std::io::{self, Write};

use crate::PropertyMap;

fn escape_into(out: &mut String, text: &str, is_key: bool) {
    for (position, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{c}' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            ' ' if is_key || position == 0 => out.push_str("\\ "),
            _ => out.push(c),
        }
    }
}

/// Format one `key=value` line with separators, comment markers and
/// significant whitespace escaped so it reads back unchanged.
///
/// # Examples
///
/// ```
/// use propload::format_property_line;
///
/// assert_eq!(format_property_line("a key", " v=1"), "a\\ key=\\ v\\=1");
/// ```
#[must_use]
pub fn format_property_line(key: &str, value: &str) -> String {
    let mut line = String::with_capacity(key.len() + value.len() + 1);
    escape_into(&mut line, key, true);
    line.push('=');
    escape_into(&mut line, value, false);
    line
}

/// Write every entry of `map` as properties text, one line per key.
///
/// # Errors
///
/// Returns any [`io::Error`] raised by `out`.
pub fn write_properties<W: Write>(map: &PropertyMap, out: &mut W) -> io::Result<()> {
    for (key, value) in map.iter() {
        writeln!(out, "{}", format_property_line(key, value))?;
    }
    Ok(())
}
