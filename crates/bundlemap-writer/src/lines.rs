/*
 * lines.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Line splitting and column measurement.

/// Split text into logical lines.
///
/// `\r\n`, `\r` and `\n` are all line breaks. The result always has one more
/// element than there are breaks, so an empty string is a single empty line
/// and a trailing break yields a trailing empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                lines.push(&text[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            b'\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    lines.push(&text[start..]);
    lines
}

/// Width of a line as a source map column: UTF-16 code units.
pub fn column_width(line: &str) -> usize {
    line.encode_utf16().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_single_line() {
        assert_eq!(split_lines("hello"), vec!["hello"]);
    }

    #[test]
    fn test_split_empty() {
        assert_eq!(split_lines(""), vec![""]);
    }

    #[test]
    fn test_split_all_break_styles() {
        assert_eq!(split_lines("a\r\nb\rc\nd"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_split_trailing_break() {
        assert_eq!(split_lines("a\n"), vec!["a", ""]);
        assert_eq!(split_lines("a\r\n"), vec!["a", ""]);
    }

    #[test]
    fn test_split_consecutive_breaks() {
        // "\n\r" is two breaks, "\r\n" is one
        assert_eq!(split_lines("a\n\rb"), vec!["a", "", "b"]);
        assert_eq!(split_lines("a\r\r\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_column_width() {
        assert_eq!(column_width(""), 0);
        assert_eq!(column_width("abc"), 3);
        // 'é' is one code unit, '😀' is two
        assert_eq!(column_width("café"), 4);
        assert_eq!(column_width("😀x"), 3);
    }
}
