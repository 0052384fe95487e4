//! The `key = "value"` property grammar.
//!
//! Values may be quoted or bare, may escape any character with `\`, and a
//! quoted value may run over several physical lines: when the closing quote
//! has not been seen by the end of the buffered text, the next line is pulled
//! from the cursor and appended with no separator.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::Result;
use crate::types::PropertyList;

use super::cursor::{indent_of, Cursor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    SkippingLeadingSpace,
    ReadingKey,
    ExpectingEquals,
    ReadingValueUnquoted,
    ReadingValueQuoted,
}

/// Character scanner over one logical line of properties.
///
/// Offsets are absolute character positions within the buffer, which grows
/// as continuation lines are pulled in.
#[derive(Debug)]
pub struct PropScanner {
    buffer: Vec<char>,
    pos: usize,
}

impl PropScanner {
    /// Start scanning `line` at character offset `start`.
    pub fn new(line: &str, start: usize) -> Self {
        Self {
            buffer: line.chars().collect(),
            pos: start,
        }
    }

    /// Character offset the next property would start at.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Read the next property.
    ///
    /// Returns `Ok(None)` without moving if the text at the current offset is
    /// not a property. Only quoted values pull further lines, and they do so
    /// after the key has matched, so a non-match never consumes a line.
    pub fn next_property(&mut self, cursor: &mut Cursor<'_>) -> Result<Option<(String, String)>> {
        let mut pos = self.pos;
        let mut state = ScanState::SkippingLeadingSpace;
        let mut escaping = false;
        let mut key = String::new();
        let mut value = String::new();

        loop {
            let c = self.buffer.get(pos).copied();

            match state {
                ScanState::SkippingLeadingSpace => match c {
                    None => return Ok(None),
                    Some(' ') => pos += 1,
                    Some(_) => state = ScanState::ReadingKey,
                },
                ScanState::ReadingKey => match c {
                    None => return Ok(None),
                    Some(' ') => {
                        pos += 1;
                        state = ScanState::ExpectingEquals;
                    }
                    Some(ch) => {
                        key.push(ch);
                        pos += 1;
                    }
                },
                ScanState::ExpectingEquals => {
                    if self.buffer.get(pos) != Some(&'=') || self.buffer.get(pos + 1) != Some(&' ') {
                        return Ok(None);
                    }
                    pos += 2;
                    if self.buffer.get(pos) == Some(&'"') {
                        pos += 1;
                        state = ScanState::ReadingValueQuoted;
                    } else {
                        state = ScanState::ReadingValueUnquoted;
                    }
                }
                ScanState::ReadingValueUnquoted => {
                    pos += 1;
                    match c {
                        None => break,
                        Some(ch) if escaping => {
                            escaping = false;
                            value.push(ch);
                        }
                        Some('\\') => escaping = true,
                        Some(' ') => break,
                        Some(ch) => value.push(ch),
                    }
                }
                ScanState::ReadingValueQuoted => match c {
                    None => {
                        let line = cursor.take("quoted property value")?;
                        self.buffer.extend(line.chars());
                    }
                    Some(ch) => {
                        pos += 1;
                        if escaping {
                            escaping = false;
                            value.push(ch);
                        } else if ch == '\\' {
                            escaping = true;
                        } else if ch == '"' {
                            break;
                        } else {
                            value.push(ch);
                        }
                    }
                },
            }
        }

        self.pos = pos.min(self.buffer.len());
        Ok(Some((key, value)))
    }
}

/// Read space-separated properties from `line`, starting at character `start`.
///
/// Used for the inline property lists that follow an encoding in `Format`.
pub fn read_inline_proplist(cursor: &mut Cursor<'_>, line: &str, start: usize) -> Result<PropertyList> {
    let mut scanner = PropScanner::new(line, start);
    let mut properties = PropertyList::new();

    while let Some((key, value)) = scanner.next_property(cursor)? {
        properties.insert(key, value);
    }

    Ok(properties)
}

static PROPERTY_LINE_RE: OnceLock<Regex> = OnceLock::new();
fn property_line_re() -> &'static Regex {
    PROPERTY_LINE_RE.get_or_init(|| Regex::new(r#"^\t*[^ \t]+ = ""#).expect("valid pattern"))
}

/// Read a block of one-per-line `key = "value"` properties at `indent`.
///
/// Stops, without consuming, at the first line that is not a quoted property
/// at exactly that indentation.
pub fn read_properties(cursor: &mut Cursor<'_>, indent: usize) -> Result<PropertyList> {
    let mut properties = PropertyList::new();

    while let Some(line) = cursor.peek() {
        if indent_of(line) != indent || !property_line_re().is_match(line) {
            break;
        }
        cursor.take("property")?;

        let mut scanner = PropScanner::new(line, indent);
        match scanner.next_property(cursor)? {
            Some((key, value)) => {
                properties.insert(key, value);
            }
            None => break,
        }
    }

    Ok(properties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PulseError;

    #[test]
    fn test_escaped_space() {
        let mut cursor = Cursor::new("");
        let mut scanner = PropScanner::new(r#"device.description = "My\ Device""#, 0);

        let (key, value) = scanner.next_property(&mut cursor).unwrap().unwrap();

        assert_eq!(key, "device.description");
        assert_eq!(value, "My Device");
    }

    #[test]
    fn test_escaped_quote_inside_quoted_value() {
        let mut cursor = Cursor::new("");
        let mut scanner = PropScanner::new(r#"format.sample_format = "\"s16le\"""#, 0);

        let (_, value) = scanner.next_property(&mut cursor).unwrap().unwrap();

        assert_eq!(value, "\"s16le\"");
    }

    #[test]
    fn test_unquoted_values_end_at_space() {
        let mut cursor = Cursor::new("");
        let properties = read_inline_proplist(&mut cursor, "rate = 44100 channels = 2", 0).unwrap();

        assert_eq!(properties.get("rate").map(String::as_str), Some("44100"));
        assert_eq!(properties.get("channels").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_quoted_value_continues_on_next_line() {
        let mut cursor = Cursor::new("second half\"\n\tnext = \"x\"");
        let mut scanner = PropScanner::new("media.name = \"first half ", 0);

        let (key, value) = scanner.next_property(&mut cursor).unwrap().unwrap();

        assert_eq!(key, "media.name");
        assert_eq!(value, "first half second half");
        assert_eq!(cursor.peek(), Some("\tnext = \"x\""));
    }

    #[test]
    fn test_offset_is_absolute_across_continuation() {
        let mut cursor = Cursor::new("b\" c = \"d\"");
        let properties = read_inline_proplist(&mut cursor, "a = \"", 0).unwrap();

        assert_eq!(properties.get("a").map(String::as_str), Some("b"));
        assert_eq!(properties.get("c").map(String::as_str), Some("d"));
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_unterminated_quote_fails() {
        let mut cursor = Cursor::new("");
        cursor.next_line();
        let mut scanner = PropScanner::new("media.name = \"never closed", 0);

        let err = scanner.next_property(&mut cursor).unwrap_err();

        assert!(matches!(err, PulseError::UnexpectedEndOfInput { .. }));
    }

    #[test]
    fn test_non_property_does_not_move() {
        let mut cursor = Cursor::new("");
        let mut scanner = PropScanner::new("  Corked: no", 0);

        assert!(scanner.next_property(&mut cursor).unwrap().is_none());
        assert_eq!(scanner.offset(), 0);
    }

    #[test]
    fn test_read_properties_block() {
        let text = "\t\talsa.card = \"0\"\n\t\tdevice.description = \"Built-in Audio\"\n\tFormats:";
        let mut cursor = Cursor::new(text);

        let properties = read_properties(&mut cursor, 2).unwrap();

        assert_eq!(properties.len(), 2);
        assert_eq!(properties["device.description"], "Built-in Audio");
        assert_eq!(cursor.peek(), Some("\tFormats:"));
    }

    #[test]
    fn test_read_properties_stops_at_other_indent() {
        let mut cursor = Cursor::new("\t\t\tdeeper = \"x\"");

        let properties = read_properties(&mut cursor, 2).unwrap();

        assert!(properties.is_empty());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_duplicate_key_last_wins_in_first_position() {
        let text = "\ta = \"1\"\n\tb = \"2\"\n\ta = \"3\"";
        let mut cursor = Cursor::new(text);

        let properties = read_properties(&mut cursor, 1).unwrap();
        let keys: Vec<&str> = properties.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(properties["a"], "3");
    }

    #[test]
    fn test_multiline_property_in_block() {
        let text = "\t\tapplication.name = \"line one\nline two\"\n\t\tnext = \"x\"";
        let mut cursor = Cursor::new(text);

        let properties = read_properties(&mut cursor, 2).unwrap();

        assert_eq!(properties["application.name"], "line oneline two");
        assert_eq!(properties["next"], "x");
    }
}
