//! Monotonic line cursor over a listing.

use crate::error::{PulseError, Result};

/// Owns the position within the document's lines.
///
/// Lines are only ever handed out once; readers that cannot match the line
/// at the current position must `peek` rather than consume it.
#[derive(Debug)]
pub struct Cursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.split('\n').collect(),
            pos: 0,
        }
    }

    /// The next line, without consuming it.
    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    /// Consume the next line if there is one.
    pub fn next_line(&mut self) -> Option<&'a str> {
        let line = self.peek()?;
        self.pos += 1;
        Some(line)
    }

    /// Consume the next line; `context` names the construct that needed it.
    pub fn take(&mut self, context: &'static str) -> Result<&'a str> {
        self.next_line()
            .ok_or(PulseError::UnexpectedEndOfInput { context })
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.lines.len()
    }

    /// Number of lines consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }
}

/// Count of leading tab characters.
pub fn indent_of(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b'\t').count()
}

/// pactl prints the balance line of a channel volume list as a tab followed
/// by eight spaces; fold that into a second tab so it sits one level deeper.
pub fn normalize_balance_indent(text: &str) -> String {
    text.replace("\t        ", "\t\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_does_not_consume() {
        let mut cursor = Cursor::new("a\nb");

        assert_eq!(cursor.peek(), Some("a"));
        assert_eq!(cursor.peek(), Some("a"));
        assert_eq!(cursor.next_line(), Some("a"));
        assert_eq!(cursor.peek(), Some("b"));
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_take_past_end() {
        let mut cursor = Cursor::new("only");
        cursor.take("first").unwrap();

        assert!(cursor.is_empty());
        assert!(matches!(
            cursor.take("balance line"),
            Err(PulseError::UnexpectedEndOfInput { context: "balance line" })
        ));
    }

    #[test]
    fn test_indent_of() {
        assert_eq!(indent_of("Sink #0"), 0);
        assert_eq!(indent_of("\tName: x"), 1);
        assert_eq!(indent_of("\t\t\tkey = \"v\""), 3);
        assert_eq!(indent_of("    spaces"), 0);
    }

    #[test]
    fn test_normalize_balance_indent() {
        let text = "\tVolume: mono: 65536 / 100% / 0.00 dB\n\t        balance 0.00";

        assert_eq!(
            normalize_balance_indent(text),
            "\tVolume: mono: 65536 / 100% / 0.00 dB\n\t\tbalance 0.00"
        );
    }
}
