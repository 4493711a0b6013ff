//! Position-tracking reader over the tokenizer's input.
//!
//! [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)
//!
//! "Before the tokenization stage, the input stream must be preprocessed by
//! normalizing newlines." The cursor does this once, up front, so every state
//! only ever sees U+000A.

use core::fmt;

use serde::Serialize;

/// A location in the (newline-normalized) input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SourcePosition {
    /// Byte offset into the normalized input.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl SourcePosition {
    /// The start of the input.
    pub const START: Self = Self {
        offset: 0,
        line: 1,
        column: 1,
    };
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Reads the input one character at a time.
///
/// End of input is `None`, returned forever once the input is exhausted. The
/// cursor has exactly one checkpoint slot: [`save`](Self::save) overwrites it,
/// [`restore`](Self::restore) jumps back to it.
#[derive(Debug, Clone)]
pub struct Cursor {
    input: String,
    position: SourcePosition,
    saved: SourcePosition,
}

impl Cursor {
    /// "Normalize newlines in input: replace every U+000D CR U+000A LF code
    /// point pair with a single U+000A LF code point, then replace every
    /// remaining U+000D CR code point with a U+000A LF code point."
    #[must_use]
    pub fn new(input: &str) -> Self {
        let input = if input.contains('\r') {
            input.replace("\r\n", "\n").replace('\r', "\n")
        } else {
            input.to_string()
        };
        Self {
            input,
            position: SourcePosition::START,
            saved: SourcePosition::START,
        }
    }

    /// The normalized input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Everything not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.input[self.position.offset..]
    }

    /// Where the next [`read`](Self::read) will start.
    #[must_use]
    pub const fn position(&self) -> SourcePosition {
        self.position
    }

    /// True once every character has been consumed.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.position.offset >= self.input.len()
    }

    /// The next character, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// The character `n` places ahead (`peek_nth(0) == peek()`).
    #[must_use]
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    /// "Consume the next input character"
    pub fn read(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.advance(c);
        Some(c)
    }

    /// Consume everything up to, but not including, `stop` (or to the end if
    /// `stop` never occurs).
    pub fn read_until(&mut self, stop: char) -> String {
        let rest = self.remaining();
        let taken = rest.find(stop).map_or(rest, |end| &rest[..end]).to_string();
        for c in taken.chars() {
            self.advance(c);
        }
        taken
    }

    /// Remember the current position in the single checkpoint slot.
    pub const fn save(&mut self) {
        self.saved = self.position;
    }

    /// Return to the position last passed to [`save`](Self::save) (the start
    /// of input if `save` was never called).
    pub const fn restore(&mut self) {
        self.position = self.saved;
    }

    /// "If the next few characters are" `literal` (case-sensitive): consume
    /// them and return true. Otherwise consume nothing.
    pub fn matches_literal(&mut self, literal: &str) -> bool {
        if !self.remaining().starts_with(literal) {
            return false;
        }
        self.skip(literal);
        true
    }

    /// Like [`matches_literal`](Self::matches_literal), but "ASCII
    /// case-insensitive", as used for `DOCTYPE`, `PUBLIC` and `SYSTEM`.
    pub fn matches_literal_ignore_ascii_case(&mut self, literal: &str) -> bool {
        let matched = self
            .remaining()
            .get(..literal.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(literal));
        if matched {
            self.skip(literal);
        }
        matched
    }

    fn skip(&mut self, consumed: &str) {
        for c in consumed.chars() {
            self.advance(c);
        }
    }

    const fn advance(&mut self, c: char) {
        self.position.offset += c.len_utf8();
        if c == '\n' {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newlines_are_normalized() {
        let mut cursor = Cursor::new("a\r\nb\rc");
        let read: String = core::iter::from_fn(|| cursor.read()).collect();
        assert_eq!(read, "a\nb\nc");
    }

    #[test]
    fn test_position_tracks_lines_and_columns() {
        let mut cursor = Cursor::new("ab\ncd");
        let _ = cursor.read_until('d');
        assert_eq!(
            cursor.position(),
            SourcePosition {
                offset: 4,
                line: 2,
                column: 2
            }
        );
    }
}
