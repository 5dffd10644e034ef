//! [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)
//!
//! The tokenizer walks an already-decoded sequence of code points. The cursor
//! is owned by the state machine; nothing else moves it.

use std::fmt;

use serde::Serialize;

/// Whether a literal match ignores ASCII case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseSensitivity {
    /// Code points must be identical
    CaseSensitive,
    /// ASCII letters match regardless of case
    CaseInsensitive,
}

/// A zero-based line and column in the decoded input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SourcePosition {
    /// Zero-based line number
    pub line: usize,
    /// Zero-based column, counted in code points
    pub column: usize,
}

impl SourcePosition {
    const fn advanced_by(self, c: char) -> Self {
        if c == '\n' {
            Self {
                line: self.line + 1,
                column: 0,
            }
        } else {
            Self {
                line: self.line,
                column: self.column + 1,
            }
        }
    }
}

impl fmt::Display for SourcePosition {
    /// Formats as one-based `line:column`, the way editors report positions.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// The stretch of input a token was built from. `start` is the first code
/// point, `end` is just past the last one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SourceSpan {
    /// Position of the first code point
    pub start: SourcePosition,
    /// Position just past the last code point
    pub end: SourcePosition,
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Lazy lookahead / consume / reconsume over the input code points.
///
/// Consuming at the end of the input still advances the cursor, so that a
/// reconsumed EOF is seen as EOF again by the next state.
#[derive(Debug, Clone)]
pub struct InputCursor {
    code_points: Vec<char>,
    offset: usize,
    position: SourcePosition,
    previous_position: SourcePosition,
}

impl InputCursor {
    /// Create a cursor over `input`.
    ///
    /// "Before the tokenization stage, the input stream must be preprocessed
    /// by normalizing newlines." Every CR LF pair and every lone CR becomes
    /// a single LF.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            code_points: normalize_newlines(input),
            offset: 0,
            position: SourcePosition::default(),
            previous_position: SourcePosition::default(),
        }
    }

    /// "Consume the next input character"
    ///
    /// Returns `None` at the end of the input.
    pub fn next_code_point(&mut self) -> Option<char> {
        let c = self.code_points.get(self.offset).copied();
        self.offset += 1;
        self.previous_position = self.position;
        if let Some(c) = c {
            self.position = self.position.advanced_by(c);
        }
        c
    }

    /// Look `offset` code points past the next input character without
    /// consuming anything. `peek_code_point(0)` is the next input character.
    #[must_use]
    pub fn peek_code_point(&self, offset: usize) -> Option<char> {
        self.code_points.get(self.offset + offset).copied()
    }

    /// "Reconsume" - step back over the code point that was just consumed.
    ///
    /// # Panics
    ///
    /// Panics if nothing has been consumed yet, which would mean a state
    /// reconsumed without having read its input character.
    pub fn reconsume(&mut self) {
        assert!(self.offset > 0, "reconsume before any input was consumed");
        self.offset -= 1;
        self.position = self.previous_position;
    }

    /// "If the next few characters are..."
    ///
    /// Advances past `literal` and returns true only if all of it matched.
    /// A partial match leaves the cursor untouched.
    pub fn consume_if_matches(&mut self, literal: &str, case_sensitivity: CaseSensitivity) -> bool {
        for (i, expected) in literal.chars().enumerate() {
            let Some(actual) = self.peek_code_point(i) else {
                return false;
            };
            let matched = match case_sensitivity {
                CaseSensitivity::CaseSensitive => actual == expected,
                CaseSensitivity::CaseInsensitive => actual.eq_ignore_ascii_case(&expected),
            };
            if !matched {
                return false;
            }
        }
        self.skip(literal.chars().count());
        true
    }

    /// Consume `count` code points that the caller has already inspected.
    pub fn skip(&mut self, count: usize) {
        for _ in 0..count {
            let _ = self.next_code_point();
        }
    }

    /// Everything from the next input character to the end of the input.
    #[must_use]
    pub fn remaining(&self) -> &[char] {
        self.code_points.get(self.offset..).unwrap_or(&[])
    }

    /// Position of the next input character.
    #[must_use]
    pub const fn position(&self) -> SourcePosition {
        self.position
    }

    /// Position of the character most recently consumed.
    #[must_use]
    pub const fn current_position(&self) -> SourcePosition {
        self.previous_position
    }
}

fn normalize_newlines(input: &str) -> Vec<char> {
    let mut code_points = Vec::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                let _ = chars.next();
            }
            code_points.push('\n');
        } else {
            code_points.push(c);
        }
    }
    code_points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_and_reconsume() {
        let mut cursor = InputCursor::new("ab");
        assert_eq!(cursor.next_code_point(), Some('a'));
        cursor.reconsume();
        assert_eq!(cursor.next_code_point(), Some('a'));
        assert_eq!(cursor.next_code_point(), Some('b'));
        assert_eq!(cursor.next_code_point(), None);
    }

    #[test]
    fn test_reconsumed_eof_is_eof_again() {
        let mut cursor = InputCursor::new("a");
        assert_eq!(cursor.next_code_point(), Some('a'));
        assert_eq!(cursor.next_code_point(), None);
        cursor.reconsume();
        assert_eq!(cursor.next_code_point(), None);
    }

    #[test]
    fn test_partial_match_does_not_advance() {
        let mut cursor = InputCursor::new("DOCTYPX");
        assert!(!cursor.consume_if_matches("DOCTYPE", CaseSensitivity::CaseSensitive));
        assert_eq!(cursor.peek_code_point(0), Some('D'));
    }

    #[test]
    fn test_case_insensitive_match() {
        let mut cursor = InputCursor::new("doctype html");
        assert!(cursor.consume_if_matches("DOCTYPE", CaseSensitivity::CaseInsensitive));
        assert_eq!(cursor.next_code_point(), Some(' '));

        let mut cursor = InputCursor::new("[cdata[");
        assert!(!cursor.consume_if_matches("[CDATA[", CaseSensitivity::CaseSensitive));
    }

    #[test]
    fn test_match_fails_at_end_of_input() {
        let mut cursor = InputCursor::new("-");
        assert!(!cursor.consume_if_matches("--", CaseSensitivity::CaseSensitive));
        assert_eq!(cursor.remaining(), &['-']);
    }

    #[test]
    fn test_newlines_are_normalized() {
        let cursor = InputCursor::new("a\r\nb\rc\n");
        assert_eq!(cursor.remaining(), &['a', '\n', 'b', '\n', 'c', '\n']);
    }

    #[test]
    fn test_positions_follow_lines() {
        let mut cursor = InputCursor::new("ab\ncd");
        cursor.skip(3);
        assert_eq!(cursor.position(), SourcePosition { line: 1, column: 0 });
        assert_eq!(cursor.next_code_point(), Some('c'));
        assert_eq!(cursor.current_position(), SourcePosition { line: 1, column: 0 });
        cursor.reconsume();
        assert_eq!(cursor.position(), SourcePosition { line: 1, column: 0 });
    }
}
