//! Cursor over the source text of one scan.
//!
//! Offsets are byte offsets into the source and always sit on `char`
//! boundaries. The cursor keeps three positions:
//!
//! - `start`: first byte of the lexeme being built
//! - `current`: next unconsumed byte
//! - `line`: 1-based line of `current`, bumped whenever a `\n` is consumed
//!
//! `0 <= start <= current <= source.len()` holds after every operation and
//! `line` never decreases.

use crate::char_codes::{LINE_FEED, NULL_CHARACTER};

#[derive(Clone, Debug)]
pub struct Cursor<'src> {
    source: &'src str,
    start: usize,
    current: usize,
    line: usize,
    /// Line of `start`, captured by [`Cursor::begin_lexeme`].
    start_line: usize,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            line: 1,
            start_line: 1,
        }
    }

    #[inline]
    pub fn source(&self) -> &'src str {
        self.source
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// The line the current lexeme started on.
    #[inline]
    pub fn start_line(&self) -> usize {
        self.start_line
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    /// Mark the current position as the beginning of a new lexeme.
    #[inline]
    pub fn begin_lexeme(&mut self) {
        self.start = self.current;
        self.start_line = self.line;
    }

    /// The text consumed since the last [`Cursor::begin_lexeme`].
    #[inline]
    pub fn lexeme(&self) -> &'src str {
        &self.source[self.start..self.current]
    }

    /// Consume and return the next character, or [`NULL_CHARACTER`] at end.
    pub fn advance(&mut self) -> char {
        match self.rest().chars().next() {
            Some(ch) => {
                self.current += ch.len_utf8();
                if ch == LINE_FEED {
                    self.line += 1;
                }
                ch
            }
            None => NULL_CHARACTER,
        }
    }

    /// The next character without consuming it.
    #[inline]
    pub fn peek(&self) -> char {
        self.rest().chars().next().unwrap_or(NULL_CHARACTER)
    }

    /// The character after [`Cursor::peek`] without consuming anything.
    #[inline]
    pub fn peek_next(&self) -> char {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next().unwrap_or(NULL_CHARACTER)
    }

    /// Consume the next character only if it is `expected`.
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.peek() != expected {
            return false;
        }
        self.advance();
        true
    }

    /// Consume characters while `predicate` holds.
    pub fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while !self.is_at_end() && predicate(self.peek()) {
            self.advance();
        }
    }

    /// Advance up to, but not past, the next `needle` byte.
    ///
    /// Newlines passed on the way are counted. Returns `false` and stops at
    /// the end of the source when `needle` does not occur.
    pub fn eat_until(&mut self, needle: u8) -> bool {
        debug_assert!(needle.is_ascii());
        let rest = self.rest().as_bytes();
        let (len, found) = match memchr::memchr(needle, rest) {
            Some(offset) => (offset, true),
            None => (rest.len(), false),
        };
        self.line += memchr::memchr_iter(b'\n', &rest[..len]).count();
        self.current += len;
        found
    }

    #[inline]
    fn rest(&self) -> &'src str {
        &self.source[self.current..]
    }
}
