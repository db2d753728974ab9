//! Character constants and classifiers used by the scanner.

/// Returned by lookahead past the end of the source.
pub const NULL_CHARACTER: char = '\0';
pub const LINE_FEED: char = '\n';
pub const DOUBLE_QUOTE: char = '"';

/// Check if a character is a decimal digit.
#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Check if a character can start an identifier: ASCII letters and `_`.
#[inline]
pub fn is_alpha(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

/// Check if a character can continue an identifier.
#[inline]
pub fn is_alphanumeric(ch: char) -> bool {
    is_alpha(ch) || is_digit(ch)
}

/// Whitespace skipped without emitting a token. Newlines are handled separately.
#[inline]
pub fn is_white_space_single_line(ch: char) -> bool {
    matches!(ch, ' ' | '\r' | '\t')
}
