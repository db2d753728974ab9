//! Reserved word table.
//!
//! Built on first use and shared read-only by every scan afterwards.

use crate::token::TokenKind;
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// Every reserved word, in alphabetical order.
const RESERVED: [(&str, TokenKind); 16] = [
    ("and", TokenKind::And),
    ("class", TokenKind::Class),
    ("else", TokenKind::Else),
    ("false", TokenKind::False),
    ("for", TokenKind::For),
    ("fun", TokenKind::Fun),
    ("if", TokenKind::If),
    ("nil", TokenKind::Nil),
    ("or", TokenKind::Or),
    ("print", TokenKind::Print),
    ("return", TokenKind::Return),
    ("super", TokenKind::Super),
    ("this", TokenKind::This),
    ("true", TokenKind::True),
    ("var", TokenKind::Var),
    ("while", TokenKind::While),
];

static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();

fn table() -> &'static FxHashMap<&'static str, TokenKind> {
    KEYWORDS.get_or_init(|| RESERVED.iter().copied().collect())
}

/// Look up the reserved-word kind for an exact identifier spelling.
#[inline]
pub fn lookup(spelling: &str) -> Option<TokenKind> {
    table().get(spelling).copied()
}

/// Iterate over all reserved words and their kinds.
pub fn all() -> impl Iterator<Item = (&'static str, TokenKind)> {
    RESERVED.iter().copied()
}
