//! lox_scanner: Lexer/tokenizer for Lox source code.
//!
//! Turns source text into a flat list of [`Token`]s for a parser:
//! - Single and double character punctuation (`!=`, `<=`, ...)
//! - Number and string literals with decoded payloads
//! - Identifiers and the 16 reserved words
//! - `//` line comments and whitespace, which produce no tokens
//!
//! Lexical defects never stop a scan. They are handed to a
//! [`Reporter`](lox_diagnostics::Reporter) with their line number.
//!
//! Set `RUST_LOG=lox_scanner=debug` to log one event per scan, or
//! `RUST_LOG=lox_scanner=trace` to log every token.

pub mod char_codes;
pub mod cursor;
pub mod keywords;
mod scanner;
mod token;

pub use cursor::Cursor;
pub use scanner::{scan, scan_with_diagnostics, Scanner};
pub use token::{Literal, Token, TokenKind};
