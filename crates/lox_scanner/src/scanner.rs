//! The Lox scanner.
//!
//! Converts source text into a flat list of tokens ending in `EOF`.
//! Lexical defects go to a [`Reporter`] and scanning carries on, so one
//! pass surfaces every defect in the source.

use crate::char_codes::{
    is_alpha, is_alphanumeric, is_digit, is_white_space_single_line, DOUBLE_QUOTE, LINE_FEED,
};
use crate::cursor::Cursor;
use crate::keywords;
use crate::token::{Literal, Token, TokenKind};
use lox_diagnostics::{messages, DiagnosticCollection, DiagnosticMessage, Reporter};
use tracing::{debug, trace};

/// One scan of one source text.
///
/// The scanner owns its cursor for the duration of a single
/// [`Scanner::scan_tokens`] call, which consumes it.
pub struct Scanner<'src, R> {
    cursor: Cursor<'src>,
    tokens: Vec<Token>,
    reporter: R,
    error_count: usize,
}

impl<'src, R: Reporter> Scanner<'src, R> {
    /// Create a scanner for `source` that reports defects to `reporter`.
    pub fn new(source: &'src str, reporter: R) -> Self {
        Self {
            cursor: Cursor::new(source),
            tokens: Vec::new(),
            reporter,
            error_count: 0,
        }
    }

    /// Scan the whole source.
    pub fn scan_tokens(mut self) -> Vec<Token> {
        let span = tracing::debug_span!("scan", source_len = self.cursor.source().len());
        let _guard = span.enter();

        while !self.cursor.is_at_end() {
            self.cursor.begin_lexeme();
            self.scan_token();
        }

        self.tokens.push(Token::eof(self.cursor.line()));
        debug!(
            tokens = self.tokens.len(),
            errors = self.error_count,
            lines = self.cursor.line(),
            "scan complete"
        );
        self.tokens
    }

    fn scan_token(&mut self) {
        let ch = self.cursor.advance();
        match ch {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),

            '!' => self.scan_operator(TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.scan_operator(TokenKind::EqualEqual, TokenKind::Equal),
            '<' => self.scan_operator(TokenKind::LessEqual, TokenKind::Less),
            '>' => self.scan_operator(TokenKind::GreaterEqual, TokenKind::Greater),

            '/' => {
                if self.cursor.match_char('/') {
                    // A comment runs to the end of the line.
                    self.cursor.eat_until(b'\n');
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }

            // The cursor counts lines as it consumes `\n`.
            LINE_FEED => {}
            c if is_white_space_single_line(c) => {}

            DOUBLE_QUOTE => self.scan_string(),

            c if is_digit(c) => self.scan_number(),
            c if is_alpha(c) => self.scan_identifier(),

            _ => self.error(&messages::UNEXPECTED_CHARACTER),
        }
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    /// `!`, `=`, `<` and `>`, each optionally followed by `=`.
    fn scan_operator(&mut self, with_equals: TokenKind, alone: TokenKind) {
        let kind = if self.cursor.match_char('=') {
            with_equals
        } else {
            alone
        };
        self.add_token(kind);
    }

    fn scan_string(&mut self) {
        if !self.cursor.eat_until(b'"') {
            self.error(&messages::UNTERMINATED_STRING);
            return;
        }
        self.cursor.advance(); // closing quote

        let lexeme = self.cursor.lexeme();
        let value = &lexeme[1..lexeme.len() - 1];
        self.add_literal_token(TokenKind::String, Literal::String(value.to_string()));
    }

    fn scan_number(&mut self) {
        self.cursor.eat_while(is_digit);

        // A fraction needs at least one digit after the dot.
        if self.cursor.peek() == '.' && is_digit(self.cursor.peek_next()) {
            self.cursor.advance();
            self.cursor.eat_while(is_digit);
        }

        // Digits with an optional fraction always parse.
        let value = self.cursor.lexeme().parse::<f64>().unwrap_or_default();
        self.add_literal_token(TokenKind::Number, Literal::Number(value));
    }

    fn scan_identifier(&mut self) {
        self.cursor.eat_while(is_alphanumeric);
        let kind = keywords::lookup(self.cursor.lexeme()).unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    // ========================================================================
    // Emission
    // ========================================================================

    fn add_token(&mut self, kind: TokenKind) {
        let token = Token::new(kind, self.cursor.lexeme(), self.cursor.start_line());
        self.push(token);
    }

    fn add_literal_token(&mut self, kind: TokenKind, literal: Literal) {
        let token = Token::with_literal(
            kind,
            self.cursor.lexeme(),
            literal,
            self.cursor.start_line(),
        );
        self.push(token);
    }

    fn push(&mut self, token: Token) {
        trace!(kind = %token.kind(), lexeme = token.lexeme(), line = token.line(), "token");
        self.tokens.push(token);
    }

    fn error(&mut self, message: &DiagnosticMessage) {
        let line = self.cursor.line();
        trace!(line, code = message.code, lexeme = self.cursor.lexeme(), "lexical error");
        self.error_count += 1;
        self.reporter.report(line, message);
    }
}

/// Scan `source`, sending lexical defects to `reporter`.
///
/// Always returns a token list ending in exactly one `EOF` token.
pub fn scan<R: Reporter + ?Sized>(source: &str, reporter: &mut R) -> Vec<Token> {
    Scanner::new(source, reporter).scan_tokens()
}

/// Scan `source` and collect its lexical defects.
pub fn scan_with_diagnostics(source: &str) -> (Vec<Token>, DiagnosticCollection) {
    let mut diagnostics = DiagnosticCollection::new();
    let tokens = scan(source, &mut diagnostics);
    (tokens, diagnostics)
}
