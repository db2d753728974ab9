//! Property tests for the scanner.
//!
//! Inputs come from two generators: arbitrary strings, which exercise the
//! error paths, and sequences of well-formed Lox fragments, which must scan
//! without diagnostics and account for every byte of the source.

use lox_scanner::{scan_with_diagnostics, Token, TokenKind};
use proptest::prelude::*;

/// Fragments that scan cleanly on their own. Separators keep adjacent
/// fragments from merging into one lexeme.
fn fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("(".to_string()),
        Just(")".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just(",".to_string()),
        Just(".".to_string()),
        Just("-".to_string()),
        Just("+".to_string()),
        Just(";".to_string()),
        Just("*".to_string()),
        Just("/".to_string()),
        Just("!".to_string()),
        Just("!=".to_string()),
        Just("=".to_string()),
        Just("==".to_string()),
        Just("<".to_string()),
        Just("<=".to_string()),
        Just(">".to_string()),
        Just(">=".to_string()),
        "[a-zA-Z_][a-zA-Z0-9_]{0,8}",
        "[0-9]{1,6}(\\.[0-9]{1,4})?",
        "\"[a-z \n]{0,10}\"",
    ]
}

fn separator() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(" ".to_string()),
        Just("\t".to_string()),
        Just("\r".to_string()),
        Just("\n".to_string()),
        "// [a-z ]{0,10}\n",
    ]
}

fn clean_source() -> impl Strategy<Value = String> {
    proptest::collection::vec((fragment(), separator()), 0..40).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(fragment, separator)| fragment + &separator)
            .collect()
    })
}

proptest! {
    #[test]
    fn always_ends_with_single_eof(source in any::<String>()) {
        let (tokens, _) = scan_with_diagnostics(&source);
        prop_assert!(tokens.last().is_some_and(Token::is_eof));
        prop_assert_eq!(tokens.iter().filter(|t| t.is_eof()).count(), 1);
    }

    #[test]
    fn lines_never_decrease(source in any::<String>()) {
        let (tokens, diagnostics) = scan_with_diagnostics(&source);
        prop_assert!(tokens.windows(2).all(|pair| pair[0].line() <= pair[1].line()));
        prop_assert!(diagnostics.diagnostics().windows(2).all(|pair| pair[0].line <= pair[1].line));
        prop_assert!(tokens.iter().all(|t| t.line() >= 1));
    }

    #[test]
    fn eof_line_counts_newlines(source in any::<String>()) {
        let (tokens, _) = scan_with_diagnostics(&source);
        let newlines = source.matches('\n').count();
        prop_assert_eq!(tokens.last().map(Token::line), Some(newlines + 1));
    }

    #[test]
    fn lexemes_are_source_substrings(source in any::<String>()) {
        let (tokens, _) = scan_with_diagnostics(&source);
        for token in &tokens {
            prop_assert!(source.contains(token.lexeme()));
        }
    }

    #[test]
    fn scanning_is_deterministic(source in any::<String>()) {
        prop_assert_eq!(scan_with_diagnostics(&source), scan_with_diagnostics(&source));
    }

    #[test]
    fn clean_source_has_no_diagnostics(source in clean_source()) {
        let (_, diagnostics) = scan_with_diagnostics(&source);
        prop_assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    }

    #[test]
    fn clean_source_is_reconstructed_by_lexemes_and_skipped_text(source in clean_source()) {
        let (tokens, _) = scan_with_diagnostics(&source);
        prop_assert!(token_offsets(&source, &tokens).is_some());
    }

    #[test]
    fn token_line_is_newlines_before_plus_one(source in clean_source()) {
        let (tokens, _) = scan_with_diagnostics(&source);
        let offsets = token_offsets(&source, &tokens).unwrap_or_default();
        for (token, offset) in tokens.iter().zip(offsets) {
            let newlines_before = source[..offset].matches('\n').count();
            prop_assert_eq!(token.line(), newlines_before + 1);
        }
    }

    #[test]
    fn identifiers_never_shadow_keywords(word in "[a-z]{1,8}") {
        let (tokens, _) = scan_with_diagnostics(&word);
        let expected = TokenKind::from_keyword(&word).unwrap_or(TokenKind::Identifier);
        prop_assert_eq!(tokens[0].kind(), expected);
        prop_assert_eq!(tokens[0].lexeme(), word.as_str());
    }
}

/// Byte offset of every non-EOF token, walking the source as a sequence
/// of skipped text and lexemes. `None` if the walk does not cover the
/// source exactly.
fn token_offsets(source: &str, tokens: &[Token]) -> Option<Vec<usize>> {
    let mut offset = 0;
    let mut offsets = Vec::new();
    for token in tokens.iter().filter(|t| !t.is_eof()) {
        offset += skipped_len(&source[offset..]);
        if !source[offset..].starts_with(token.lexeme()) {
            return None;
        }
        offsets.push(offset);
        offset += token.lexeme().len();
    }
    offset += skipped_len(&source[offset..]);
    (offset == source.len()).then_some(offsets)
}

/// Length of the leading whitespace and `//` comments of `text`.
fn skipped_len(text: &str) -> usize {
    let mut rest = text;
    loop {
        rest = rest.trim_start_matches([' ', '\t', '\r', '\n']);
        match rest.strip_prefix("//") {
            Some(comment) => rest = comment.find('\n').map_or("", |i| &comment[i..]),
            None => return text.len() - rest.len(),
        }
    }
}
