//! lox_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Lexical defects are never fatal. The scanner hands each one to a
//! [`Reporter`] together with the 1-based source line, and keeps going.
//! [`DiagnosticCollection`] is the reporter used by the CLI and the tests:
//! it records every report so the caller can inspect them after the scan.

use std::fmt;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Error,
}

impl DiagnosticCategory {
    /// Capitalized name used in the `[line N] Error: ...` report format.
    pub fn title(self) -> &'static str {
        match self {
            DiagnosticCategory::Error => "Error",
        }
    }
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message with a code and category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1001).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message text, reported verbatim.
    pub message: &'static str,
}

/// A reported diagnostic with its source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The 1-based source line the defect was found on.
    pub line: usize,
    /// The message text.
    pub message_text: String,
    /// The diagnostic code.
    pub code: u32,
    /// The category.
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// Create a diagnostic for the given line.
    pub fn new(line: usize, message: &DiagnosticMessage) -> Self {
        Self {
            line,
            message_text: message.message.to_string(),
            code: message.code,
            category: message.category,
        }
    }

    /// Whether this is an error diagnostic.
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    /// Whether this diagnostic was produced from the given template.
    pub fn is(&self, message: &DiagnosticMessage) -> bool {
        self.code == message.code
    }

    /// The diagnostic code with its `LX` prefix, e.g. `LX1002`.
    pub fn code_name(&self) -> String {
        format!("LX{}", self.code)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[line {}] {}: {}",
            self.line,
            self.category.title(),
            self.message_text
        )
    }
}

/// Receiver for line-tagged lexical diagnostics.
///
/// Implementations must not abort: the scanner relies on continuing after
/// every report.
pub trait Reporter {
    fn report(&mut self, line: usize, message: &DiagnosticMessage);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, line: usize, message: &DiagnosticMessage) {
        (**self).report(line, message);
    }
}

/// A collection of diagnostics accumulated during a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }

    /// Sort diagnostics by line. Reports on the same line keep their order.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by_key(|d| d.line);
    }
}

impl Reporter for DiagnosticCollection {
    fn report(&mut self, line: usize, message: &DiagnosticMessage) {
        self.add(Diagnostic::new(line, message));
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
    }

    // ========================================================================
    // Scanner errors (1000-1099)
    // ========================================================================
    pub const UNEXPECTED_CHARACTER: DiagnosticMessage = diag!(1001, Error, "Unexpected character.");
    pub const UNTERMINATED_STRING: DiagnosticMessage = diag!(1002, Error, "Unterminated string.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_message_text_is_verbatim() {
        let braces = DiagnosticMessage {
            code: 1999,
            category: DiagnosticCategory::Error,
            message: "Saw '{0}'.",
        };
        assert_eq!(Diagnostic::new(4, &braces).message_text, "Saw '{0}'.");
        assert_eq!(
            Diagnostic::new(1, &messages::UNEXPECTED_CHARACTER).message_text,
            messages::UNEXPECTED_CHARACTER.message
        );
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::new(3, &messages::UNTERMINATED_STRING);
        assert_eq!(diag.to_string(), "[line 3] Error: Unterminated string.");
        assert_eq!(diag.code_name(), "LX1002");
    }

    #[test]
    fn test_diagnostic_fields() {
        let diag = Diagnostic::new(1, &messages::UNEXPECTED_CHARACTER);
        assert_eq!(diag.line, 1);
        assert_eq!(diag.code, 1001);
        assert!(diag.is_error());
        assert!(diag.is(&messages::UNEXPECTED_CHARACTER));
        assert!(!diag.is(&messages::UNTERMINATED_STRING));
    }

    #[test]
    fn test_diagnostic_collection() {
        let mut collection = DiagnosticCollection::new();
        assert!(collection.is_empty());
        assert_eq!(collection.len(), 0);
        assert!(!collection.has_errors());

        collection.report(2, &messages::UNEXPECTED_CHARACTER);
        assert!(collection.has_errors());
        assert_eq!(collection.error_count(), 1);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.diagnostics()[0].line, 2);
    }

    #[test]
    fn test_reporter_through_mut_reference() {
        fn report_twice(reporter: &mut impl Reporter) {
            reporter.report(1, &messages::UNEXPECTED_CHARACTER);
            reporter.report(4, &messages::UNTERMINATED_STRING);
        }

        let mut collection = DiagnosticCollection::new();
        report_twice(&mut &mut collection);
        let lines: Vec<usize> = collection.diagnostics().iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![1, 4]);
    }

    #[test]
    fn test_diagnostic_collection_sort_is_stable() {
        let mut collection = DiagnosticCollection::new();
        collection.report(5, &messages::UNEXPECTED_CHARACTER);
        collection.report(2, &messages::UNTERMINATED_STRING);
        collection.report(2, &messages::UNEXPECTED_CHARACTER);
        collection.sort();
        let got: Vec<(usize, u32)> = collection
            .diagnostics()
            .iter()
            .map(|d| (d.line, d.code))
            .collect();
        assert_eq!(got, vec![(2, 1002), (2, 1001), (5, 1001)]);
    }

    #[test]
    fn test_extend_and_clear() {
        let mut first = DiagnosticCollection::new();
        first.report(1, &messages::UNEXPECTED_CHARACTER);
        let mut second = DiagnosticCollection::new();
        second.report(7, &messages::UNTERMINATED_STRING);

        first.extend(second);
        assert_eq!(first.len(), 2);
        assert_eq!(first.clone().into_diagnostics()[1].line, 7);

        first.clear();
        assert!(first.is_empty());
    }
}
