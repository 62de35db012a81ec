//! Collector for accumulating diagnostics during a draw pass.

use log::{error, warn};

use crate::diagnostic::{Diagnostic, DiagnosticCode};

/// Accumulates diagnostics so that one bad key does not stop a drawing.
///
/// Each emitted diagnostic is also forwarded to the `log` facade.
///
/// # Example
///
/// ```
/// use sbolv_core::diagnostic::{Diagnostic, DiagnosticCode, Diagnostics};
///
/// let mut diagnostics = Diagnostics::new();
/// diagnostics.emit(
///     Diagnostic::warning("parameter `colour` is not valid for `CDS`")
///         .with_code(DiagnosticCode::W001),
/// );
///
/// assert!(diagnostics.has_code(DiagnosticCode::W001));
/// assert!(!diagnostics.has_errors());
/// ```
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        let code = diagnostic.code().map(|code| code.as_str()).unwrap_or("-");
        if diagnostic.severity().is_error() {
            error!(code = code; "{}", diagnostic.message());
        } else {
            warn!(code = code; "{}", diagnostic.message());
        }
        self.diagnostics.push(diagnostic);
    }

    /// Shorthand for emitting a coded warning.
    pub fn warn(&mut self, code: DiagnosticCode, message: impl Into<String>) {
        self.emit(Diagnostic::warning(message).with_code(code));
    }

    /// Moves all diagnostics of `other` into this collector without
    /// logging them a second time.
    pub fn extend(&mut self, other: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(other);
    }

    /// All collected diagnostics in emission order.
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns `true` if any diagnostic carries the given code.
    pub fn has_code(&self, code: DiagnosticCode) -> bool {
        self.diagnostics.iter().any(|d| d.code() == Some(code))
    }

    /// Number of diagnostics carrying the given code.
    pub fn count_code(&self, code: DiagnosticCode) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.code() == Some(code))
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity().is_error())
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Finish collection and hand out the diagnostics.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_new_is_empty() {
        let diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn test_collector_warn() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warn(DiagnosticCode::W002, "`cds` is not a valid path id");
        diagnostics.warn(DiagnosticCode::W002, "`body` is not a valid path id");

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.count_code(DiagnosticCode::W002), 2);
        assert!(!diagnostics.has_code(DiagnosticCode::W001));
        assert!(diagnostics.as_slice()[0].severity().is_warning());
    }

    #[test]
    fn test_collector_errors() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.emit(Diagnostic::error("boom"));
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn test_collector_extend_and_into_vec() {
        let mut first = Diagnostics::new();
        first.warn(DiagnosticCode::W001, "one");
        let mut second = Diagnostics::new();
        second.warn(DiagnosticCode::W004, "two");

        first.extend(second);
        let all = first.into_vec();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].code(), Some(DiagnosticCode::W004));
    }
}
