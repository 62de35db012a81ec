//! Structured diagnostics.
//!
//! Recoverable problems (unknown parameter keys, unknown path ids, bad
//! interaction kinds, ...) do not abort drawing. They are reported as
//! [`Diagnostic`] values collected in a [`Diagnostics`] list that every
//! drawing operation threads through and hands back to its caller.

mod code;
mod collector;
mod severity;

use std::fmt;

pub use code::DiagnosticCode;
pub use collector::Diagnostics;
pub use severity::Severity;

/// A single error or warning with an optional code and help text.
///
/// # Example
///
/// ```text
/// warning[W001]: parameter `colour` is not valid for glyph `CDS`
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<DiagnosticCode>,
    message: String,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use sbolv_core::diagnostic::{Diagnostic, DiagnosticCode};
    /// let diag = Diagnostic::warning("`bogus` is not a valid interaction kind")
    ///     .with_code(DiagnosticCode::W005)
    ///     .with_help("valid kinds: control, degradation, inhibition, process, stimulation");
    /// assert_eq!(
    ///     diag.to_string(),
    ///     "warning[W005]: `bogus` is not a valid interaction kind"
    /// );
    /// ```
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the code, if any.
    pub fn code(&self) -> Option<DiagnosticCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the code.
    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "warning[W001]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
