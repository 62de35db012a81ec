//! Diagnostic codes.
//!
//! Every recoverable problem the renderer reports carries a stable `W0xx`
//! code, so callers and tests can match on the kind of problem rather than
//! on message text.

use std::fmt;

/// Codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// Unknown glyph parameter.
    ///
    /// A user parameter is not declared by the glyph template. It is merged
    /// anyway so that templates can grow new parameters.
    W001,

    /// Unknown path id in a style override.
    ///
    /// The override targets a path id the glyph does not have and is ignored.
    W002,

    /// Style property not valid for a path.
    ///
    /// The template style block of the path does not declare the property,
    /// so the override is dropped.
    W003,

    /// Unknown interaction parameter.
    W004,

    /// Invalid interaction kind.
    ///
    /// The interaction is skipped; the rest of the construct is still drawn.
    W005,

    /// Parameter value has the wrong type.
    ///
    /// For example a text value for a numeric glyph parameter.
    W006,

    /// Glyph has no baseline path.
    ///
    /// The glyph consumes no baseline length during layout.
    W007,

    /// Invalid orientation value.
    W008,
}

impl DiagnosticCode {
    /// Returns the code as a string (e.g., "W001").
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::W001 => "W001",
            DiagnosticCode::W002 => "W002",
            DiagnosticCode::W003 => "W003",
            DiagnosticCode::W004 => "W004",
            DiagnosticCode::W005 => "W005",
            DiagnosticCode::W006 => "W006",
            DiagnosticCode::W007 => "W007",
            DiagnosticCode::W008 => "W008",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            DiagnosticCode::W001 => "unknown glyph parameter",
            DiagnosticCode::W002 => "unknown path id",
            DiagnosticCode::W003 => "invalid style property for path",
            DiagnosticCode::W004 => "unknown interaction parameter",
            DiagnosticCode::W005 => "invalid interaction kind",
            DiagnosticCode::W006 => "parameter type mismatch",
            DiagnosticCode::W007 => "glyph has no baseline",
            DiagnosticCode::W008 => "invalid orientation",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
