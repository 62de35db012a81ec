//! Error adapter for converting SbolvError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use sbolv::SbolvError;

/// Adapter rendering an [`SbolvError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a SbolvError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            SbolvError::UnknownGlyph(_) => "sbolv::unknown_glyph",
            SbolvError::EmptyConstruct => "sbolv::empty_construct",
            SbolvError::UnknownPart(_) => "sbolv::unknown_part",
            SbolvError::InvalidInteractionKind(_) => "sbolv::interaction_kind",
            SbolvError::Template(_) => "sbolv::template",
            SbolvError::Io(_) => "sbolv::io",
            SbolvError::Export(_) => "sbolv::export",
            SbolvError::Config(_) => "sbolv::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            SbolvError::UnknownGlyph(_) => {
                "check the glyph name, or load a template directory with --glyphs"
            }
            SbolvError::EmptyConstruct => "add at least one [[parts]] entry to the design",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_per_variant() {
        let err = SbolvError::UnknownGlyph("Widget".to_string());
        let adapter = ErrorAdapter(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "sbolv::unknown_glyph");
        assert!(adapter.help().is_some());
        assert_eq!(adapter.to_string(), "unknown glyph type `Widget`");
    }

    #[test]
    fn test_plain_error_has_no_help() {
        let err = SbolvError::Export("no view".to_string());
        let adapter = ErrorAdapter(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "sbolv::export");
        assert!(adapter.help().is_none());
    }

    #[test]
    fn test_renders_with_graphical_handler() {
        let err = SbolvError::EmptyConstruct;
        let reporter = miette::GraphicalReportHandler::new();
        let mut writer = String::new();
        reporter
            .render_report(&mut writer, &ErrorAdapter(&err))
            .unwrap();

        assert!(writer.contains("construct has no parts"));
    }
}
