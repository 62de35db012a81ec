//! Error types for sbolv operations.
//!
//! Only conditions that make an operation meaningless are errors. Anything a
//! drawing can survive (an unknown parameter key, a bad style override, a
//! bogus interaction kind inside a construct) is reported as a
//! [`Diagnostic`](sbolv_core::diagnostic::Diagnostic) instead.

use std::io;

use thiserror::Error;

use sbolv_template::TemplateError;

use crate::construct::PartHandle;

/// The main error type for sbolv operations.
#[derive(Debug, Error)]
pub enum SbolvError {
    #[error("unknown glyph type `{0}`")]
    UnknownGlyph(String),

    #[error("construct has no parts")]
    EmptyConstruct,

    #[error("part {0} does not belong to this construct")]
    UnknownPart(PartHandle),

    #[error(
        "invalid interaction kind `{0}`, valid values: control, degradation, inhibition, process, stimulation"
    )]
    InvalidInteractionKind(String),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
