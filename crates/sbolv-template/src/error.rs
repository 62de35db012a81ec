//! Error types for template loading and expression evaluation.
//!
//! A malformed template is a data-integrity problem of the glyph library,
//! not a user-input condition, so every error here is fatal for the
//! operation that hit it.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while parsing or evaluating a template expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    #[error("invalid expression `{expression}` at offset {offset}")]
    Syntax { expression: String, offset: usize },

    #[error("unbalanced braces in template `{template}`")]
    UnbalancedBraces { template: String },

    #[error("unknown parameter `{name}` in expression `{expression}`")]
    UnknownVariable { name: String, expression: String },

    #[error("division by zero in expression `{expression}`")]
    DivisionByZero { expression: String },

    #[error("expression `{expression}` does not evaluate to a finite number")]
    NonFinite { expression: String },

    #[error("expression has more than {limit} operators and parentheses")]
    TooComplex { limit: usize },
}

/// Errors raised while loading glyph templates.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed template XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("glyph template is missing the `{0}` attribute")]
    MissingAttribute(&'static str),

    #[error("glyph `{glyph_type}` has an invalid default `{entry}`")]
    InvalidDefault { glyph_type: String, entry: String },

    #[error("glyph `{glyph_type}` has an invalid style block: {message}")]
    InvalidStyle { glyph_type: String, message: String },

    #[error("glyph `{glyph_type}` declares path id `{id}` more than once")]
    DuplicatePathId { glyph_type: String, id: String },

    #[error("glyph `{glyph_type}` has an invalid path template: {source}")]
    Expression {
        glyph_type: String,
        #[source]
        source: ExpressionError,
    },

    #[error("glyph `{glyph_type}` produced malformed path data `{path}`: {message}")]
    PathSyntax {
        glyph_type: String,
        path: String,
        message: String,
    },

    #[error("glyph type `{0}` is defined more than once")]
    DuplicateGlyph(String),
}
