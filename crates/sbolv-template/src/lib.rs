//! Parametric glyph templates for sbolv.
//!
//! A glyph template is an SVG file whose paths carry symbolic coordinates,
//! for example `M {baseline_x} {baseline_y-height/2} L {baseline_x+width} ...`.
//! This crate loads such templates and turns them into concrete path data:
//!
//! - [`GlyphDefinition`] - one parsed template (defaults, path fragments, styles)
//! - [`GlyphLibrary`] - glyph-type name to definition, plus classification-tag lookup
//! - [`PathTemplate`] - a path string with pre-compiled `{...}` regions
//! - [`Expression`] - the restricted arithmetic language used inside `{...}`
//!
//! The expression language only knows numbers, parameter names, the four
//! arithmetic operators, unary signs and parentheses. Templates may come from
//! arbitrary directories, so nothing richer is ever evaluated.
//!
//! # Example
//!
//! ```
//! use sbolv_template::{Parameters, evaluate};
//!
//! let mut params = Parameters::new();
//! params.insert("x".to_string(), 2.0);
//! params.insert("width".to_string(), 10.0);
//!
//! let d = evaluate("M {x} 0 L {x+width} 0", &params).unwrap();
//! assert_eq!(d, "M 2 0 L 12 0");
//! ```

mod error;
mod expression;
mod glyph;
mod library;
mod path_template;

pub use error::{ExpressionError, TemplateError};
pub use expression::{BinaryOp, Expr, Expression, Parameters};
pub use glyph::{GlyphDefinition, PathClass, PathFragment};
pub use library::GlyphLibrary;
pub use path_template::{PathTemplate, evaluate};
