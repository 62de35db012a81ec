//! Visual definitions for glyph paths and labels.
//!
//! - [`StrokeDefinition`] and [`StrokeStyle`] describe outlines
//! - [`StyleMap`], [`StyleProperty`] and [`StyleValue`] carry the small style
//!   vocabulary that glyph templates and user overrides speak
//! - [`PathStyle`] is the concrete style handed to a canvas
//! - [`FontSpec`] describes label typography

mod stroke;
mod style;
mod text;

pub use stroke::{StrokeDefinition, StrokeStyle};
pub use style::{PathStyle, StyleMap, StyleProperty, StyleValue};
pub use text::{FontSpec, FontStyle, FontWeight};
