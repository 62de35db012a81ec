//! Export backends.
//!
//! Exporters are [`Canvas`](sbolv_core::canvas::Canvas) implementations that
//! turn the drawing commands of a glyph or construct into an output format.
//!
//! # Available Backends
//!
//! - [`svg`] — SVG output via [`svg::SvgCanvas`]

/// SVG export backend.
pub mod svg;
