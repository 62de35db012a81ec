//! sbolv Core Types and Definitions
//!
//! This crate provides the foundational types shared by the sbolv glyph
//! template loader and the layout engine. It includes:
//!
//! - **Colors**: Color handling with CSS and RGB-triple support ([`color::Color`])
//! - **Geometry**: Points, bounding boxes and bounds union ([`geometry`] module)
//! - **Draw**: Stroke, fill and label styling ([`draw`] module)
//! - **Canvas**: The drawing-surface abstraction and its no-op sink ([`canvas`] module)
//! - **Diagnostics**: Warn-and-continue reporting ([`diagnostic`] module)

pub mod canvas;
pub mod color;
pub mod diagnostic;
pub mod draw;
pub mod geometry;
