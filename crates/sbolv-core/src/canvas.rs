//! The drawing-surface abstraction.
//!
//! Glyph rendering and construct layout only need four capabilities from a
//! surface, captured by the [`Canvas`] trait. Two implementations live here:
//!
//! - [`NullCanvas`] discards every command. Bounds and baseline queries draw
//!   onto it so that they share the exact code path of a real draw.
//! - [`RecordingCanvas`] keeps every command in order, which is what tests
//!   and in-memory consumers want.
//!
//! Vector exporters (see the `sbolv` crate) implement the trait on top of a
//! real output format.

use kurbo::BezPath;

use crate::{
    color::Color,
    draw::{FontSpec, PathStyle},
    geometry::{Bounds, Point},
};

/// A 2D drawing surface in world coordinates (y-up).
pub trait Canvas {
    /// Emits a path, filled and/or stroked according to `style`.
    fn add_filled_stroked_path(&mut self, path: &BezPath, style: &PathStyle);

    /// Emits a text label centered on `position`.
    ///
    /// `rotation_degrees` is counter-clockwise.
    fn add_text(
        &mut self,
        position: Point,
        text: &str,
        color: Color,
        rotation_degrees: f64,
        font: &FontSpec,
    );

    /// Sets the visible world region.
    fn set_view_bounds(&mut self, min: Point, max: Point);

    /// Sets the output size of the surface.
    fn resize_to_fit(&mut self, width: f64, height: f64);
}

/// A canvas that ignores every command.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn add_filled_stroked_path(&mut self, _path: &BezPath, _style: &PathStyle) {}

    fn add_text(
        &mut self,
        _position: Point,
        _text: &str,
        _color: Color,
        _rotation_degrees: f64,
        _font: &FontSpec,
    ) {
    }

    fn set_view_bounds(&mut self, _min: Point, _max: Point) {}

    fn resize_to_fit(&mut self, _width: f64, _height: f64) {}
}

/// A command received by a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCommand {
    Path {
        path: BezPath,
        style: PathStyle,
    },
    Text {
        position: Point,
        text: String,
        color: Color,
        rotation_degrees: f64,
        font: FontSpec,
    },
    ViewBounds {
        min: Point,
        max: Point,
    },
    Resize {
        width: f64,
        height: f64,
    },
}

/// A canvas that records every command it receives.
///
/// # Examples
///
/// ```
/// use kurbo::BezPath;
/// use sbolv_core::canvas::{Canvas, RecordingCanvas};
/// use sbolv_core::draw::PathStyle;
///
/// let mut canvas = RecordingCanvas::new();
/// let path = BezPath::from_svg("M 0 0 L 10 0").unwrap();
/// canvas.add_filled_stroked_path(&path, &PathStyle::new());
/// assert_eq!(canvas.paths().count(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    commands: Vec<CanvasCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands in emission order
    pub fn commands(&self) -> &[CanvasCommand] {
        &self.commands
    }

    /// Emitted paths with their styles
    pub fn paths(&self) -> impl Iterator<Item = (&BezPath, &PathStyle)> {
        self.commands.iter().filter_map(|command| match command {
            CanvasCommand::Path { path, style } => Some((path, style)),
            _ => None,
        })
    }

    /// Emitted label texts with their anchors
    pub fn texts(&self) -> impl Iterator<Item = (Point, &str)> {
        self.commands.iter().filter_map(|command| match command {
            CanvasCommand::Text { position, text, .. } => Some((*position, text.as_str())),
            _ => None,
        })
    }

    /// The most recent view bounds, if any were set
    pub fn view_bounds(&self) -> Option<Bounds> {
        self.commands.iter().rev().find_map(|command| match command {
            CanvasCommand::ViewBounds { min, max } => Some(Bounds::new(*min, *max)),
            _ => None,
        })
    }

    /// The most recent output size, if the canvas was resized
    pub fn size(&self) -> Option<(f64, f64)> {
        self.commands.iter().rev().find_map(|command| match command {
            CanvasCommand::Resize { width, height } => Some((*width, *height)),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn add_filled_stroked_path(&mut self, path: &BezPath, style: &PathStyle) {
        self.commands.push(CanvasCommand::Path {
            path: path.clone(),
            style: style.clone(),
        });
    }

    fn add_text(
        &mut self,
        position: Point,
        text: &str,
        color: Color,
        rotation_degrees: f64,
        font: &FontSpec,
    ) {
        self.commands.push(CanvasCommand::Text {
            position,
            text: text.to_string(),
            color,
            rotation_degrees,
            font: font.clone(),
        });
    }

    fn set_view_bounds(&mut self, min: Point, max: Point) {
        self.commands.push(CanvasCommand::ViewBounds { min, max });
    }

    fn resize_to_fit(&mut self, width: f64, height: f64) {
        self.commands.push(CanvasCommand::Resize { width, height });
    }
}
