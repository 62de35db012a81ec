//! SVG canvas.
//!
//! [`SvgCanvas`] collects drawing commands as SVG nodes and assembles a
//! document on request. World space is y-up while SVG is y-down, so every
//! y coordinate is negated on the way in. Nodes are grouped by z-order and
//! emitted from the lowest group to the highest; within a group the
//! emission order is kept.

use std::{fs::File, io::Write, path::Path};

use kurbo::{Affine, BezPath};
use log::{error, info};
use svg::{Document, node::element as svg_element};

use sbolv_core::{
    canvas::Canvas,
    color::Color,
    draw::{FontSpec, PathStyle},
    geometry::{Bounds, Point},
};

use crate::error::SbolvError;

type SvgNode = Box<dyn svg::Node>;

/// Stacking order of labels; above every glyph and annotation path.
pub const LABEL_Z_ORDER: i32 = 10_000;

/// A [`Canvas`] producing an SVG document.
#[derive(Debug, Default)]
pub struct SvgCanvas {
    items: Vec<(i32, SvgNode)>,
    view: Option<Bounds>,
    size: Option<(f64, f64)>,
    background: Option<Color>,
}

impl SvgCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills the view box with `color` behind everything else.
    pub fn with_background(mut self, color: Option<Color>) -> Self {
        self.background = color;
        self
    }

    /// Number of drawn nodes
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Assembles the document.
    ///
    /// # Errors
    ///
    /// [`SbolvError::Export`] if no view bounds were set. Drawing a
    /// construct sets them.
    pub fn to_document(&self) -> Result<Document, SbolvError> {
        let view = self.view.ok_or_else(|| {
            SbolvError::Export("canvas has no view bounds; nothing was laid out".to_string())
        })?;
        let (width, height) = self.size.unwrap_or((view.width(), view.height()));
        let top_left = flip(Point::new(view.min_x(), view.max_y()));

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    top_left.x(),
                    top_left.y(),
                    view.width(),
                    view.height()
                ),
            )
            .set("width", width)
            .set("height", height);

        if let Some(color) = self.background {
            let background = svg_element::Rectangle::new()
                .set("x", top_left.x())
                .set("y", top_left.y())
                .set("width", view.width())
                .set("height", view.height())
                .set("fill", color.to_svg_string())
                .set("fill-opacity", color.alpha());
            doc = doc.add(background);
        }

        for node in self.layers() {
            doc = doc.add(node);
        }
        Ok(doc)
    }

    /// The document as SVG text.
    pub fn to_svg_string(&self) -> Result<String, SbolvError> {
        Ok(self.to_document()?.to_string())
    }

    /// Writes the document to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SbolvError> {
        let path = path.as_ref();
        let doc = self.to_document()?;
        info!(path:? = path; "Creating SVG file");

        let mut file = File::create(path).map_err(|err| {
            error!(path:? = path, err:err; "Failed to create SVG file");
            SbolvError::Io(err)
        })?;
        write!(file, "{doc}").map_err(|err| {
            error!(path:? = path, err:err; "Failed to write SVG content");
            SbolvError::Io(err)
        })?;
        Ok(())
    }

    /// Nodes grouped by z-order, lowest first.
    fn layers(&self) -> Vec<SvgNode> {
        let mut items = self.items.clone();
        // Stable sort keeps emission order inside one z-order
        items.sort_by_key(|(z_order, _)| *z_order);

        let mut result = Vec::new();
        let mut current: Option<(i32, svg_element::Group)> = None;
        for (z_order, node) in items {
            current = match current {
                Some((current_z, group)) if current_z == z_order => {
                    Some((current_z, group.add(node)))
                }
                previous => {
                    if let Some((_, group)) = previous {
                        result.push(Box::new(group) as SvgNode);
                    }
                    Some((z_order, layer_group(z_order).add(node)))
                }
            };
        }
        if let Some((_, group)) = current {
            result.push(Box::new(group) as SvgNode);
        }
        result
    }
}

fn layer_group(z_order: i32) -> svg_element::Group {
    svg_element::Group::new().set("data-z-order", z_order)
}

fn flip(point: Point) -> Point {
    Point::new(point.x(), -point.y())
}

impl Canvas for SvgCanvas {
    fn add_filled_stroked_path(&mut self, path: &BezPath, style: &PathStyle) {
        let mut flipped = path.clone();
        flipped.apply_affine(Affine::FLIP_Y);

        let mut element = svg_element::Path::new().set("d", flipped.to_svg());
        element = match style.fill() {
            Some(fill) => element
                .set("fill", fill.to_svg_string())
                .set("fill-opacity", fill.alpha()),
            None => element.set("fill", "none"),
        };
        if let Some(stroke) = style.stroke() {
            element = sbolv_core::apply_stroke!(element, stroke);
        }

        self.items.push((style.z_order(), Box::new(element)));
    }

    fn add_text(
        &mut self,
        position: Point,
        text: &str,
        color: Color,
        rotation_degrees: f64,
        font: &FontSpec,
    ) {
        let anchor = flip(position);
        let mut element = svg_element::Text::new(text)
            .set("x", anchor.x())
            .set("y", anchor.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", font.family())
            .set("font-size", font.size())
            .set("font-weight", font.weight().to_svg_value())
            .set("font-style", font.style().to_svg_value())
            .set("fill", color.to_svg_string())
            .set("fill-opacity", color.alpha());
        if rotation_degrees != 0.0 {
            // SVG rotates clockwise in its y-down space
            element = element.set(
                "transform",
                format!("rotate({} {} {})", -rotation_degrees, anchor.x(), anchor.y()),
            );
        }

        self.items.push((LABEL_Z_ORDER, Box::new(element)));
    }

    fn set_view_bounds(&mut self, min: Point, max: Point) {
        self.view = Some(Bounds::new(min, max));
    }

    fn resize_to_fit(&mut self, width: f64, height: f64) {
        self.size = Some((width, height));
    }
}
