//! Construct layout.
//!
//! Glyphs are placed one after another along a straight baseline that
//! starts at a given point and runs in the direction of the construct
//! rotation. Each glyph is drawn with its anchor on a cursor, and the
//! cursor then moves to the glyph's baseline exit point plus the gap.
//!
//! ```text
//!   start          exit+gap         exit+gap
//!     |----[glyph 0]----|----[glyph 1]----|----[glyph 2]----> final cursor
//! ```
//!
//! A reverse glyph occupies the space ahead of the cursor just like a
//! forward one, but is drawn from the far end of its footprint with the
//! rotation turned by a half turn.
//!
//! Bounds-only queries run the same algorithm against a
//! [`NullCanvas`](sbolv_core::canvas::NullCanvas).

use std::f64::consts::PI;

use log::{debug, info};

use sbolv_core::{
    canvas::Canvas,
    diagnostic::{Diagnostic, DiagnosticCode, Diagnostics},
    geometry::{Bounds, Insets, Point, find_bound_of_bounds},
};

use crate::{
    error::SbolvError,
    params::{self, Orientation, UserParameters, UserStyle},
    renderer::{GlyphOptions, GlyphRenderer},
};

/// Default padding, as a fraction of the content height.
pub const DEFAULT_PADDING: f64 = 0.2;

/// Default output pixels per world unit.
pub const DEFAULT_SCALE: f64 = 4.0;

/// One glyph of a part list.
#[derive(Debug, Clone, PartialEq)]
pub struct PartListEntry {
    glyph_type: String,
    parameters: Option<UserParameters>,
    style: Option<UserStyle>,
    orientation: Option<Orientation>,
}

impl PartListEntry {
    pub fn new(glyph_type: impl Into<String>) -> Self {
        Self {
            glyph_type: glyph_type.into(),
            parameters: None,
            style: None,
            orientation: None,
        }
    }

    pub fn with_parameters(mut self, parameters: UserParameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn with_style(mut self, style: UserStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Sets the orientation explicitly, overriding an `orientation`
    /// parameter.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn glyph_type(&self) -> &str {
        &self.glyph_type
    }

    pub fn parameters(&self) -> Option<&UserParameters> {
        self.parameters.as_ref()
    }

    pub fn parameters_mut(&mut self) -> &mut Option<UserParameters> {
        &mut self.parameters
    }

    pub fn style(&self) -> Option<&UserStyle> {
        self.style.as_ref()
    }

    pub fn style_mut(&mut self) -> &mut Option<UserStyle> {
        &mut self.style
    }

    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Option<Orientation>) {
        self.orientation = orientation;
    }
}

/// Where and how one part ended up.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    glyph_type: String,
    orientation: Orientation,
    position: Point,
    rotation: f64,
    bounds: Bounds,
    baseline_end: Option<Point>,
}

impl Placement {
    pub fn glyph_type(&self) -> &str {
        &self.glyph_type
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Anchor the glyph was drawn at
    pub fn position(&self) -> Point {
        self.position
    }

    /// Rotation the glyph was drawn with, in radians
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Terminal vertex of the drawn baseline
    pub fn baseline_end(&self) -> Option<Point> {
        self.baseline_end
    }
}

/// Input of [`layout_parts`].
#[derive(Debug, Clone)]
pub struct LayoutRequest {
    parts: Vec<PartListEntry>,
    start: Point,
    gap: f64,
    rotation: f64,
    padding: f64,
    scale: f64,
    additional_bounds: Vec<Bounds>,
}

impl LayoutRequest {
    pub fn new(parts: Vec<PartListEntry>) -> Self {
        Self {
            parts,
            start: Point::default(),
            gap: 0.0,
            rotation: 0.0,
            padding: DEFAULT_PADDING,
            scale: DEFAULT_SCALE,
            additional_bounds: Vec::new(),
        }
    }

    pub fn with_start(mut self, start: Point) -> Self {
        self.start = start;
        self
    }

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Construct rotation in radians
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Extra regions that the final bounds must cover.
    pub fn with_additional_bounds(mut self, bounds: Vec<Bounds>) -> Self {
        self.additional_bounds = bounds;
        self
    }
}

/// Outcome of a layout pass.
#[derive(Debug, Clone)]
pub struct LayoutResult {
    placements: Vec<Placement>,
    baseline_start: Point,
    baseline_end: Point,
    annotation_bounds: Vec<Bounds>,
    content_bounds: Bounds,
    bounds: Bounds,
    diagnostics: Vec<Diagnostic>,
}

impl LayoutResult {
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn baseline_start(&self) -> Point {
        self.baseline_start
    }

    /// The final cursor position
    pub fn baseline_end(&self) -> Point {
        self.baseline_end
    }

    /// Bounds of every part, in part order
    pub fn part_bounds(&self) -> Vec<Bounds> {
        self.placements.iter().map(Placement::bounds).collect()
    }

    /// Bounds of every drawn interaction and module
    pub fn annotation_bounds(&self) -> &[Bounds] {
        &self.annotation_bounds
    }

    /// Union of parts, annotations and additional bounds
    pub fn content_bounds(&self) -> Bounds {
        self.content_bounds
    }

    /// [`content_bounds`](Self::content_bounds) with padding applied
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Lays out and draws a part list.
///
/// # Errors
///
/// [`SbolvError::EmptyConstruct`] for an empty part list, and any error of
/// [`GlyphRenderer::draw_glyph`]. Drawing stops at the first failing part.
pub fn layout_parts(
    renderer: &GlyphRenderer,
    canvas: &mut dyn Canvas,
    request: &LayoutRequest,
) -> Result<LayoutResult, SbolvError> {
    let placed = place_parts(
        renderer,
        canvas,
        &request.parts,
        request.start,
        request.gap,
        request.rotation,
    )?;
    finish(
        canvas,
        request.start,
        placed,
        Vec::new(),
        &request.additional_bounds,
        request.padding,
        request.scale,
    )
}

/// Parts drawn, bounds not yet finalized.
#[derive(Debug)]
pub(crate) struct PlacedParts {
    pub(crate) placements: Vec<Placement>,
    pub(crate) cursor: Point,
    pub(crate) diagnostics: Diagnostics,
}

/// Draws every part in order and tracks the cursor.
pub(crate) fn place_parts(
    renderer: &GlyphRenderer,
    canvas: &mut dyn Canvas,
    parts: &[PartListEntry],
    start: Point,
    gap: f64,
    rotation: f64,
) -> Result<PlacedParts, SbolvError> {
    if parts.is_empty() {
        return Err(SbolvError::EmptyConstruct);
    }

    let mut diagnostics = Diagnostics::new();
    let mut placements = Vec::with_capacity(parts.len());
    let mut cursor = start;

    for (index, entry) in parts.iter().enumerate() {
        let glyph_type = entry.glyph_type();
        let hints = params::layout_hints(entry.parameters());
        let orientation = entry
            .orientation()
            .or(hints.orientation)
            .unwrap_or_default();

        cursor = cursor.with_y(cursor.y() + hints.y_offset);

        let options = GlyphOptions {
            rotation: Some(rotation),
            parameters: entry.parameters(),
            style: entry.style(),
        };
        let (position, glyph_rotation) = match orientation {
            Orientation::Forward => (cursor, rotation),
            Orientation::Reverse => {
                let footprint = renderer
                    .baseline_end(glyph_type, cursor, &options)?
                    .map_or(0.0, |end| cursor.distance(end));
                (cursor.advance(footprint, rotation), rotation + PI)
            }
        };

        let rendered = renderer.draw_glyph(
            canvas,
            glyph_type,
            position,
            &options.with_rotation(glyph_rotation),
        )?;
        let bounds = rendered.bounds();
        let baseline_end = rendered.baseline_end();
        diagnostics.extend(rendered.into_diagnostics());

        cursor = match (orientation, baseline_end) {
            (Orientation::Forward, Some(end)) => end,
            (Orientation::Reverse, Some(_)) => position,
            (_, None) => {
                diagnostics.warn(
                    DiagnosticCode::W007,
                    format!("glyph `{glyph_type}` has no baseline and takes no length"),
                );
                position
            }
        };
        cursor = cursor.with_y(cursor.y() - hints.y_offset);

        if index + 1 < parts.len() {
            cursor = cursor.advance(gap + hints.gap_skew, rotation);
        }

        debug!(
            index,
            glyph_type,
            orientation = orientation.as_str(),
            x = position.x(),
            y = position.y();
            "Placed part"
        );
        placements.push(Placement {
            glyph_type: glyph_type.to_string(),
            orientation,
            position,
            rotation: glyph_rotation,
            bounds,
            baseline_end,
        });
    }

    Ok(PlacedParts {
        placements,
        cursor,
        diagnostics,
    })
}

/// Unions all bounds, pads them and sizes the canvas.
pub(crate) fn finish(
    canvas: &mut dyn Canvas,
    start: Point,
    placed: PlacedParts,
    annotation_bounds: Vec<Bounds>,
    additional_bounds: &[Bounds],
    padding: f64,
    scale: f64,
) -> Result<LayoutResult, SbolvError> {
    let all: Vec<Bounds> = placed
        .placements
        .iter()
        .map(Placement::bounds)
        .chain(annotation_bounds.iter().copied())
        .chain(additional_bounds.iter().copied())
        .collect();
    let content_bounds = find_bound_of_bounds(&all).ok_or(SbolvError::EmptyConstruct)?;

    let bounds = content_bounds.add_padding(Insets::uniform(content_bounds.height() * padding));
    canvas.set_view_bounds(bounds.min_point(), bounds.max_point());
    canvas.resize_to_fit(bounds.width() * scale, bounds.height() * scale);

    info!(
        parts = placed.placements.len(),
        annotations = annotation_bounds.len(),
        width = bounds.width(),
        height = bounds.height();
        "Laid out construct"
    );

    Ok(LayoutResult {
        placements: placed.placements,
        baseline_start: start,
        baseline_end: placed.cursor,
        annotation_bounds,
        content_bounds,
        bounds,
        diagnostics: placed.diagnostics.into_vec(),
    })
}
