//! Single-glyph rendering.
//!
//! [`GlyphRenderer::draw_glyph`] is the one code path for everything that
//! needs glyph geometry. Bounds and baseline queries run it against a
//! [`NullCanvas`] so that they can never disagree with a real draw.

use kurbo::BezPath;
use log::debug;

use sbolv_core::{
    canvas::{Canvas, NullCanvas},
    color::Color,
    diagnostic::{Diagnostic, DiagnosticCode, Diagnostics},
    draw::PathStyle,
    geometry::{Bounds, Point},
};
use sbolv_template::{
    ExpressionError, GlyphDefinition, GlyphLibrary, Parameters, PathFragment, TemplateError,
};

use crate::{
    error::SbolvError,
    params::{self, LabelSpec, UserParameters, UserStyle},
    transform::{path_vertices, transform},
};

/// Per-call options for [`GlyphRenderer::draw_glyph`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GlyphOptions<'a> {
    /// Rotation in radians; overrides a `rotation` user parameter
    pub rotation: Option<f64>,
    pub parameters: Option<&'a UserParameters>,
    pub style: Option<&'a UserStyle>,
}

impl<'a> GlyphOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_parameters(mut self, parameters: &'a UserParameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn with_style(mut self, style: &'a UserStyle) -> Self {
        self.style = Some(style);
        self
    }
}

/// One path as emitted to the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPath {
    pub id: Option<String>,
    /// World-space geometry
    pub path: BezPath,
    pub style: PathStyle,
}

/// Result of drawing one glyph.
#[derive(Debug, Clone)]
pub struct RenderedGlyph {
    paths: Vec<RenderedPath>,
    bounds: Bounds,
    baseline_end: Option<Point>,
    label_position: Option<Point>,
    diagnostics: Vec<Diagnostic>,
}

impl RenderedGlyph {
    pub fn paths(&self) -> &[RenderedPath] {
        &self.paths
    }

    /// Axis-aligned bounds over every drawn vertex
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Terminal vertex of the placed baseline, if the glyph has one
    pub fn baseline_end(&self) -> Option<Point> {
        self.baseline_end
    }

    /// Where the label was anchored, if one was drawn
    pub fn label_position(&self) -> Option<Point> {
        self.label_position
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Draws glyphs from a [`GlyphLibrary`].
#[derive(Debug, Clone)]
pub struct GlyphRenderer {
    library: GlyphLibrary,
}

impl GlyphRenderer {
    pub fn new(library: GlyphLibrary) -> Self {
        Self { library }
    }

    /// A renderer over the built-in glyph set.
    pub fn builtin() -> Result<Self, SbolvError> {
        Ok(Self::new(GlyphLibrary::builtin()?))
    }

    pub fn library(&self) -> &GlyphLibrary {
        &self.library
    }

    /// Looks up a glyph definition.
    pub fn glyph(&self, glyph_type: &str) -> Result<&GlyphDefinition, SbolvError> {
        self.library
            .get(glyph_type)
            .ok_or_else(|| SbolvError::UnknownGlyph(glyph_type.to_string()))
    }

    /// Draws `glyph_type` with its anchor at `position`.
    ///
    /// Every drawable path is evaluated with the resolved parameters,
    /// placed in world space, styled and emitted to `canvas`. A label is
    /// emitted when the parameters carry one.
    ///
    /// # Errors
    ///
    /// [`SbolvError::UnknownGlyph`] for a type missing from the library, and
    /// [`SbolvError::Template`] when a path expression cannot be evaluated
    /// with the resolved parameters.
    pub fn draw_glyph(
        &self,
        canvas: &mut dyn Canvas,
        glyph_type: &str,
        position: Point,
        options: &GlyphOptions<'_>,
    ) -> Result<RenderedGlyph, SbolvError> {
        let glyph = self.glyph(glyph_type)?;
        let mut diagnostics = Diagnostics::new();

        let resolved = params::resolve(glyph, options.parameters, options.rotation, &mut diagnostics);
        if let Some(user_style) = options.style {
            params::validate_style(glyph, user_style, &mut diagnostics);
        }
        // The flip axis is the template's own baseline, whatever the user set
        let baseline_y = glyph.defaults().get("baseline_y").copied().unwrap_or(0.0);

        let mut paths = Vec::new();
        let mut path_points = Vec::new();
        for fragment in glyph.drawable_paths() {
            let template_path = evaluate_fragment(glyph, fragment, &resolved.parameters)?;
            let placed = transform(&template_path, baseline_y, position, resolved.rotation);

            let mut style = fragment.style().clone();
            if let (Some(id), Some(user_style)) = (fragment.id(), options.style) {
                if let Some(overrides) = user_style.get(id) {
                    style = params::merge_style(fragment.style(), overrides, id, &mut diagnostics);
                }
            }
            let style = style.to_path_style(0);

            canvas.add_filled_stroked_path(&placed, &style);
            path_points.push(path_vertices(&placed));
            paths.push(RenderedPath {
                id: fragment.id().map(str::to_string),
                path: placed,
                style,
            });
        }

        let bounds = Bounds::from_points(path_points.iter().flatten().copied())
            .unwrap_or_else(|| Bounds::from_point(position));

        let baseline_end = match glyph.baseline_path() {
            Some(fragment) => {
                let template_path = evaluate_fragment(glyph, fragment, &resolved.parameters)?;
                let placed = transform(&template_path, baseline_y, position, resolved.rotation);
                path_vertices(&placed).last().copied()
            }
            None => None,
        };

        let label_position = match &resolved.label {
            Some(label) => Some(draw_label(
                canvas,
                label,
                &path_points,
                position,
                &mut diagnostics,
            )),
            None => None,
        };

        debug!(
            glyph_type,
            x = position.x(),
            y = position.y(),
            rotation = resolved.rotation,
            paths = paths.len();
            "Drew glyph"
        );

        Ok(RenderedGlyph {
            paths,
            bounds,
            baseline_end,
            label_position,
            diagnostics: diagnostics.into_vec(),
        })
    }

    /// Bounds of a glyph without emitting anything.
    pub fn glyph_bounds(
        &self,
        glyph_type: &str,
        position: Point,
        options: &GlyphOptions<'_>,
    ) -> Result<Bounds, SbolvError> {
        Ok(self
            .draw_glyph(&mut NullCanvas, glyph_type, position, options)?
            .bounds())
    }

    /// Baseline exit point of a glyph without emitting anything.
    pub fn baseline_end(
        &self,
        glyph_type: &str,
        position: Point,
        options: &GlyphOptions<'_>,
    ) -> Result<Option<Point>, SbolvError> {
        Ok(self
            .draw_glyph(&mut NullCanvas, glyph_type, position, options)?
            .baseline_end())
    }
}

fn evaluate_fragment(
    glyph: &GlyphDefinition,
    fragment: &PathFragment,
    parameters: &Parameters,
) -> Result<BezPath, SbolvError> {
    let expression_error = |source: ExpressionError| TemplateError::Expression {
        glyph_type: glyph.glyph_type().to_string(),
        source,
    };
    let data = fragment
        .template()
        .render(parameters)
        .map_err(expression_error)?;
    BezPath::from_svg(&data).map_err(|err| {
        SbolvError::Template(TemplateError::PathSyntax {
            glyph_type: glyph.glyph_type().to_string(),
            path: data.clone(),
            message: err.to_string(),
        })
    })
}

fn draw_label(
    canvas: &mut dyn Canvas,
    label: &LabelSpec,
    path_points: &[Vec<Point>],
    position: Point,
    diagnostics: &mut Diagnostics,
) -> Point {
    let skew = Point::new(label.xy_skew[0], label.xy_skew[1]);
    let anchor =
        centroid_of_paths(path_points, skew).unwrap_or_else(|| position.add_point(skew));

    let color = match label.color.as_ref().map(|spec| spec.to_color()) {
        Some(Ok(color)) => color,
        Some(Err(message)) => {
            diagnostics.warn(DiagnosticCode::W006, format!("label color: {message}"));
            Color::default()
        }
        None => Color::default(),
    };

    canvas.add_text(
        anchor,
        &label.text,
        color,
        label.rotation.to_degrees(),
        &label.font,
    );
    anchor
}

/// Centroid of a set of placed paths, shifted by `skew`.
///
/// Each path's own vertex mean is computed first and the means are then
/// averaged, so every path weighs the same regardless of its vertex count.
/// Returns `None` when no path has a vertex.
///
/// # Examples
///
/// ```
/// use sbolv::geometry::Point;
/// use sbolv::renderer::centroid_of_paths;
///
/// let square = vec![
///     Point::new(0.0, 0.0),
///     Point::new(2.0, 0.0),
///     Point::new(2.0, 2.0),
///     Point::new(0.0, 2.0),
/// ];
/// let dot = vec![Point::new(10.0, 1.0)];
///
/// let centroid = centroid_of_paths(&[square, dot], Point::new(0.0, 1.0)).unwrap();
/// assert_eq!(centroid, Point::new(5.5, 2.0));
/// ```
pub fn centroid_of_paths(paths: &[Vec<Point>], skew: Point) -> Option<Point> {
    let means: Vec<Point> = paths
        .iter()
        .filter(|vertices| !vertices.is_empty())
        .map(|vertices| mean(vertices))
        .collect();
    if means.is_empty() {
        return None;
    }
    Some(mean(&means).add_point(skew))
}

fn mean(points: &[Point]) -> Point {
    let sum = points
        .iter()
        .fold(Point::default(), |acc, point| acc.add_point(*point));
    sum.scale(1.0 / points.len() as f64)
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    const GLYPHS: [&str; 5] = ["CDS", "Promoter", "RibosomeEntrySite", "Terminator", "Operator"];

    /// Every emitted vertex lies inside the reported bounds.
    fn check_vertices_within_bounds(
        glyph_type: &str,
        position: (f64, f64),
        rotation: f64,
    ) -> Result<(), TestCaseError> {
        let renderer = GlyphRenderer::builtin().unwrap();
        let rendered = renderer
            .draw_glyph(
                &mut NullCanvas,
                glyph_type,
                position.into(),
                &GlyphOptions::new().with_rotation(rotation),
            )
            .unwrap();

        let bounds = rendered.bounds();
        for path in rendered.paths() {
            for vertex in path_vertices(&path.path) {
                prop_assert!(bounds.contains_point(vertex));
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn vertices_within_bounds(
            glyph_type in prop::sample::select(GLYPHS.to_vec()),
            position in (-1000.0f64..1000.0, -1000.0f64..1000.0),
            rotation in -7.0f64..7.0,
        ) {
            check_vertices_within_bounds(glyph_type, position, rotation)?;
        }
    }
}
