//! Interaction arrows between glyphs.
//!
//! An interaction leaves the sending glyph perpendicular to the construct
//! baseline, runs parallel to it at a fixed height and comes back down onto
//! the receiving glyph, where a head mark is drawn. All directions are
//! derived from the construct rotation, so annotations follow rotated
//! constructs.

use std::{
    f64::consts::{FRAC_PI_2, FRAC_PI_4, PI},
    fmt,
    str::FromStr,
};

use kurbo::{BezPath, Circle, Shape};
use log::debug;
use serde::Deserialize;

use sbolv_core::{
    canvas::Canvas,
    color::Color,
    diagnostic::{DiagnosticCode, Diagnostics},
    draw::PathStyle,
    geometry::{Bounds, Point},
};

use crate::{
    error::SbolvError,
    params::{ParamValue, UserParameters},
    transform::{path_vertices, polyline},
};

/// Tolerance used when flattening the degradation circle into curves.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// The head mark of an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    /// Open diamond
    Control,
    /// Filled arrowhead followed by a slashed circle
    Degradation,
    /// Flat bar across the connector
    Inhibition,
    /// Filled triangle
    Process,
    /// Outlined triangle with a white fill
    Stimulation,
}

impl InteractionKind {
    pub const ALL: [Self; 5] = [
        Self::Control,
        Self::Degradation,
        Self::Inhibition,
        Self::Process,
        Self::Stimulation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Control => "control",
            Self::Degradation => "degradation",
            Self::Inhibition => "inhibition",
            Self::Process => "process",
            Self::Stimulation => "stimulation",
        }
    }
}

impl FromStr for InteractionKind {
    type Err = SbolvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SbolvError::InvalidInteractionKind(s.to_string()))
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which glyph the head is drawn on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Head on the receiving glyph
    #[default]
    Forward,
    /// Head on the sending glyph
    Reverse,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forward" => Ok(Self::Forward),
            "reverse" => Ok(Self::Reverse),
            _ => Err(format!(
                "invalid direction `{s}`, valid values: forward, reverse"
            )),
        }
    }
}

/// Which side of the baseline an interaction is drawn on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Above,
    Below,
}

impl Side {
    pub fn flipped(self) -> Self {
        match self {
            Self::Above => Self::Below,
            Self::Below => Self::Above,
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "above" => Ok(Self::Above),
            "below" => Ok(Self::Below),
            _ => Err(format!("invalid side `{s}`, valid values: above, below")),
        }
    }
}

/// Appearance and placement of one interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionParameters {
    pub color: Color,
    /// Height of the connector above the glyph centres
    pub height_skew: f64,
    pub head_height: f64,
    pub head_width: f64,
    pub line_width: f64,
    /// Stacking priority; the connector is drawn at `z_order * 100 - 5`
    pub z_order: i32,
    pub direction: Direction,
    pub side: Side,
    pub sending_xy_skew: Point,
    pub receiving_xy_skew: Point,
    /// Multiplier of `height_skew` for the first connector segment
    pub baseline_distance: f64,
}

impl Default for InteractionParameters {
    fn default() -> Self {
        Self {
            color: Color::default(),
            height_skew: 10.0,
            head_height: 7.0,
            head_width: 7.0,
            line_width: 1.0,
            z_order: 0,
            direction: Direction::Forward,
            side: Side::Above,
            sending_xy_skew: Point::default(),
            receiving_xy_skew: Point::default(),
            baseline_distance: 1.5,
        }
    }
}

enum Rejected {
    UnknownKey,
    Invalid(String),
}

impl InteractionParameters {
    /// Defaults overridden by `map`.
    pub fn from_map(map: &UserParameters, diagnostics: &mut Diagnostics) -> Self {
        Self::default().apply_map(map, diagnostics)
    }

    /// Applies every entry of `map` over `self`.
    ///
    /// Unknown keys are ignored with [`DiagnosticCode::W004`] and malformed
    /// values with [`DiagnosticCode::W006`]. Both the matplotlib-style names
    /// (`heightskew`, `headheight`, `headwidth`, `linewidth`, `zorder`) and
    /// their snake_case forms are accepted.
    pub fn apply_map(mut self, map: &UserParameters, diagnostics: &mut Diagnostics) -> Self {
        for (key, value) in map {
            match self.apply_entry(key, value) {
                Ok(()) => {}
                Err(Rejected::UnknownKey) => diagnostics.warn(
                    DiagnosticCode::W004,
                    format!("interaction parameter `{key}` is not recognized"),
                ),
                Err(Rejected::Invalid(message)) => diagnostics.warn(
                    DiagnosticCode::W006,
                    format!("interaction parameter `{key}`: {message}"),
                ),
            }
        }
        self
    }

    fn apply_entry(&mut self, key: &str, value: &ParamValue) -> Result<(), Rejected> {
        match key {
            "color" => self.color = parse_color(value)?,
            "heightskew" | "height_skew" => self.height_skew = number(value)?,
            "headheight" | "head_height" => self.head_height = number(value)?,
            "headwidth" | "head_width" => self.head_width = number(value)?,
            "linewidth" | "line_width" => self.line_width = number(value)?,
            "zorder" | "z_order" => self.z_order = number(value)?.round() as i32,
            "baseline_distance" => self.baseline_distance = number(value)?,
            "direction" => self.direction = text(value)?.parse().map_err(Rejected::Invalid)?,
            "side" => self.side = text(value)?.parse().map_err(Rejected::Invalid)?,
            "sending_xy_skew" => self.sending_xy_skew = pair(value)?,
            "receiving_xy_skew" => self.receiving_xy_skew = pair(value)?,
            _ => return Err(Rejected::UnknownKey),
        }
        Ok(())
    }

    fn stroke(&self) -> PathStyle {
        PathStyle::outline(self.color, self.line_width)
    }
}

fn number(value: &ParamValue) -> Result<f64, Rejected> {
    value
        .as_number()
        .ok_or_else(|| Rejected::Invalid(format!("expected a number, found {}", value.kind())))
}

fn text(value: &ParamValue) -> Result<&str, Rejected> {
    value
        .as_text()
        .ok_or_else(|| Rejected::Invalid(format!("expected text, found {}", value.kind())))
}

fn pair(value: &ParamValue) -> Result<Point, Rejected> {
    match value.as_list() {
        Some([x, y]) => Ok(Point::new(*x, *y)),
        _ => Err(Rejected::Invalid(
            "expected a list of two numbers".to_string(),
        )),
    }
}

fn parse_color(value: &ParamValue) -> Result<Color, Rejected> {
    match value {
        ParamValue::Text(text) => Color::new(text).map_err(Rejected::Invalid),
        ParamValue::List(values) => match values.as_slice() {
            [r, g, b] => Ok(Color::from_unit_rgb(*r, *g, *b)),
            _ => Err(Rejected::Invalid(
                "expected three channel values between 0 and 1".to_string(),
            )),
        },
        other => Err(Rejected::Invalid(format!(
            "expected a color, found {}",
            other.kind()
        ))),
    }
}

/// Draws an interaction from `sending` to `receiving`.
///
/// Both glyphs are represented by their world bounds; the connector starts
/// and ends above their centres. `rotation` is the construct rotation in
/// radians. Returns the bounds of the connector and the head.
pub fn draw_interaction(
    canvas: &mut dyn Canvas,
    sending: Bounds,
    receiving: Bounds,
    kind: InteractionKind,
    params: &InteractionParameters,
    rotation: f64,
) -> Bounds {
    let angle = match params.side {
        Side::Above => rotation,
        Side::Below => rotation + PI,
    };
    let normal = angle + FRAC_PI_2;

    let mut initial = params.height_skew * params.baseline_distance;
    if kind == InteractionKind::Degradation {
        initial *= 2.0;
    }
    let rise = params.height_skew * 2.0;

    let sending_anchor = sending
        .center()
        .advance(initial, normal)
        .add_point(params.sending_xy_skew);
    let receiving_anchor = receiving
        .center()
        .advance(initial, normal)
        .add_point(params.receiving_xy_skew);
    let (start, end) = match params.direction {
        Direction::Forward => (sending_anchor, receiving_anchor),
        Direction::Reverse => (receiving_anchor, sending_anchor),
    };

    let base_z = params.z_order * 100;
    let mut vertices = Vec::new();

    let connector = polyline(
        &[
            start,
            start.advance(rise, normal),
            end.advance(rise, normal),
            end,
        ],
        false,
    );
    emit(
        canvas,
        &mut vertices,
        &connector,
        &params.stroke().with_z_order(base_z - 5),
    );
    draw_head(canvas, &mut vertices, kind, end, angle, params);

    debug!(kind = kind.as_str(), start:?, end:?; "Drew interaction");
    Bounds::from_points(vertices).unwrap_or_else(|| Bounds::from_point(end))
}

/// [`draw_interaction`] with the kind given by name.
///
/// # Errors
///
/// [`SbolvError::InvalidInteractionKind`] when `kind` is not one of the
/// five interaction kinds. Nothing is drawn in that case.
pub fn draw_interaction_named(
    canvas: &mut dyn Canvas,
    sending: Bounds,
    receiving: Bounds,
    kind: &str,
    params: &InteractionParameters,
    rotation: f64,
) -> Result<Bounds, SbolvError> {
    let kind = kind.parse::<InteractionKind>()?;
    Ok(draw_interaction(
        canvas, sending, receiving, kind, params, rotation,
    ))
}

fn emit(canvas: &mut dyn Canvas, vertices: &mut Vec<Point>, path: &BezPath, style: &PathStyle) {
    vertices.extend(path_vertices(path));
    canvas.add_filled_stroked_path(path, style);
}

/// Draws the head mark with its tip at `tip`, pointing towards the glyph.
fn draw_head(
    canvas: &mut dyn Canvas,
    vertices: &mut Vec<Point>,
    kind: InteractionKind,
    tip: Point,
    angle: f64,
    params: &InteractionParameters,
) {
    let z_order = params.z_order * 100;
    let half_width = params.head_width / 2.0;
    let inward = angle - FRAC_PI_2;

    let outline = params.stroke().with_z_order(z_order);
    let solid = outline.clone().with_fill(params.color);
    let hollow = outline.clone().with_fill(Color::white());

    let base1 = tip.advance(half_width, angle);
    let base2 = tip.advance(half_width, angle + PI);
    let point = tip.advance(params.head_height, inward);

    match kind {
        InteractionKind::Control => {
            let side1 = tip.advance(half_width, angle - FRAC_PI_4);
            let far = side1.advance(half_width, angle - 3.0 * FRAC_PI_4);
            let side2 = tip.advance(half_width, angle - 3.0 * FRAC_PI_4);
            let diamond = polyline(&[tip, side1, far, side2, tip], false);
            emit(canvas, vertices, &diamond, &outline);
        }
        InteractionKind::Degradation => {
            let arrow = polyline(&[tip, base1, point, base2], true);
            emit(canvas, vertices, &arrow, &solid);

            let center = tip.advance(2.0 * params.head_height + half_width, inward);
            let circle = Circle::new(center, half_width).to_path(CIRCLE_TOLERANCE);
            emit(canvas, vertices, &circle, &hollow);

            let slash = polyline(
                &[
                    center.advance(half_width, angle + FRAC_PI_4),
                    center.advance(half_width, angle + PI + FRAC_PI_4),
                ],
                false,
            );
            emit(
                canvas,
                vertices,
                &slash,
                &outline.clone().with_z_order(z_order + 500),
            );
        }
        InteractionKind::Inhibition => {
            let bar = polyline(&[base1, base2], false);
            emit(canvas, vertices, &bar, &outline);
        }
        InteractionKind::Process => {
            let triangle = polyline(&[tip, base1, point, base2], true);
            emit(canvas, vertices, &triangle, &solid);
        }
        InteractionKind::Stimulation => {
            let triangle = polyline(&[tip, base1, point, base2, tip], true);
            emit(canvas, vertices, &triangle, &hollow);
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use sbolv_core::canvas::{NullCanvas, RecordingCanvas};

    use super::*;

    fn sending() -> Bounds {
        Bounds::new(Point::new(0.0, -5.0), Point::new(10.0, 5.0))
    }

    fn receiving() -> Bounds {
        Bounds::new(Point::new(20.0, -5.0), Point::new(30.0, 5.0))
    }

    fn assert_bounds_eq(actual: Bounds, min: (f64, f64), max: (f64, f64)) {
        assert_approx_eq!(f64, actual.min_x(), min.0, epsilon = 1e-9);
        assert_approx_eq!(f64, actual.min_y(), min.1, epsilon = 1e-9);
        assert_approx_eq!(f64, actual.max_x(), max.0, epsilon = 1e-9);
        assert_approx_eq!(f64, actual.max_y(), max.1, epsilon = 1e-9);
    }

    #[test]
    fn test_kind_names() {
        for kind in InteractionKind::ALL {
            assert_eq!(kind.to_string().parse::<InteractionKind>().unwrap(), kind);
        }
        let err = "bogus".parse::<InteractionKind>().unwrap_err();
        assert!(matches!(err, SbolvError::InvalidInteractionKind(name) if name == "bogus"));
    }

    #[test]
    fn test_process_geometry() {
        let mut canvas = RecordingCanvas::new();
        let bounds = draw_interaction(
            &mut canvas,
            sending(),
            receiving(),
            InteractionKind::Process,
            &InteractionParameters::default(),
            0.0,
        );

        // Connector (5,15) (5,35) (25,35) (25,15); head down to (25,8)
        assert_bounds_eq(bounds, (5.0, 8.0), (28.5, 35.0));

        let styles: Vec<_> = canvas.paths().map(|(_, style)| style.clone()).collect();
        assert_eq!(styles.len(), 2);
        assert_eq!(styles[0].z_order(), -5);
        assert_eq!(styles[0].fill(), None);
        assert_eq!(styles[1].z_order(), 0);
        assert_eq!(styles[1].fill(), Some(Color::default()));
    }

    #[test]
    fn test_reverse_direction_moves_head() {
        let params = InteractionParameters {
            direction: Direction::Reverse,
            ..InteractionParameters::default()
        };
        let bounds = draw_interaction(
            &mut NullCanvas,
            sending(),
            receiving(),
            InteractionKind::Inhibition,
            &params,
            0.0,
        );

        // Bar centred on the sending anchor at x = 5
        assert_bounds_eq(bounds, (1.5, 15.0), (25.0, 35.0));
    }

    #[test]
    fn test_below_side_mirrors() {
        let params = InteractionParameters {
            side: Side::Below,
            ..InteractionParameters::default()
        };
        let bounds = draw_interaction(
            &mut NullCanvas,
            sending(),
            receiving(),
            InteractionKind::Process,
            &params,
            0.0,
        );

        assert_bounds_eq(bounds, (5.0, -35.0), (28.5, -8.0));
    }

    #[test]
    fn test_follows_construct_rotation() {
        let up = Bounds::new(Point::new(-5.0, 0.0), Point::new(5.0, 10.0));
        let higher = Bounds::new(Point::new(-5.0, 20.0), Point::new(5.0, 30.0));
        let bounds = draw_interaction(
            &mut NullCanvas,
            up,
            higher,
            InteractionKind::Inhibition,
            &InteractionParameters::default(),
            FRAC_PI_2,
        );

        // Normal points to -x; bar spans the construct direction
        assert_bounds_eq(bounds, (-35.0, 5.0), (-15.0, 28.5));
    }

    #[test]
    fn test_degradation_parts() {
        let mut canvas = RecordingCanvas::new();
        let bounds = draw_interaction(
            &mut canvas,
            sending(),
            receiving(),
            InteractionKind::Degradation,
            &InteractionParameters::default(),
            0.0,
        );

        let z_orders: Vec<_> = canvas.paths().map(|(_, style)| style.z_order()).collect();
        assert_eq!(z_orders, vec![-5, 0, 0, 500]);

        // Doubled first segment puts the tip at y = 30; circle centre at 12.5
        assert_approx_eq!(f64, bounds.max_y(), 50.0, epsilon = 1e-9);
        assert!(bounds.min_y() < 10.0);
        let circle_fill = canvas.paths().nth(2).unwrap().1.fill();
        assert_eq!(circle_fill, Some(Color::white()));
    }

    #[test]
    fn test_skews_apply_to_their_own_end() {
        let params = InteractionParameters {
            sending_xy_skew: Point::new(-2.0, 0.0),
            receiving_xy_skew: Point::new(0.0, 3.0),
            ..InteractionParameters::default()
        };
        let bounds = draw_interaction(
            &mut NullCanvas,
            sending(),
            receiving(),
            InteractionKind::Inhibition,
            &params,
            0.0,
        );

        assert_bounds_eq(bounds, (3.0, 15.0), (28.5, 38.0));
    }

    #[test]
    fn test_named_kind() {
        let params = InteractionParameters::default();
        let mut canvas = RecordingCanvas::new();

        assert!(
            draw_interaction_named(&mut canvas, sending(), receiving(), "control", &params, 0.0)
                .is_ok()
        );
        let err =
            draw_interaction_named(&mut canvas, sending(), receiving(), "bogus", &params, 0.0)
                .unwrap_err();
        assert!(matches!(err, SbolvError::InvalidInteractionKind(_)));
        assert_eq!(canvas.paths().count(), 2);
    }

    #[test]
    fn test_parameters_from_map() {
        let mut map = UserParameters::new();
        map.insert("color".to_string(), ParamValue::List(vec![1.0, 0.0, 0.0]));
        map.insert("heightskew".to_string(), ParamValue::Number(4.0));
        map.insert("zorder".to_string(), ParamValue::Number(2.0));
        map.insert("direction".to_string(), ParamValue::from("reverse"));
        map.insert("receiving_xy_skew".to_string(), ParamValue::List(vec![1.0, 2.0]));

        let mut diagnostics = Diagnostics::new();
        let params = InteractionParameters::from_map(&map, &mut diagnostics);

        assert!(diagnostics.is_empty());
        assert_eq!(params.color, Color::from_unit_rgb(1.0, 0.0, 0.0));
        assert_eq!(params.height_skew, 4.0);
        assert_eq!(params.z_order, 2);
        assert_eq!(params.direction, Direction::Reverse);
        assert_eq!(params.receiving_xy_skew, Point::new(1.0, 2.0));
        assert_eq!(params.head_width, 7.0);
    }

    #[test]
    fn test_bad_parameters_warn() {
        let mut map = UserParameters::new();
        map.insert("arrow_style".to_string(), ParamValue::Number(1.0));
        map.insert("head_width".to_string(), ParamValue::from("wide"));
        map.insert("side".to_string(), ParamValue::from("left"));
        map.insert("sending_xy_skew".to_string(), ParamValue::List(vec![1.0]));

        let mut diagnostics = Diagnostics::new();
        let params = InteractionParameters::from_map(&map, &mut diagnostics);

        assert_eq!(params, InteractionParameters::default());
        assert_eq!(diagnostics.count_code(DiagnosticCode::W004), 1);
        assert_eq!(diagnostics.count_code(DiagnosticCode::W006), 3);
    }
}
