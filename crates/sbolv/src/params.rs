//! Parameter resolution for a single glyph draw.
//!
//! User parameters arrive as a loosely typed map, because they come from
//! design files and scripts. Resolution merges them over the glyph's
//! template defaults, pulls out the orchestration-only pseudo-keys, and
//! reports every questionable entry as a warning instead of failing:
//!
//! | Key | Consumed by | Value |
//! |-----|-------------|-------|
//! | `rotation` | renderer | radians |
//! | `y_offset` | layout | world units |
//! | `orientation` | layout | `"forward"` or `"reverse"` |
//! | `gap_skew` | layout | world units |
//! | `label_parameters` | renderer | a [`LabelSpec`] table |
//!
//! Pseudo-keys never reach the expression evaluator.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use log::trace;
use serde::Deserialize;

use sbolv_core::{
    color::Color,
    diagnostic::{DiagnosticCode, Diagnostics},
    draw::{FontSpec, StyleMap},
};
use sbolv_template::{GlyphDefinition, Parameters};

const ROTATION_KEY: &str = "rotation";
const Y_OFFSET_KEY: &str = "y_offset";
const ORIENTATION_KEY: &str = "orientation";
const GAP_SKEW_KEY: &str = "gap_skew";
const LABEL_KEY: &str = "label_parameters";

/// Caller-supplied parameter overrides, keyed by parameter name.
pub type UserParameters = IndexMap<String, ParamValue>;

/// Caller-supplied style overrides, keyed by path id.
pub type UserStyle = IndexMap<String, StyleMap>;

/// Direction a glyph faces along the construct baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Forward,
    Reverse,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Reverse => "reverse",
        }
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forward" => Ok(Self::Forward),
            "reverse" => Ok(Self::Reverse),
            _ => Err(format!(
                "invalid orientation `{s}`, valid values: forward, reverse"
            )),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A color as written in a design: a CSS string or a 0-1 RGB triple.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Rgb([f64; 3]),
    Css(String),
}

impl ColorSpec {
    pub fn to_color(&self) -> Result<Color, String> {
        match self {
            Self::Rgb([r, g, b]) => Ok(Color::from_unit_rgb(*r, *g, *b)),
            Self::Css(text) => Color::new(text),
        }
    }
}

/// Text label attached to a glyph.
///
/// The label is centered on the centroid of the glyph's drawn paths,
/// shifted by `xy_skew`. `rotation` is in radians.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelSpec {
    pub text: String,
    #[serde(default)]
    pub color: Option<ColorSpec>,
    #[serde(default)]
    pub xy_skew: [f64; 2],
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub font: FontSpec,
}

impl LabelSpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
            xy_skew: [0.0, 0.0],
            rotation: 0.0,
            font: FontSpec::default(),
        }
    }

    pub fn with_color(mut self, color: ColorSpec) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_skew(mut self, x: f64, y: f64) -> Self {
        self.xy_skew = [x, y];
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }
}

/// A single user parameter value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    List(Vec<f64>),
    Text(String),
    Label(LabelSpec),
}

impl ParamValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[f64]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }

    /// Short description of the value kind, for messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::List(_) => "list",
            Self::Text(_) => "text",
            Self::Label(_) => "label",
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<f64>> for ParamValue {
    fn from(values: Vec<f64>) -> Self {
        Self::List(values)
    }
}

impl From<LabelSpec> for ParamValue {
    fn from(label: LabelSpec) -> Self {
        Self::Label(label)
    }
}

/// Parameters after merging user overrides over template defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParameters {
    /// Numeric bindings for the template expressions
    pub parameters: Parameters,
    /// Effective rotation in radians
    pub rotation: f64,
    pub y_offset: f64,
    pub orientation: Orientation,
    pub gap_skew: f64,
    pub label: Option<LabelSpec>,
}

/// Layout-relevant pseudo-keys of a user parameter map.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutHints {
    pub y_offset: f64,
    pub orientation: Option<Orientation>,
    pub gap_skew: f64,
}

/// Merges `user` over the defaults of `glyph`.
///
/// Rotation precedence: `explicit_rotation`, then the `rotation` key of
/// `user`, then 0.
///
/// Keys unknown to the template are merged anyway and reported as
/// [`DiagnosticCode::W001`]. Values of the wrong type are skipped with
/// [`DiagnosticCode::W006`]; an unrecognized orientation is ignored with
/// [`DiagnosticCode::W008`].
pub fn resolve(
    glyph: &GlyphDefinition,
    user: Option<&UserParameters>,
    explicit_rotation: Option<f64>,
    diagnostics: &mut Diagnostics,
) -> ResolvedParameters {
    let glyph_type = glyph.glyph_type();
    let mut parameters = glyph.defaults().clone();
    let mut user_rotation = None;
    let mut y_offset = 0.0;
    let mut orientation = Orientation::Forward;
    let mut gap_skew = 0.0;
    let mut label = None;

    for (key, value) in user.into_iter().flatten() {
        match key.as_str() {
            ROTATION_KEY => {
                if let Some(number) = expect_number(glyph_type, key, value, diagnostics) {
                    user_rotation = Some(number);
                }
            }
            Y_OFFSET_KEY => {
                if let Some(number) = expect_number(glyph_type, key, value, diagnostics) {
                    y_offset = number;
                }
            }
            GAP_SKEW_KEY => {
                if let Some(number) = expect_number(glyph_type, key, value, diagnostics) {
                    gap_skew = number;
                }
            }
            ORIENTATION_KEY => match value.as_text().map(str::parse::<Orientation>) {
                Some(Ok(parsed)) => orientation = parsed,
                Some(Err(message)) => diagnostics.warn(
                    DiagnosticCode::W008,
                    format!("{message} for glyph `{glyph_type}`"),
                ),
                None => diagnostics.warn(
                    DiagnosticCode::W008,
                    format!(
                        "orientation of glyph `{glyph_type}` must be text, found {}",
                        value.kind()
                    ),
                ),
            },
            LABEL_KEY => match value {
                ParamValue::Label(spec) => label = Some(spec.clone()),
                other => diagnostics.warn(
                    DiagnosticCode::W006,
                    format!(
                        "`{LABEL_KEY}` of glyph `{glyph_type}` must be a label table, found {}",
                        other.kind()
                    ),
                ),
            },
            _ => {
                if !glyph.has_parameter(key) {
                    diagnostics.warn(
                        DiagnosticCode::W001,
                        format!("parameter `{key}` is not valid for glyph `{glyph_type}`"),
                    );
                }
                if let Some(number) = expect_number(glyph_type, key, value, diagnostics) {
                    parameters.insert(key.clone(), number);
                }
            }
        }
    }

    let rotation = explicit_rotation.or(user_rotation).unwrap_or(0.0);
    trace!(glyph_type, parameters:?; "Resolved glyph parameters");

    ResolvedParameters {
        parameters,
        rotation,
        y_offset,
        orientation,
        gap_skew,
        label,
    }
}

/// Reads the layout pseudo-keys without reporting anything.
///
/// Malformed values read as their defaults; [`resolve`] reports them when
/// the glyph is drawn.
pub fn layout_hints(user: Option<&UserParameters>) -> LayoutHints {
    let Some(user) = user else {
        return LayoutHints::default();
    };
    let number = |key: &str| user.get(key).and_then(ParamValue::as_number);
    LayoutHints {
        y_offset: number(Y_OFFSET_KEY).unwrap_or(0.0),
        orientation: user
            .get(ORIENTATION_KEY)
            .and_then(ParamValue::as_text)
            .and_then(|text| text.parse().ok()),
        gap_skew: number(GAP_SKEW_KEY).unwrap_or(0.0),
    }
}

fn expect_number(
    glyph_type: &str,
    key: &str,
    value: &ParamValue,
    diagnostics: &mut Diagnostics,
) -> Option<f64> {
    let number = value.as_number();
    if number.is_none() {
        diagnostics.warn(
            DiagnosticCode::W006,
            format!(
                "parameter `{key}` of glyph `{glyph_type}` must be a number, found {}",
                value.kind()
            ),
        );
    }
    number
}

/// Reports style overrides that target path ids the glyph does not have.
pub fn validate_style(glyph: &GlyphDefinition, user_style: &UserStyle, diagnostics: &mut Diagnostics) {
    for path_id in user_style.keys() {
        if !glyph.has_path_id(path_id) {
            diagnostics.warn(
                DiagnosticCode::W002,
                format!(
                    "style targets path `{path_id}`, which glyph `{}` does not have",
                    glyph.glyph_type()
                ),
            );
        }
    }
}

/// Merges a user style over a path's template style.
///
/// The template style defines which properties may be set: a user property
/// the template does not declare is dropped with [`DiagnosticCode::W003`].
pub fn merge_style(
    template_style: &StyleMap,
    user_style: &StyleMap,
    path_id: &str,
    diagnostics: &mut Diagnostics,
) -> StyleMap {
    let mut merged = template_style.clone();
    for (property, value) in user_style.iter() {
        if template_style.contains(*property) {
            merged.insert(*property, value.clone());
        } else {
            diagnostics.warn(
                DiagnosticCode::W003,
                format!("style property `{property}` is not valid for path `{path_id}`"),
            );
        }
    }
    merged
}
