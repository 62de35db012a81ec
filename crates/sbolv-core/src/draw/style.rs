//! Fill and stroke styling for glyph paths.
//!
//! Glyph templates declare a style block per path using a fixed vocabulary
//! of three properties. Values are written as `rgb(...)`/`rgba(...)` triples,
//! CSS colors, `none`, or bare numbers with an optional `pt` suffix. Callers
//! override those blocks per path id with a [`StyleMap`] of their own.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use log::debug;

use crate::{
    color::Color,
    draw::{StrokeDefinition, StrokeStyle},
};

/// A style property in the glyph style vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleProperty {
    /// Interior color of a closed path
    Fill,
    /// Outline color
    Stroke,
    /// Outline width
    StrokeWidth,
}

impl StyleProperty {
    /// Returns the SVG property name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Stroke => "stroke",
            Self::StrokeWidth => "stroke-width",
        }
    }
}

impl FromStr for StyleProperty {
    type Err = String;

    /// Accepts the SVG names and the plotting-style aliases
    /// (`facecolor`, `edgecolor`, `linewidth`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fill" | "facecolor" => Ok(Self::Fill),
            "stroke" | "edgecolor" => Ok(Self::Stroke),
            "stroke-width" | "stroke_width" | "linewidth" | "lw" => Ok(Self::StrokeWidth),
            _ => Err(format!(
                "unknown style property `{s}`, valid values: fill, stroke, stroke-width"
            )),
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value of a style property.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Color(Color),
    Number(f64),
    /// Explicitly disabled (`none`)
    None,
}

impl StyleValue {
    /// Parses a style value as written in a template style block.
    ///
    /// # Examples
    ///
    /// ```
    /// use sbolv_core::draw::StyleValue;
    ///
    /// assert_eq!(StyleValue::parse("2pt").unwrap(), StyleValue::Number(2.0));
    /// assert_eq!(StyleValue::parse("none").unwrap(), StyleValue::None);
    /// assert!(matches!(StyleValue::parse("rgb(255,0,0)").unwrap(), StyleValue::Color(_)));
    /// ```
    pub fn parse(text: &str) -> Result<Self, String> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("none") {
            return Ok(Self::None);
        }
        if let Some(inner) = text
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let channels = parse_channels(inner, 4, text)?;
            let color = Color::from_rgb255(channels[0], channels[1], channels[2])
                .with_alpha(channels[3].clamp(0.0, 1.0) as f32);
            return Ok(Self::Color(color));
        }
        if let Some(inner) = text
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let channels = parse_channels(inner, 3, text)?;
            return Ok(Self::Color(Color::from_rgb255(
                channels[0],
                channels[1],
                channels[2],
            )));
        }
        let numeric = text.strip_suffix("pt").unwrap_or(text).trim();
        if let Ok(number) = numeric.parse::<f64>() {
            return Ok(Self::Number(number));
        }
        Color::new(text).map(Self::Color)
    }

    /// Returns the color if this value is one
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(color) => Some(*color),
            _ => None,
        }
    }

    /// Returns the number if this value is one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }
}

fn parse_channels(inner: &str, expected: usize, original: &str) -> Result<Vec<f64>, String> {
    let channels = inner
        .split(',')
        .map(|c| c.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| format!("invalid color `{original}`: {err}"))?;
    if channels.len() != expected {
        return Err(format!(
            "invalid color `{original}`: expected {expected} channels, found {}",
            channels.len()
        ));
    }
    Ok(channels)
}

/// An ordered set of style declarations for one path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMap {
    entries: IndexMap<StyleProperty, StyleValue>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an SVG `style` attribute (`fill:rgb(0,0,0);stroke-width:1pt`).
    ///
    /// Properties outside the glyph vocabulary are skipped, as they carry no
    /// meaning for the renderer. A malformed value for a known property is
    /// an error.
    pub fn parse_declarations(text: &str) -> Result<Self, String> {
        let mut map = Self::new();
        for declaration in text.split(';') {
            let declaration = declaration.trim();
            if declaration.is_empty() {
                continue;
            }
            let Some((key, value)) = declaration.split_once(':') else {
                return Err(format!("malformed style declaration `{declaration}`"));
            };
            let key = key.trim();
            match key.parse::<StyleProperty>() {
                Ok(property) => {
                    map.insert(property, StyleValue::parse(value)?);
                }
                Err(_) => {
                    debug!(property = key; "Skipping style property outside glyph vocabulary");
                }
            }
        }
        Ok(map)
    }

    /// Inserts a declaration, replacing any previous value for the property
    pub fn insert(&mut self, property: StyleProperty, value: StyleValue) -> Option<StyleValue> {
        self.entries.insert(property, value)
    }

    /// Builder-style variant of [`StyleMap::insert`]
    pub fn with(mut self, property: StyleProperty, value: StyleValue) -> Self {
        self.insert(property, value);
        self
    }

    pub fn get(&self, property: StyleProperty) -> Option<&StyleValue> {
        self.entries.get(&property)
    }

    pub fn contains(&self, property: StyleProperty) -> bool {
        self.entries.contains_key(&property)
    }

    pub fn remove(&mut self, property: StyleProperty) -> Option<StyleValue> {
        self.entries.shift_remove(&property)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StyleProperty, &StyleValue)> {
        self.entries.iter()
    }

    pub fn properties(&self) -> impl Iterator<Item = StyleProperty> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts the declarations into a concrete [`PathStyle`].
    ///
    /// A missing fill or stroke means the path is not filled or not stroked.
    /// A stroke without a width uses width 1.
    pub fn to_path_style(&self, z_order: i32) -> PathStyle {
        let fill = self.get(StyleProperty::Fill).and_then(StyleValue::as_color);
        let width = self
            .get(StyleProperty::StrokeWidth)
            .and_then(StyleValue::as_number)
            .unwrap_or(1.0);
        let stroke = self
            .get(StyleProperty::Stroke)
            .and_then(StyleValue::as_color)
            .map(|color| StrokeDefinition::new(color, width));
        PathStyle {
            fill,
            stroke,
            z_order,
        }
    }
}

impl FromIterator<(StyleProperty, StyleValue)> for StyleMap {
    fn from_iter<T: IntoIterator<Item = (StyleProperty, StyleValue)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// The concrete style of one emitted path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathStyle {
    fill: Option<Color>,
    stroke: Option<StrokeDefinition>,
    z_order: i32,
}

impl PathStyle {
    /// A path that is neither filled nor stroked
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_stroke(mut self, stroke: StrokeDefinition) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn with_z_order(mut self, z_order: i32) -> Self {
        self.z_order = z_order;
        self
    }

    /// Solid outline only
    pub fn outline(color: Color, width: f64) -> Self {
        Self::new().with_stroke(StrokeDefinition::new(color, width))
    }

    /// Dashed outline only
    pub fn dashed_outline(color: Color, width: f64) -> Self {
        let mut stroke = StrokeDefinition::new(color, width);
        stroke.set_style(StrokeStyle::Dashed);
        Self::new().with_stroke(stroke)
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn stroke(&self) -> Option<&StrokeDefinition> {
        self.stroke.as_ref()
    }

    /// Stacking order; larger values are drawn on top
    pub fn z_order(&self) -> i32 {
        self.z_order
    }
}
