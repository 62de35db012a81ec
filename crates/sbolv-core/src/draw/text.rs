//! Label typography.
//!
//! [`FontSpec`] is the font description attached to glyph labels. It mirrors
//! the handful of attributes a canvas needs to place text: family, size,
//! weight and slant. Labels are centered on their anchor.

use std::fmt;

use serde::Deserialize;

/// Font weight of a label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
    Light,
}

impl FontWeight {
    /// Returns the SVG `font-weight` value
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
            Self::Light => "lighter",
        }
    }
}

/// Font slant of a label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl FontStyle {
    /// Returns the SVG `font-style` value
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
            Self::Oblique => "oblique",
        }
    }
}

/// Font description for labels.
///
/// | Property | Default |
/// |----------|---------|
/// | Family | `"sans-serif"` |
/// | Size | `10` |
/// | Weight | normal |
/// | Style | normal |
///
/// # Examples
///
/// ```
/// use sbolv_core::draw::{FontSpec, FontWeight};
///
/// let font = FontSpec::default();
/// assert_eq!(font.size(), 10.0);
/// assert_eq!(font.weight(), FontWeight::Normal);
/// assert_eq!(font.to_string(), "normal normal 10px sans-serif");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    family: String,
    size: f64,
    weight: FontWeight,
    style: FontStyle,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 10.0,
            weight: FontWeight::default(),
            style: FontStyle::default(),
        }
    }
}

impl FontSpec {
    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}px {}",
            self.style.to_svg_value(),
            self.weight.to_svg_value(),
            self.size,
            self.family
        )
    }
}
