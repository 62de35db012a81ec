//! Color handling for sbolv glyphs
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Glyph templates and interaction parameters express
//! colors in three ways: CSS strings, 0-255 RGB triples and arithmetic 0-1
//! triples. All three end up here.

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{AlphaColor, DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use sbolv_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates a color from 8-bit channel values (0-255 each).
    ///
    /// Fractional channel values are accepted, since template style blocks
    /// may write `rgb(127.5,0,0)`. Values are clamped into range.
    pub fn from_rgb255(r: f64, g: f64, b: f64) -> Self {
        Self::from_unit_rgb(r / 255.0, g / 255.0, b / 255.0)
    }

    /// Creates a color from arithmetic channel values (0.0-1.0 each).
    ///
    /// # Examples
    ///
    /// ```
    /// use sbolv_core::color::Color;
    ///
    /// let grey = Color::from_unit_rgb(0.5, 0.5, 0.5);
    /// assert_eq!(grey.to_rgb8(), (128, 128, 128));
    /// ```
    pub fn from_unit_rgb(r: f64, g: f64, b: f64) -> Self {
        let channel = |v: f64| v.clamp(0.0, 1.0) as f32;
        let alpha_color = AlphaColor::<Srgb>::new([channel(r), channel(g), channel(b), 1.0]);
        Self {
            color: DynamicColor::from_alpha_color(alpha_color),
        }
    }

    /// Returns the color as 8-bit sRGB channels, ignoring alpha.
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        (rgba.r, rgba.g, rgba.b)
    }

    /// Returns the color in the legacy `rgb(r, g, b)` notation understood by
    /// every SVG consumer.
    pub fn to_svg_string(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("rgb({r}, {g}, {b})")
    }

    /// Creates a new color with the specified alpha (transparency) value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sbolv_core::color::Color;
    ///
    /// let red = Color::new("red").unwrap();
    /// let semi_transparent_red = red.with_alpha(0.5);
    /// assert_eq!(semi_transparent_red.alpha(), 0.5);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Opaque white, used for the hollow interaction heads.
    pub fn white() -> Self {
        Self::from_unit_rgb(1.0, 1.0, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_svg_string())
    }
}
