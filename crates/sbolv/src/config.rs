use serde::Deserialize;

use crate::{
    annotate::InteractionParameters,
    color::Color,
    layout::{DEFAULT_PADDING, DEFAULT_SCALE},
};

/// Application configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Style configuration section
    #[serde(default)]
    pub style: StyleConfig,

    /// Interaction defaults section
    #[serde(default)]
    pub interaction: InteractionConfig,
}

/// Layout configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Padding around the content, as a fraction of its height
    #[serde(default = "default_padding")]
    pub padding: f64,

    /// Default gap between consecutive glyphs
    #[serde(default)]
    pub gap: f64,

    /// Output pixels per world unit
    #[serde(default = "default_scale")]
    pub scale: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            gap: 0.0,
            scale: DEFAULT_SCALE,
        }
    }
}

fn default_padding() -> f64 {
    DEFAULT_PADDING
}

fn default_scale() -> f64 {
    DEFAULT_SCALE
}

/// Style configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Default background color for diagrams
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    /// Get the background color from configuration
    /// Returns None if no background color is configured
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}

/// Interaction configuration section
///
/// Every field left out keeps the built-in default of
/// [`InteractionParameters`].
#[derive(Debug, Default, Clone, Deserialize)]
pub struct InteractionConfig {
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    line_width: Option<f64>,
    #[serde(default)]
    head_height: Option<f64>,
    #[serde(default)]
    head_width: Option<f64>,
    #[serde(default)]
    height_skew: Option<f64>,
}

impl InteractionConfig {
    /// The interaction defaults with the configured overrides applied
    pub fn defaults(&self) -> Result<InteractionParameters, String> {
        let mut params = InteractionParameters::default();
        if let Some(color) = &self.color {
            params.color = Color::new(color)
                .map_err(|err| format!("Invalid interaction color in config: {err}"))?;
        }
        if let Some(line_width) = self.line_width {
            params.line_width = line_width;
        }
        if let Some(head_height) = self.head_height {
            params.head_height = head_height;
        }
        if let Some(head_width) = self.head_width {
            params.head_width = head_width;
        }
        if let Some(height_skew) = self.height_skew {
            params.height_skew = height_skew;
        }
        Ok(params)
    }
}
