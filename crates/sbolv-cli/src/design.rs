//! Design files.
//!
//! A design is a TOML document describing one construct:
//!
//! ```toml
//! rotation = 0.0
//! start = [0.0, 0.0]
//! gap = 2.0
//!
//! [[parts]]
//! glyph = "Promoter"
//! name = "p1"
//!
//! [[parts]]
//! glyph = "CDS"
//! name = "gfp"
//! [parts.parameters]
//! width = 40
//! [parts.style.cds]
//! fill = "rgb(0,160,80)"
//!
//! [[interactions]]
//! from = "p1"
//! to = "gfp"
//! kind = "control"
//!
//! [[modules]]
//! start = "p1"
//! end = "gfp"
//! ```
//!
//! Interactions and modules refer to parts by `name`. A name that matches
//! no part is an error for the whole design.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use thiserror::Error;

use sbolv::{
    SbolvError,
    color::Color,
    config::AppConfig,
    construct::{Construct, Interaction, Module, PartHandle},
    draw::{StyleMap, StyleProperty, StyleValue},
    geometry::Point,
    layout::PartListEntry,
    params::{Orientation, UserParameters, UserStyle},
    renderer::GlyphRenderer,
};

/// Design file errors
#[derive(Debug, Error)]
pub enum DesignError {
    #[error("Failed to parse design: {0}")]
    Parse(String),

    #[error("{context} refers to unknown part `{name}`")]
    UnknownPartName { name: String, context: String },

    #[error("Part name `{0}` is used more than once")]
    DuplicatePartName(String),

    #[error("Invalid style for part `{part}`: {message}")]
    InvalidStyle { part: String, message: String },
}

impl From<DesignError> for SbolvError {
    fn from(err: DesignError) -> Self {
        SbolvError::Config(err.to_string())
    }
}

/// A parsed design file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Design {
    #[serde(default)]
    rotation: f64,
    #[serde(default)]
    start: Option<[f64; 2]>,
    #[serde(default)]
    gap: Option<f64>,
    #[serde(default)]
    padding: Option<f64>,
    #[serde(default)]
    parts: Vec<PartSpec>,
    #[serde(default)]
    interactions: Vec<InteractionSpec>,
    #[serde(default)]
    modules: Vec<ModuleSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartSpec {
    glyph: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    orientation: Option<Orientation>,
    #[serde(default)]
    parameters: UserParameters,
    #[serde(default)]
    style: IndexMap<String, IndexMap<String, StyleText>>,
}

/// A style value as written in TOML; numbers may be bare and colors may be
/// unit RGB triples.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StyleText {
    Number(f64),
    Rgb([f64; 3]),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InteractionSpec {
    from: String,
    to: String,
    kind: String,
    #[serde(default)]
    parameters: UserParameters,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModuleSpec {
    start: String,
    end: String,
    #[serde(default)]
    x_stretch: f64,
    #[serde(default)]
    y_stretch: f64,
}

impl Design {
    /// Parses a design from TOML source.
    pub fn parse(source: &str) -> Result<Self, DesignError> {
        toml::from_str(source).map_err(|err| DesignError::Parse(err.to_string()))
    }

    /// Number of parts in the design
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Builds a construct from the design.
    ///
    /// Layout defaults come from `config`; values set in the design win.
    pub fn build<'r>(
        &self,
        renderer: &'r GlyphRenderer,
        config: &AppConfig,
    ) -> Result<Construct<'r>, SbolvError> {
        let mut construct = Construct::with_config(renderer, config)?;
        construct.set_rotation(self.rotation);
        if let Some([x, y]) = self.start {
            construct.set_start_position(Point::new(x, y));
        }
        if let Some(gap) = self.gap {
            construct.set_gap(gap);
        }
        if let Some(padding) = self.padding {
            construct.set_padding(padding);
        }

        let mut names: HashMap<&str, PartHandle> = HashMap::new();
        for part in &self.parts {
            let handle = construct.add_part(part.to_entry()?);
            if let Some(name) = &part.name {
                if names.insert(name.as_str(), handle).is_some() {
                    return Err(DesignError::DuplicatePartName(name.clone()).into());
                }
            }
        }

        let lookup = |name: &str, context: String| {
            names
                .get(name)
                .copied()
                .ok_or_else(|| DesignError::UnknownPartName {
                    name: name.to_string(),
                    context,
                })
        };

        for (index, spec) in self.interactions.iter().enumerate() {
            let context = format!("interaction {index}");
            let sending = lookup(&spec.from, context.clone())?;
            let receiving = lookup(&spec.to, context)?;
            construct.add_interaction(
                Interaction::new(sending, receiving, spec.kind.as_str())
                    .with_parameters(spec.parameters.clone()),
            )?;
        }

        for (index, spec) in self.modules.iter().enumerate() {
            let context = format!("module {index}");
            let start = lookup(&spec.start, context.clone())?;
            let end = lookup(&spec.end, context)?;
            construct
                .add_module(Module::new(start, end).with_stretch(spec.x_stretch, spec.y_stretch))?;
        }

        debug!(
            parts = self.parts.len(),
            interactions = self.interactions.len(),
            modules = self.modules.len();
            "Built construct from design"
        );
        Ok(construct)
    }
}

impl PartSpec {
    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.glyph)
    }

    fn to_entry(&self) -> Result<PartListEntry, DesignError> {
        let mut entry = PartListEntry::new(self.glyph.as_str());
        if !self.parameters.is_empty() {
            entry = entry.with_parameters(self.parameters.clone());
        }
        if !self.style.is_empty() {
            entry = entry.with_style(self.user_style()?);
        }
        if let Some(orientation) = self.orientation {
            entry = entry.with_orientation(orientation);
        }
        Ok(entry)
    }

    fn user_style(&self) -> Result<UserStyle, DesignError> {
        let invalid = |message: String| DesignError::InvalidStyle {
            part: self.display_name().to_string(),
            message,
        };

        let mut user_style = UserStyle::new();
        for (path_id, declarations) in &self.style {
            let mut style = StyleMap::new();
            for (property, value) in declarations {
                let property: StyleProperty = property.parse().map_err(invalid)?;
                let value = match value {
                    StyleText::Number(number) => StyleValue::Number(*number),
                    StyleText::Rgb([r, g, b]) => {
                        StyleValue::Color(Color::from_unit_rgb(*r, *g, *b))
                    }
                    StyleText::Text(text) => StyleValue::parse(text).map_err(invalid)?,
                };
                style.insert(property, value);
            }
            user_style.insert(path_id.clone(), style);
        }
        Ok(user_style)
    }
}
