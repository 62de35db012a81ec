//! Parsing of a single parametric glyph template.
//!
//! A template is an SVG document shaped like this:
//!
//! ```xml
//! <svg xmlns:parametric="https://parametric-svg.github.io/v0.2"
//!      glyphtype="CDS" soterms="SO:0000316"
//!      parametric:defaults="width=30;height=15">
//!   <path class="baseline" parametric:d="M {baseline_x} {baseline_y} L ..."/>
//!   <path class="filled-path" id="cds" parametric:d="..." style="fill:rgb(255,255,255)"/>
//! </svg>
//! ```
//!
//! Only the attributes above are read. Any element carrying `parametric:d`
//! becomes a [`PathFragment`]; everything else is ignored.

use log::debug;
use roxmltree::{Document, Node};
use sbolv_core::draw::StyleMap;

use crate::{
    error::TemplateError,
    expression::Parameters,
    path_template::PathTemplate,
};

/// Role of a path inside a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathClass {
    /// Drawn and counted in bounds
    #[default]
    Normal,
    /// The glyph's attachment line, never drawn
    Baseline,
    /// Authoring aid, never drawn
    BoundingBox,
}

impl PathClass {
    fn from_class_attribute(value: &str) -> Self {
        let mut class = Self::Normal;
        for token in value.split_whitespace() {
            match token {
                "baseline" => return Self::Baseline,
                "bounding-box" => class = Self::BoundingBox,
                _ => {}
            }
        }
        class
    }

    /// Whether paths of this class are emitted to the canvas
    pub fn is_drawable(self) -> bool {
        matches!(self, Self::Normal)
    }
}

/// One path of a glyph template.
#[derive(Debug, Clone, PartialEq)]
pub struct PathFragment {
    class: PathClass,
    id: Option<String>,
    template: PathTemplate,
    style: StyleMap,
}

impl PathFragment {
    pub fn class(&self) -> PathClass {
        self.class
    }

    /// The path id; paths without one cannot be restyled
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    /// The template's own style block
    pub fn style(&self) -> &StyleMap {
        &self.style
    }
}

/// A parsed glyph template.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphDefinition {
    glyph_type: String,
    so_terms: Vec<String>,
    defaults: Parameters,
    paths: Vec<PathFragment>,
}

impl GlyphDefinition {
    /// Parses a glyph template from SVG text.
    ///
    /// `baseline_x` and `baseline_y` are always present in the defaults with
    /// value 0, whatever the template declares.
    ///
    /// # Errors
    ///
    /// Fails on malformed XML, a missing `glyphtype`, an unparsable default,
    /// an invalid style block, a repeated path id or a malformed path
    /// expression.
    pub fn parse(svg: &str) -> Result<Self, TemplateError> {
        let document = Document::parse(svg)?;
        let root = document.root_element();

        let glyph_type = root
            .attribute("glyphtype")
            .ok_or(TemplateError::MissingAttribute("glyphtype"))?
            .trim()
            .to_string();

        let so_terms = root
            .attribute("soterms")
            .map(|terms| {
                terms
                    .split(';')
                    .map(str::trim)
                    .filter(|term| !term.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let mut defaults =
            parse_defaults(&glyph_type, parametric_attribute(root, "defaults").unwrap_or(""))?;
        defaults.insert("baseline_x".to_string(), 0.0);
        defaults.insert("baseline_y".to_string(), 0.0);

        let mut paths: Vec<PathFragment> = Vec::new();
        for node in root.descendants().skip(1).filter(Node::is_element) {
            let Some(d) = parametric_attribute(node, "d") else {
                debug!(
                    glyph_type = glyph_type.as_str(),
                    element = node.tag_name().name();
                    "Skipping element without parametric path data"
                );
                continue;
            };

            let id = node.attribute("id").map(str::to_string);
            if let Some(id) = &id {
                if paths.iter().any(|path| path.id() == Some(id.as_str())) {
                    return Err(TemplateError::DuplicatePathId {
                        glyph_type,
                        id: id.clone(),
                    });
                }
            }

            let template =
                PathTemplate::parse(d).map_err(|source| TemplateError::Expression {
                    glyph_type: glyph_type.clone(),
                    source,
                })?;
            let style = StyleMap::parse_declarations(node.attribute("style").unwrap_or(""))
                .map_err(|message| TemplateError::InvalidStyle {
                    glyph_type: glyph_type.clone(),
                    message,
                })?;

            paths.push(PathFragment {
                class: node
                    .attribute("class")
                    .map(PathClass::from_class_attribute)
                    .unwrap_or_default(),
                id,
                template,
                style,
            });
        }

        debug!(glyph_type = glyph_type.as_str(), paths = paths.len(); "Parsed glyph template");

        Ok(Self {
            glyph_type,
            so_terms,
            defaults,
            paths,
        })
    }

    /// The glyph-type name, e.g. `CDS`
    pub fn glyph_type(&self) -> &str {
        &self.glyph_type
    }

    /// Classification tags, e.g. `SO:0000316`
    pub fn so_terms(&self) -> &[String] {
        &self.so_terms
    }

    pub fn defaults(&self) -> &Parameters {
        &self.defaults
    }

    /// Whether `name` is a declared parameter
    pub fn has_parameter(&self, name: &str) -> bool {
        self.defaults.contains_key(name)
    }

    /// All path fragments in document order
    pub fn paths(&self) -> &[PathFragment] {
        &self.paths
    }

    /// Fragments that end up on the canvas
    pub fn drawable_paths(&self) -> impl Iterator<Item = &PathFragment> {
        self.paths.iter().filter(|path| path.class.is_drawable())
    }

    /// The first baseline fragment, if the template has one
    pub fn baseline_path(&self) -> Option<&PathFragment> {
        self.paths
            .iter()
            .find(|path| path.class == PathClass::Baseline)
    }

    /// Ids of all fragments that have one
    pub fn path_ids(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().filter_map(PathFragment::id)
    }

    pub fn path(&self, id: &str) -> Option<&PathFragment> {
        self.paths.iter().find(|path| path.id() == Some(id))
    }

    pub fn has_path_id(&self, id: &str) -> bool {
        self.path(id).is_some()
    }
}

/// Looks up an attribute in any namespace whose URI mentions `parametric`.
fn parametric_attribute<'a>(node: Node<'a, '_>, local_name: &str) -> Option<&'a str> {
    node.attributes()
        .find(|attribute| {
            attribute.name() == local_name
                && attribute
                    .namespace()
                    .is_some_and(|namespace| namespace.contains("parametric"))
        })
        .map(|attribute| attribute.value())
}

fn parse_defaults(glyph_type: &str, text: &str) -> Result<Parameters, TemplateError> {
    let mut defaults = Parameters::new();
    for entry in text.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let invalid = || TemplateError::InvalidDefault {
            glyph_type: glyph_type.to_string(),
            entry: entry.to_string(),
        };
        let (name, value) = entry.split_once('=').ok_or_else(invalid)?;
        let value: f64 = value.trim().parse().map_err(|_| invalid())?;
        defaults.insert(name.trim().to_string(), value);
    }
    Ok(defaults)
}
