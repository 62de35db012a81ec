//! Glyph-type name to template lookup.

use std::{fs, path::Path};

use indexmap::IndexMap;
use log::{debug, info};

use crate::{error::TemplateError, glyph::GlyphDefinition};

const BUILTIN_TEMPLATES: [&str; 5] = [
    include_str!("../glyphs/cds.svg"),
    include_str!("../glyphs/promoter.svg"),
    include_str!("../glyphs/ribosome_entry_site.svg"),
    include_str!("../glyphs/terminator.svg"),
    include_str!("../glyphs/operator.svg"),
];

/// The loaded set of glyph templates.
///
/// Glyph types keep their insertion order. A classification tag maps to the
/// first glyph that declares it.
///
/// # Examples
///
/// ```
/// use sbolv_template::GlyphLibrary;
///
/// let library = GlyphLibrary::builtin().unwrap();
/// assert!(library.contains("CDS"));
/// assert_eq!(library.glyph_for_term("SO:0000167"), Some("Promoter"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GlyphLibrary {
    glyphs: IndexMap<String, GlyphDefinition>,
    so_term_map: IndexMap<String, String>,
}

impl GlyphLibrary {
    /// An empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// The glyph set shipped with the crate.
    pub fn builtin() -> Result<Self, TemplateError> {
        Self::from_templates(BUILTIN_TEMPLATES)
    }

    /// Builds a library from template texts.
    pub fn from_templates<'a>(
        templates: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, TemplateError> {
        let mut library = Self::new();
        for template in templates {
            library.insert(GlyphDefinition::parse(template)?)?;
        }
        Ok(library)
    }

    /// Loads every `*.svg` file of `dir`, in file-name order.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let dir = dir.as_ref();
        let io_error = |source| TemplateError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "svg") {
                files.push(path);
            }
        }
        files.sort();

        let mut library = Self::new();
        for path in &files {
            let text = fs::read_to_string(path).map_err(|source| TemplateError::Io {
                path: path.clone(),
                source,
            })?;
            debug!(path = path.display().to_string(); "Loading glyph template");
            library.insert(GlyphDefinition::parse(&text)?)?;
        }

        info!(
            path = dir.display().to_string(),
            glyphs = library.len();
            "Loaded glyph library"
        );
        Ok(library)
    }

    /// Adds a glyph. Its type name must not already be present.
    pub fn insert(&mut self, glyph: GlyphDefinition) -> Result<(), TemplateError> {
        let glyph_type = glyph.glyph_type().to_string();
        if self.glyphs.contains_key(&glyph_type) {
            return Err(TemplateError::DuplicateGlyph(glyph_type));
        }
        for term in glyph.so_terms() {
            self.so_term_map
                .entry(term.clone())
                .or_insert_with(|| glyph_type.clone());
        }
        self.glyphs.insert(glyph_type, glyph);
        Ok(())
    }

    pub fn get(&self, glyph_type: &str) -> Option<&GlyphDefinition> {
        self.glyphs.get(glyph_type)
    }

    pub fn contains(&self, glyph_type: &str) -> bool {
        self.glyphs.contains_key(glyph_type)
    }

    /// Glyph-type names in insertion order
    pub fn glyph_types(&self) -> impl Iterator<Item = &str> {
        self.glyphs.keys().map(String::as_str)
    }

    /// The glyph type registered for a classification tag
    pub fn glyph_for_term(&self, term: &str) -> Option<&str> {
        self.so_term_map.get(term).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}
