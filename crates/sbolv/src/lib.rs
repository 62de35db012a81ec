//! sbolv - parametric SBOL Visual glyph rendering and genetic construct layout
//!
//! Glyphs are described by parametric SVG templates (see [`template`]).
//! This crate resolves user parameters against a template, evaluates and
//! places its paths, lays glyphs out along a construct baseline and draws
//! interaction and module annotations over them. Output goes to any
//! [`Canvas`](canvas::Canvas); [`export::svg::SvgCanvas`] writes SVG.
//!
//! Problems a drawing can survive are reported as
//! [`Diagnostic`](diagnostic::Diagnostic)s and never stop the draw. Only
//! conditions that make an operation meaningless are [`SbolvError`]s.
//!
//! # Examples
//!
//! ```rust,no_run
//! use sbolv::{
//!     config::AppConfig,
//!     construct::{Construct, Interaction},
//!     layout::PartListEntry,
//!     params::Orientation,
//!     renderer::GlyphRenderer,
//! };
//!
//! let renderer = GlyphRenderer::builtin().expect("Failed to load glyphs");
//! let config = AppConfig::default();
//!
//! let mut construct = Construct::with_config(&renderer, &config).expect("Invalid config");
//! let promoter = construct.add_part(PartListEntry::new("Promoter"));
//! let cds = construct.add_part(PartListEntry::new("CDS"));
//! construct.add_part(PartListEntry::new("Terminator").with_orientation(Orientation::Reverse));
//! construct
//!     .add_interaction(Interaction::new(promoter, cds, "control"))
//!     .expect("Both parts belong to the construct");
//!
//! let svg = sbolv::render_construct_svg(&mut construct, &config).expect("Failed to render");
//! println!("{svg}");
//! ```

pub mod annotate;
pub mod config;
pub mod construct;
pub mod export;
pub mod layout;
pub mod params;
pub mod renderer;
pub mod transform;

mod error;

pub use sbolv_core::{canvas, color, diagnostic, draw, geometry};
pub use sbolv_template as template;

pub use error::SbolvError;

use log::info;

use config::AppConfig;
use construct::Construct;
use export::svg::SvgCanvas;

/// Draws `construct` and returns the SVG text.
///
/// The background color comes from the style section of `config`.
///
/// # Errors
///
/// [`SbolvError::Config`] for an invalid background color, and any error
/// of [`Construct::draw`].
pub fn render_construct_svg(
    construct: &mut Construct<'_>,
    config: &AppConfig,
) -> Result<String, SbolvError> {
    let background = config
        .style
        .background_color()
        .map_err(SbolvError::Config)?;

    let mut canvas = SvgCanvas::new().with_background(background);
    let layout = construct.draw(&mut canvas)?;
    info!(
        parts = layout.placements().len(),
        diagnostics = layout.diagnostics().len();
        "Rendered construct"
    );
    canvas.to_svg_string()
}
