//! CLI logic for the sbolv construct renderer.
//!
//! This module contains the core CLI logic: loading configuration, reading
//! a design file and writing the rendered construct as SVG.

pub mod design;
pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use sbolv::{SbolvError, renderer::GlyphRenderer, template::GlyphLibrary};

use design::Design;

/// Run the sbolv CLI application
///
/// This function renders the design named by `args` and writes the
/// resulting SVG to the output file.
///
/// # Errors
///
/// Returns `SbolvError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Glyph library errors
/// - Invalid designs
/// - Layout and rendering errors
pub fn run(args: &Args) -> Result<(), SbolvError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing design"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let renderer = match &args.glyphs {
        Some(dir) => GlyphRenderer::new(GlyphLibrary::load_dir(dir)?),
        None => GlyphRenderer::builtin()?,
    };

    let source = fs::read_to_string(&args.input)?;
    let design = Design::parse(&source)?;
    let mut construct = design.build(&renderer, &app_config)?;
    let svg = sbolv::render_construct_svg(&mut construct, &app_config)?;

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
