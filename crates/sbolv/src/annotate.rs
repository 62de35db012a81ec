//! Annotations drawn over a laid-out construct.
//!
//! Two kinds of annotation exist:
//!
//! - interactions, a right-angled connector between two glyphs finished by
//!   one of five head marks (see [`InteractionKind`])
//! - module brackets, a dashed rectangle enclosing a run of glyphs
//!
//! Both only need the world bounds of the glyphs they connect, so they can
//! be drawn once every part has been placed. Each drawing call returns the
//! bounds of what it emitted for inclusion in the construct bounds.

mod interaction;
mod module;

pub use interaction::{
    Direction, InteractionKind, InteractionParameters, Side, draw_interaction,
    draw_interaction_named,
};
pub use module::draw_module;
