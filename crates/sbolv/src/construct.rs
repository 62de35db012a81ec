//! Stateful constructs.
//!
//! A [`Construct`] owns a part list together with the interactions and
//! module brackets drawn over it, and caches the result of its last layout.
//! It moves through three states:
//!
//! ```text
//!            update_bounds / bounds            draw
//!   Unlaid ───────────────────────────> Laid ───────> Drawn
//!     ^                                  |              |
//!     └──────────── any mutation ────────┴──────────────┘
//! ```
//!
//! Parts are referenced by [`PartHandle`]s so that interactions and modules
//! stay valid while other parts are added or removed.

use std::{fmt, mem};

use log::{debug, info};

use sbolv_core::{
    canvas::{Canvas, NullCanvas},
    diagnostic::DiagnosticCode,
    geometry::{Bounds, Point},
};

use crate::{
    annotate::{InteractionKind, InteractionParameters, draw_interaction, draw_module},
    config::AppConfig,
    error::SbolvError,
    layout::{
        DEFAULT_PADDING, DEFAULT_SCALE, LayoutResult, PartListEntry, Placement, finish,
        place_parts,
    },
    params::UserParameters,
    renderer::GlyphRenderer,
};

/// Opaque reference to a part of a [`Construct`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartHandle(u32);

impl fmt::Display for PartHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Layout state of a [`Construct`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    /// Bounds are unknown or stale
    Unlaid,
    /// Bounds computed by a dry run
    Laid,
    /// Emitted to a canvas
    Drawn,
}

/// An interaction between two parts.
///
/// The kind is kept as text: an unknown kind is only reported when the
/// construct is drawn, and does not prevent the rest from drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    sending: PartHandle,
    receiving: PartHandle,
    kind: String,
    parameters: UserParameters,
    side_flipped: bool,
}

impl Interaction {
    pub fn new(sending: PartHandle, receiving: PartHandle, kind: impl Into<String>) -> Self {
        Self {
            sending,
            receiving,
            kind: kind.into(),
            parameters: UserParameters::new(),
            side_flipped: false,
        }
    }

    pub fn with_parameters(mut self, parameters: UserParameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn sending(&self) -> PartHandle {
        self.sending
    }

    pub fn receiving(&self) -> PartHandle {
        self.receiving
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn parameters(&self) -> &UserParameters {
        &self.parameters
    }

    /// Whether the side was flipped by [`Construct::flip_interaction_sides`]
    pub fn side_flipped(&self) -> bool {
        self.side_flipped
    }
}

/// A module bracket enclosing the parts from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Module {
    start: PartHandle,
    end: PartHandle,
    x_stretch: f64,
    y_stretch: f64,
}

impl Module {
    pub fn new(start: PartHandle, end: PartHandle) -> Self {
        Self {
            start,
            end,
            x_stretch: 0.0,
            y_stretch: 0.0,
        }
    }

    pub fn with_stretch(mut self, x_stretch: f64, y_stretch: f64) -> Self {
        self.x_stretch = x_stretch;
        self.y_stretch = y_stretch;
        self
    }

    pub fn start(&self) -> PartHandle {
        self.start
    }

    pub fn end(&self) -> PartHandle {
        self.end
    }
}

/// A genetic construct: parts on a baseline plus annotations.
#[derive(Debug)]
pub struct Construct<'r> {
    renderer: &'r GlyphRenderer,
    handles: Vec<PartHandle>,
    entries: Vec<PartListEntry>,
    next_handle: u32,
    interactions: Vec<Interaction>,
    modules: Vec<Module>,
    rotation: f64,
    start: Point,
    gap: f64,
    padding: f64,
    scale: f64,
    interaction_defaults: InteractionParameters,
    additional_bounds: Vec<Bounds>,
    state: LayoutState,
    last_layout: Option<LayoutResult>,
}

impl<'r> Construct<'r> {
    pub fn new(renderer: &'r GlyphRenderer) -> Self {
        Self {
            renderer,
            handles: Vec::new(),
            entries: Vec::new(),
            next_handle: 0,
            interactions: Vec::new(),
            modules: Vec::new(),
            rotation: 0.0,
            start: Point::default(),
            gap: 0.0,
            padding: DEFAULT_PADDING,
            scale: DEFAULT_SCALE,
            interaction_defaults: InteractionParameters::default(),
            additional_bounds: Vec::new(),
            state: LayoutState::Unlaid,
            last_layout: None,
        }
    }

    /// A construct with layout and interaction defaults taken from `config`.
    ///
    /// # Errors
    ///
    /// [`SbolvError::Config`] when the interaction section is invalid.
    pub fn with_config(renderer: &'r GlyphRenderer, config: &AppConfig) -> Result<Self, SbolvError> {
        let mut construct = Self::new(renderer);
        construct.gap = config.layout.gap;
        construct.padding = config.layout.padding;
        construct.scale = config.layout.scale;
        construct.interaction_defaults = config.interaction.defaults().map_err(SbolvError::Config)?;
        Ok(construct)
    }

    pub fn renderer(&self) -> &'r GlyphRenderer {
        self.renderer
    }

    /// Appends a part to the end of the baseline.
    pub fn add_part(&mut self, entry: PartListEntry) -> PartHandle {
        let handle = PartHandle(self.next_handle);
        self.next_handle += 1;
        self.handles.push(handle);
        self.entries.push(entry);
        self.invalidate();
        handle
    }

    /// Removes a part together with every annotation referring to it.
    pub fn remove_part(&mut self, handle: PartHandle) -> Result<PartListEntry, SbolvError> {
        let index = self.index_of(handle)?;
        self.handles.remove(index);
        let entry = self.entries.remove(index);

        self.interactions
            .retain(|interaction| interaction.sending != handle && interaction.receiving != handle);
        self.modules
            .retain(|module| module.start != handle && module.end != handle);
        self.invalidate();
        Ok(entry)
    }

    pub fn part(&self, handle: PartHandle) -> Option<&PartListEntry> {
        self.index_of(handle).ok().map(|index| &self.entries[index])
    }

    /// Mutable access to a part. The construct must be laid out again.
    pub fn part_mut(&mut self, handle: PartHandle) -> Option<&mut PartListEntry> {
        let index = self.index_of(handle).ok()?;
        self.invalidate();
        Some(&mut self.entries[index])
    }

    /// Parts in baseline order
    pub fn parts(&self) -> impl Iterator<Item = (PartHandle, &PartListEntry)> {
        self.handles.iter().copied().zip(self.entries.iter())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds an interaction between two parts of this construct.
    ///
    /// # Errors
    ///
    /// [`SbolvError::UnknownPart`] when either handle is not a part of this
    /// construct.
    pub fn add_interaction(&mut self, interaction: Interaction) -> Result<(), SbolvError> {
        self.index_of(interaction.sending)?;
        self.index_of(interaction.receiving)?;
        self.interactions.push(interaction);
        self.invalidate();
        Ok(())
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    /// Adds a module bracket.
    ///
    /// # Errors
    ///
    /// [`SbolvError::UnknownPart`] when either handle is not a part of this
    /// construct.
    pub fn add_module(&mut self, module: Module) -> Result<(), SbolvError> {
        self.index_of(module.start)?;
        self.index_of(module.end)?;
        self.modules.push(module);
        self.invalidate();
        Ok(())
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Sets the baseline rotation in radians.
    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
        self.invalidate();
    }

    pub fn set_start_position(&mut self, start: Point) {
        self.start = start;
        self.invalidate();
    }

    pub fn set_gap(&mut self, gap: f64) {
        self.gap = gap;
        self.invalidate();
    }

    pub fn set_padding(&mut self, padding: f64) {
        self.padding = padding;
        self.invalidate();
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
        self.invalidate();
    }

    /// Parameters every interaction starts from before its own overrides.
    pub fn set_interaction_defaults(&mut self, defaults: InteractionParameters) {
        self.interaction_defaults = defaults;
        self.invalidate();
    }

    /// Adds a region the construct bounds must cover.
    pub fn add_additional_bounds(&mut self, bounds: Bounds) {
        self.additional_bounds.push(bounds);
        self.invalidate();
    }

    /// Moves every interaction to the other side of the baseline.
    pub fn flip_interaction_sides(&mut self) {
        for interaction in &mut self.interactions {
            interaction.side_flipped = !interaction.side_flipped;
        }
        self.invalidate();
    }

    pub fn state(&self) -> LayoutState {
        self.state
    }

    /// The result of the most recent layout, if it is still current
    pub fn last_layout(&self) -> Option<&LayoutResult> {
        self.last_layout.as_ref()
    }

    /// Padded construct bounds, laying the construct out first if needed.
    pub fn bounds(&mut self) -> Result<Bounds, SbolvError> {
        match &self.last_layout {
            Some(layout) if self.state != LayoutState::Unlaid => Ok(layout.bounds()),
            _ => self.update_bounds(),
        }
    }

    /// Recomputes the bounds with a dry run.
    pub fn update_bounds(&mut self) -> Result<Bounds, SbolvError> {
        let layout = self.run(&mut NullCanvas)?;
        let bounds = layout.bounds();
        self.last_layout = Some(layout);
        self.state = LayoutState::Laid;
        Ok(bounds)
    }

    /// Lays out and draws the construct onto `canvas`.
    ///
    /// # Errors
    ///
    /// [`SbolvError::EmptyConstruct`] when there are no parts, and any glyph
    /// rendering error.
    pub fn draw(&mut self, canvas: &mut dyn Canvas) -> Result<&LayoutResult, SbolvError> {
        let layout = self.run(canvas)?;
        self.state = LayoutState::Drawn;
        Ok(self.last_layout.insert(layout))
    }

    fn invalidate(&mut self) {
        if self.state != LayoutState::Unlaid {
            debug!("Construct changed, bounds invalidated");
        }
        self.state = LayoutState::Unlaid;
        self.last_layout = None;
    }

    fn index_of(&self, handle: PartHandle) -> Result<usize, SbolvError> {
        self.handles
            .iter()
            .position(|candidate| *candidate == handle)
            .ok_or(SbolvError::UnknownPart(handle))
    }

    fn run(&self, canvas: &mut dyn Canvas) -> Result<LayoutResult, SbolvError> {
        let mut placed = place_parts(
            self.renderer,
            canvas,
            &self.entries,
            self.start,
            self.gap,
            self.rotation,
        )?;

        let mut annotation_bounds = Vec::new();
        for interaction in &self.interactions {
            let sending = self.placed_bounds(&placed.placements, interaction.sending)?;
            let receiving = self.placed_bounds(&placed.placements, interaction.receiving)?;
            let kind = match interaction.kind.parse::<InteractionKind>() {
                Ok(kind) => kind,
                Err(err) => {
                    placed.diagnostics.warn(
                        DiagnosticCode::W005,
                        format!(
                            "{err}; interaction {} -> {} skipped",
                            interaction.sending, interaction.receiving
                        ),
                    );
                    continue;
                }
            };

            let mut params = self
                .interaction_defaults
                .clone()
                .apply_map(&interaction.parameters, &mut placed.diagnostics);
            if interaction.side_flipped {
                params.side = params.side.flipped();
            }
            annotation_bounds.push(draw_interaction(
                canvas,
                sending,
                receiving,
                kind,
                &params,
                self.rotation,
            ));
        }

        for module in &self.modules {
            let (first, last) = {
                let a = self.index_of(module.start)?;
                let b = self.index_of(module.end)?;
                (a.min(b), a.max(b))
            };
            let mut start = placed.placements[first].bounds();
            let mut end = placed.placements[last].bounds();
            if start.center().x() > end.center().x() {
                mem::swap(&mut start, &mut end);
            }
            annotation_bounds.push(draw_module(
                canvas,
                start,
                end,
                module.x_stretch,
                module.y_stretch,
            ));
        }

        info!(
            interactions = self.interactions.len(),
            modules = self.modules.len();
            "Drew construct annotations"
        );
        finish(
            canvas,
            self.start,
            placed,
            annotation_bounds,
            &self.additional_bounds,
            self.padding,
            self.scale,
        )
    }

    fn placed_bounds(&self, placements: &[Placement], handle: PartHandle) -> Result<Bounds, SbolvError> {
        let index = self.index_of(handle)?;
        Ok(placements[index].bounds())
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use float_cmp::assert_approx_eq;
    use sbolv_core::canvas::RecordingCanvas;

    use super::*;
    use crate::params::Orientation;

    fn renderer() -> GlyphRenderer {
        GlyphRenderer::builtin().unwrap()
    }

    #[test]
    fn test_state_machine() {
        let renderer = renderer();
        let mut construct = Construct::new(&renderer);
        construct.add_part(PartListEntry::new("CDS"));
        assert_eq!(construct.state(), LayoutState::Unlaid);

        construct.update_bounds().unwrap();
        assert_eq!(construct.state(), LayoutState::Laid);

        construct.draw(&mut RecordingCanvas::new()).unwrap();
        assert_eq!(construct.state(), LayoutState::Drawn);

        construct.set_rotation(PI);
        assert_eq!(construct.state(), LayoutState::Unlaid);
        assert!(construct.last_layout().is_none());

        construct.bounds().unwrap();
        assert_eq!(construct.state(), LayoutState::Laid);
    }

    #[test]
    fn test_bounds_query_matches_draw() {
        let renderer = renderer();
        let mut construct = Construct::new(&renderer);
        let promoter = construct.add_part(PartListEntry::new("Promoter"));
        let cds = construct.add_part(PartListEntry::new("CDS"));
        construct
            .add_interaction(Interaction::new(promoter, cds, "stimulation"))
            .unwrap();

        let queried = construct.bounds().unwrap();
        let drawn = construct.draw(&mut RecordingCanvas::new()).unwrap().bounds();
        assert_eq!(queried, drawn);
    }

    #[test]
    fn test_empty_construct() {
        let renderer = renderer();
        let mut construct = Construct::new(&renderer);
        assert!(matches!(construct.bounds(), Err(SbolvError::EmptyConstruct)));
        assert!(construct.is_empty());
    }

    #[test]
    fn test_unknown_part_handle() {
        let renderer = renderer();
        let mut other = Construct::new(&renderer);
        other.add_part(PartListEntry::new("CDS"));
        let foreign = other.add_part(PartListEntry::new("CDS"));

        let mut construct = Construct::new(&renderer);
        let own = construct.add_part(PartListEntry::new("CDS"));

        let err = construct
            .add_interaction(Interaction::new(own, foreign, "process"))
            .unwrap_err();
        assert!(matches!(err, SbolvError::UnknownPart(handle) if handle == foreign));
        assert!(construct.add_module(Module::new(foreign, own)).is_err());
        assert_eq!(foreign.to_string(), "#1");
    }

    #[test]
    fn test_remove_part_drops_annotations() {
        let renderer = renderer();
        let mut construct = Construct::new(&renderer);
        let promoter = construct.add_part(PartListEntry::new("Promoter"));
        let rbs = construct.add_part(PartListEntry::new("RibosomeEntrySite"));
        let cds = construct.add_part(PartListEntry::new("CDS"));
        construct
            .add_interaction(Interaction::new(promoter, cds, "control"))
            .unwrap();
        construct
            .add_interaction(Interaction::new(promoter, rbs, "control"))
            .unwrap();
        construct.add_module(Module::new(rbs, cds)).unwrap();

        let removed = construct.remove_part(cds).unwrap();
        assert_eq!(removed.glyph_type(), "CDS");
        assert_eq!(construct.len(), 2);
        assert_eq!(construct.interactions().len(), 1);
        assert!(construct.modules().is_empty());
        assert!(construct.part(cds).is_none());
        assert!(matches!(
            construct.remove_part(cds),
            Err(SbolvError::UnknownPart(_))
        ));
    }

    #[test]
    fn test_part_mut_invalidates() {
        let renderer = renderer();
        let mut construct = Construct::new(&renderer);
        let handle = construct.add_part(PartListEntry::new("CDS"));
        let before = construct.bounds().unwrap();

        construct
            .part_mut(handle)
            .unwrap()
            .set_orientation(Some(Orientation::Reverse));
        assert_eq!(construct.state(), LayoutState::Unlaid);
        let after = construct.bounds().unwrap();
        assert_approx_eq!(f64, before.min_x(), after.min_x(), epsilon = 1e-9);
        assert_approx_eq!(f64, before.max_x(), after.max_x(), epsilon = 1e-9);
        assert_approx_eq!(f64, before.min_y(), after.min_y(), epsilon = 1e-9);
        assert_approx_eq!(f64, before.max_y(), after.max_y(), epsilon = 1e-9);
    }

    #[test]
    fn test_flip_interaction_sides() {
        let renderer = renderer();
        let mut construct = Construct::new(&renderer);
        construct.set_padding(0.0);
        let promoter = construct.add_part(PartListEntry::new("Promoter"));
        let cds = construct.add_part(PartListEntry::new("CDS"));
        construct
            .add_interaction(Interaction::new(promoter, cds, "inhibition"))
            .unwrap();

        let above = construct.bounds().unwrap();
        construct.flip_interaction_sides();
        assert!(construct.interactions()[0].side_flipped());
        let below = construct.bounds().unwrap();

        assert!(above.max_y() > 30.0);
        assert!(below.min_y() < -30.0);
        assert!(below.max_y() < above.max_y());
    }

    #[test]
    fn test_module_order_follows_layout_direction() {
        let renderer = renderer();
        let mut construct = Construct::new(&renderer);
        construct.set_rotation(PI);
        let first = construct.add_part(PartListEntry::new("Operator"));
        let second = construct.add_part(PartListEntry::new("Operator"));
        construct.add_module(Module::new(second, first)).unwrap();

        let layout = construct.draw(&mut RecordingCanvas::new()).unwrap();
        let module = layout.annotation_bounds()[0];
        let parts = layout.part_bounds();

        // The right-to-left construct still gets a bracket covering both
        assert!(module.min_x() <= parts[1].min_x());
        assert!(module.max_x() >= parts[0].max_x());
    }

    #[test]
    fn test_with_config() {
        let renderer = renderer();
        let config: AppConfig = toml::from_str(
            r#"
            [layout]
            gap = 4.0
            padding = 0.0
            "#,
        )
        .unwrap();
        let mut construct = Construct::with_config(&renderer, &config).unwrap();
        construct.set_start_position(Point::new(0.0, 0.0));
        construct.add_part(PartListEntry::new("Operator"));
        construct.add_part(PartListEntry::new("Operator"));

        let layout = construct.draw(&mut RecordingCanvas::new()).unwrap();
        assert_eq!(layout.placements()[1].position(), Point::new(12.0, 0.0));
        assert_eq!(layout.bounds(), layout.content_bounds());
    }
}
