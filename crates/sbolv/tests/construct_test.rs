//! End-to-end tests of construct layout, annotation and SVG export.

use std::f64::consts::PI;

use float_cmp::assert_approx_eq;
use proptest::prelude::*;

use sbolv::{
    canvas::{NullCanvas, RecordingCanvas},
    config::AppConfig,
    construct::{Construct, Interaction, Module},
    diagnostic::DiagnosticCode,
    geometry::{Bounds, Point, find_bound_of_bounds},
    layout::{LayoutRequest, PartListEntry, layout_parts},
    params::{Orientation, ParamValue, UserParameters},
    renderer::GlyphRenderer,
};

fn renderer() -> GlyphRenderer {
    GlyphRenderer::builtin().unwrap()
}

fn assert_bounds_eq(actual: Bounds, expected: Bounds) {
    assert_approx_eq!(f64, actual.min_x(), expected.min_x(), epsilon = 1e-9);
    assert_approx_eq!(f64, actual.min_y(), expected.min_y(), epsilon = 1e-9);
    assert_approx_eq!(f64, actual.max_x(), expected.max_x(), epsilon = 1e-9);
    assert_approx_eq!(f64, actual.max_y(), expected.max_y(), epsilon = 1e-9);
}

fn bounds(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Bounds {
    Bounds::new(Point::new(min_x, min_y), Point::new(max_x, max_y))
}

#[test]
fn test_mixed_orientation_construct() {
    let renderer = renderer();
    let mut construct = Construct::new(&renderer);
    construct.add_part(PartListEntry::new("CDS"));
    construct.add_part(PartListEntry::new("Promoter"));
    construct.add_part(PartListEntry::new("CDS").with_orientation(Orientation::Reverse));
    construct.set_gap(3.0);

    let mut canvas = RecordingCanvas::new();
    let layout = construct.draw(&mut canvas).unwrap();
    let parts = layout.part_bounds();

    assert_bounds_eq(parts[0], bounds(0.0, -11.5, 30.0, 11.5));
    assert_bounds_eq(parts[1], bounds(33.0, 0.0, 52.0, 18.0));
    assert_bounds_eq(parts[2], bounds(55.0, -11.5, 85.0, 11.5));
    assert_approx_eq!(f64, layout.baseline_end().x(), 85.0, epsilon = 1e-9);

    assert_bounds_eq(layout.content_bounds(), bounds(0.0, -11.5, 85.0, 18.0));
    // Padding is a fifth of the content height on every side
    assert_bounds_eq(layout.bounds(), bounds(-5.9, -17.4, 90.9, 23.9));
    assert!(layout.diagnostics().is_empty());

    let view = canvas.view_bounds().unwrap();
    assert_bounds_eq(view, layout.bounds());
}

#[test]
fn test_baseline_is_continuous() {
    let renderer = renderer();
    let request = LayoutRequest::new(vec![
        PartListEntry::new("Promoter"),
        PartListEntry::new("RibosomeEntrySite"),
        PartListEntry::new("CDS"),
        PartListEntry::new("Terminator"),
    ]);

    let layout = layout_parts(&renderer, &mut NullCanvas, &request).unwrap();
    let placements = layout.placements();

    for pair in placements.windows(2) {
        let end = pair[0].baseline_end().unwrap();
        let next = pair[1].position();
        assert_approx_eq!(f64, end.x(), next.x(), epsilon = 1e-9);
        assert_approx_eq!(f64, end.y(), next.y(), epsilon = 1e-9);
    }
    assert_eq!(layout.baseline_start(), Point::new(0.0, 0.0));
}

#[test]
fn test_unknown_interaction_kind_is_skipped() {
    let renderer = renderer();
    let mut construct = Construct::new(&renderer);
    let promoter = construct.add_part(PartListEntry::new("Promoter"));
    let cds = construct.add_part(PartListEntry::new("CDS"));
    let terminator = construct.add_part(PartListEntry::new("Terminator"));

    construct
        .add_interaction(Interaction::new(promoter, cds, "control"))
        .unwrap();
    construct
        .add_interaction(Interaction::new(cds, terminator, "bogus"))
        .unwrap();
    construct
        .add_interaction(Interaction::new(cds, promoter, "inhibition"))
        .unwrap();

    let layout = construct.draw(&mut NullCanvas).unwrap();

    assert_eq!(layout.annotation_bounds().len(), 2);
    let skipped = layout
        .diagnostics()
        .iter()
        .filter(|diag| diag.code() == Some(DiagnosticCode::W005))
        .count();
    assert_eq!(skipped, 1);
}

#[test]
fn test_annotations_grow_bounds() {
    let renderer = renderer();
    let mut construct = Construct::new(&renderer);
    let promoter = construct.add_part(PartListEntry::new("Promoter"));
    let cds = construct.add_part(PartListEntry::new("CDS"));
    let bare = construct.bounds().unwrap();

    construct
        .add_interaction(Interaction::new(promoter, cds, "process"))
        .unwrap();
    construct.add_module(Module::new(promoter, cds)).unwrap();
    let annotated = construct.bounds().unwrap();

    assert!(annotated.max_y() > bare.max_y());
    assert!(annotated.min_x() < bare.min_x());
    assert_eq!(construct.last_layout().unwrap().annotation_bounds().len(), 2);
}

#[test]
fn test_unknown_parameter_warns_and_draws() {
    let renderer = renderer();
    let mut parameters = UserParameters::new();
    parameters.insert("colour".to_string(), ParamValue::from(3.0));

    let mut construct = Construct::new(&renderer);
    construct.add_part(PartListEntry::new("CDS").with_parameters(parameters));

    let mut canvas = RecordingCanvas::new();
    let layout = construct.draw(&mut canvas).unwrap();

    assert!(
        layout
            .diagnostics()
            .iter()
            .any(|diag| diag.code() == Some(DiagnosticCode::W001))
    );
    assert!(canvas.paths().next().is_some());
}

#[test]
fn test_find_bound_of_bounds_over_layout() {
    let renderer = renderer();
    let request = LayoutRequest::new(vec![PartListEntry::new("CDS"), PartListEntry::new("CDS")])
        .with_gap(1.0);

    let layout = layout_parts(&renderer, &mut NullCanvas, &request).unwrap();
    let merged = find_bound_of_bounds(&layout.part_bounds()).unwrap();

    assert_bounds_eq(merged, layout.content_bounds());
    assert_bounds_eq(merged, bounds(0.0, -11.5, 61.0, 11.5));
    assert!(find_bound_of_bounds(&[]).is_none());
}

#[test]
fn test_rotated_construct_runs_vertically() {
    let renderer = renderer();
    let request = LayoutRequest::new(vec![PartListEntry::new("CDS"), PartListEntry::new("CDS")])
        .with_rotation(PI / 2.0);

    let layout = layout_parts(&renderer, &mut NullCanvas, &request).unwrap();

    assert_approx_eq!(f64, layout.baseline_end().x(), 0.0, epsilon = 1e-9);
    assert_approx_eq!(f64, layout.baseline_end().y(), 60.0, epsilon = 1e-9);
    assert_bounds_eq(layout.content_bounds(), bounds(-11.5, 0.0, 11.5, 60.0));
}

#[test]
fn test_render_construct_svg() {
    let renderer = renderer();
    let config: AppConfig = toml::from_str(
        r#"
        [style]
        background_color = "white"
        "#,
    )
    .unwrap();

    let mut construct = Construct::with_config(&renderer, &config).unwrap();
    let promoter = construct.add_part(PartListEntry::new("Promoter"));
    let cds = construct.add_part(PartListEntry::new("CDS"));
    construct
        .add_interaction(Interaction::new(promoter, cds, "control"))
        .unwrap();

    let svg = sbolv::render_construct_svg(&mut construct, &config).unwrap();

    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("viewBox="));
    assert!(svg.contains("<rect"));
    assert!(svg.contains("data-z-order"));
}

#[test]
fn test_render_rejects_bad_background() {
    let renderer = renderer();
    let config: AppConfig = toml::from_str(
        r#"
        [style]
        background_color = "nope"
        "#,
    )
    .unwrap();

    let mut construct = Construct::new(&renderer);
    construct.add_part(PartListEntry::new("CDS"));

    let err = sbolv::render_construct_svg(&mut construct, &config).unwrap_err();
    assert!(matches!(err, sbolv::SbolvError::Config(_)));
}

proptest! {
    #[test]
    fn test_reverse_mirrors_forward_footprint(
        glyph in prop::sample::select(vec!["CDS", "Promoter", "Terminator", "Operator"]),
        x in -50.0f64..50.0,
        y in -50.0f64..50.0,
    ) {
        let renderer = renderer();
        let start = Point::new(x, y);
        let forward = layout_parts(
            &renderer,
            &mut NullCanvas,
            &LayoutRequest::new(vec![PartListEntry::new(glyph)]).with_start(start),
        )
        .unwrap();
        let reverse = layout_parts(
            &renderer,
            &mut NullCanvas,
            &LayoutRequest::new(vec![
                PartListEntry::new(glyph).with_orientation(Orientation::Reverse),
            ])
            .with_start(start),
        )
        .unwrap();

        let forward_bounds = forward.content_bounds();
        let reverse_bounds = reverse.content_bounds();
        // Same length along the baseline, mirrored across it
        prop_assert!((forward_bounds.min_x() - reverse_bounds.min_x()).abs() < 1e-6);
        prop_assert!((forward_bounds.max_x() - reverse_bounds.max_x()).abs() < 1e-6);
        prop_assert!((forward_bounds.max_y() - y + reverse_bounds.min_y() - y).abs() < 1e-6);
        prop_assert!((forward_bounds.min_y() - y + reverse_bounds.max_y() - y).abs() < 1e-6);
    }

    #[test]
    fn test_reverse_matches_half_turned_forward(
        glyph in prop::sample::select(vec!["Promoter", "Terminator"]),
        x in -50.0f64..50.0,
        y in -50.0f64..50.0,
    ) {
        let renderer = renderer();
        let start = Point::new(x, y);
        let turned = layout_parts(
            &renderer,
            &mut NullCanvas,
            &LayoutRequest::new(vec![PartListEntry::new(glyph)])
                .with_start(start)
                .with_rotation(PI),
        )
        .unwrap();
        let reverse = layout_parts(
            &renderer,
            &mut NullCanvas,
            &LayoutRequest::new(vec![
                PartListEntry::new(glyph).with_orientation(Orientation::Reverse),
            ])
            .with_start(start),
        )
        .unwrap();

        let turned_bounds = turned.content_bounds();
        let reverse_bounds = reverse.content_bounds();
        // Mirrored across the start along x, same side of the baseline
        prop_assert!((turned_bounds.min_x() - x + reverse_bounds.max_x() - x).abs() < 1e-6);
        prop_assert!((turned_bounds.max_x() - x + reverse_bounds.min_x() - x).abs() < 1e-6);
        prop_assert!((turned_bounds.min_y() - reverse_bounds.min_y()).abs() < 1e-6);
        prop_assert!((turned_bounds.max_y() - reverse_bounds.max_y()).abs() < 1e-6);
    }
}
