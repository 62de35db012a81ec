//! Template space to world space.
//!
//! Templates are authored y-down with the glyph anchor at the template
//! origin. Placing a path takes three steps, applied per vertex:
//!
//! 1. flip: `y' = baseline_y - (y - baseline_y)`
//! 2. rotate about the world origin by the glyph rotation
//! 3. translate to the target position
//!
//! Segment kinds are preserved; only coordinates move.

use kurbo::{Affine, BezPath, PathEl};

use sbolv_core::geometry::Point;

/// The affine map from template space to world space.
pub fn glyph_affine(baseline_y: f64, position: Point, rotation: f64) -> Affine {
    let flip = Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, 2.0 * baseline_y]);
    Affine::translate((position.x(), position.y())) * Affine::rotate(rotation) * flip
}

/// Places a template path in world space.
///
/// # Examples
///
/// ```
/// use kurbo::BezPath;
/// use sbolv::geometry::Point;
/// use sbolv::transform::{path_vertices, transform};
///
/// let path = BezPath::from_svg("M 0 0 L 10 -5").unwrap();
/// let placed = transform(&path, 0.0, Point::new(100.0, 0.0), 0.0);
/// assert_eq!(
///     path_vertices(&placed),
///     vec![Point::new(100.0, 0.0), Point::new(110.0, 5.0)]
/// );
/// ```
pub fn transform(path: &BezPath, baseline_y: f64, position: Point, rotation: f64) -> BezPath {
    let mut placed = path.clone();
    placed.apply_affine(glyph_affine(baseline_y, position, rotation));
    placed
}

/// Every vertex of `path`, curve control points included.
pub fn path_vertices(path: &BezPath) -> Vec<Point> {
    let mut vertices = Vec::new();
    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => vertices.push(Point::from(p)),
            PathEl::QuadTo(p1, p2) => vertices.extend([Point::from(p1), Point::from(p2)]),
            PathEl::CurveTo(p1, p2, p3) => {
                vertices.extend([Point::from(p1), Point::from(p2), Point::from(p3)]);
            }
            PathEl::ClosePath => {}
        }
    }
    vertices
}

/// Builds a path through `points`, optionally closed.
pub(crate) fn polyline(points: &[Point], closed: bool) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        path.move_to(kurbo::Point::from(*first));
        for point in iter {
            path.line_to(kurbo::Point::from(*point));
        }
        if closed {
            path.close_path();
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use float_cmp::assert_approx_eq;

    use super::*;

    fn assert_point_eq(actual: Point, expected: Point) {
        assert_approx_eq!(f64, actual.x(), expected.x(), epsilon = 1e-9);
        assert_approx_eq!(f64, actual.y(), expected.y(), epsilon = 1e-9);
    }

    #[test]
    fn test_flip_about_baseline() {
        let path = BezPath::from_svg("M 0 2 L 4 -3").unwrap();
        let placed = transform(&path, 1.0, Point::default(), 0.0);
        let vertices = path_vertices(&placed);

        assert_point_eq(vertices[0], Point::new(0.0, 0.0));
        assert_point_eq(vertices[1], Point::new(4.0, 5.0));
    }

    #[test]
    fn test_rotation_before_translation() {
        let path = BezPath::from_svg("M 0 0 L 10 0").unwrap();
        let placed = transform(&path, 0.0, Point::new(5.0, 5.0), FRAC_PI_2);
        let vertices = path_vertices(&placed);

        assert_point_eq(vertices[0], Point::new(5.0, 5.0));
        assert_point_eq(vertices[1], Point::new(5.0, 15.0));
    }

    #[test]
    fn test_half_turn_mirrors() {
        let path = BezPath::from_svg("M 0 0 L 30 -4").unwrap();
        let placed = transform(&path, 0.0, Point::new(30.0, 0.0), PI);
        let vertices = path_vertices(&placed);

        assert_point_eq(vertices[0], Point::new(30.0, 0.0));
        assert_point_eq(vertices[1], Point::new(0.0, -4.0));
    }

    #[test]
    fn test_segment_kinds_preserved() {
        let path = BezPath::from_svg("M 0 0 C 1 1 2 1 3 0 Q 4 1 5 0 L 6 0 Z").unwrap();
        let placed = transform(&path, 0.0, Point::new(1.0, 1.0), 0.3);

        let kinds = |p: &BezPath| {
            p.elements()
                .iter()
                .map(std::mem::discriminant)
                .collect::<Vec<_>>()
        };
        assert_eq!(kinds(&path), kinds(&placed));
        assert_eq!(path_vertices(&placed).len(), 7);
    }

    #[test]
    fn test_polyline() {
        let points = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)];
        let open = polyline(&points, false);
        let closed = polyline(&points, true);

        assert_eq!(open.elements().len(), 3);
        assert_eq!(closed.elements().len(), 4);
        assert!(polyline(&[], true).elements().is_empty());
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn coord() -> impl Strategy<Value = f64> {
        -500.0f64..500.0
    }

    /// The transform is rigid: distances between vertices are unchanged.
    fn check_distances_preserved(
        a: (f64, f64),
        b: (f64, f64),
        position: (f64, f64),
        rotation: f64,
    ) -> Result<(), TestCaseError> {
        let mut path = BezPath::new();
        path.move_to(a);
        path.line_to(b);
        let placed = transform(&path, 0.0, position.into(), rotation);
        let vertices = path_vertices(&placed);

        let before = Point::from(a).distance(Point::from(b));
        let after = vertices[0].distance(vertices[1]);
        prop_assert!(approx_eq!(f64, before, after, epsilon = 1e-7));
        Ok(())
    }

    /// The template origin always lands on the target position.
    fn check_origin_lands_on_position(
        position: (f64, f64),
        rotation: f64,
    ) -> Result<(), TestCaseError> {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        let placed = transform(&path, 0.0, position.into(), rotation);
        let origin = path_vertices(&placed)[0];

        prop_assert!(approx_eq!(f64, origin.x(), position.0, epsilon = 1e-9));
        prop_assert!(approx_eq!(f64, origin.y(), position.1, epsilon = 1e-9));
        Ok(())
    }

    proptest! {
        #[test]
        fn distances_preserved(
            a in (coord(), coord()),
            b in (coord(), coord()),
            position in (coord(), coord()),
            rotation in -7.0f64..7.0,
        ) {
            check_distances_preserved(a, b, position, rotation)?;
        }

        #[test]
        fn origin_lands_on_position(
            position in (coord(), coord()),
            rotation in -7.0f64..7.0,
        ) {
            check_origin_lands_on_position(position, rotation)?;
        }
    }
}
