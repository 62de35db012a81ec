//! Module brackets.

use log::debug;

use sbolv_core::{
    canvas::Canvas,
    color::Color,
    draw::PathStyle,
    geometry::{Bounds, Point},
};

use crate::transform::polyline;

/// Draws a dashed rectangle around the glyphs from `start` to `end`.
///
/// The rectangle is padded horizontally by a tenth of the distance between
/// the two glyphs' left edges and vertically by the span from the bottom of
/// `start` to the top of `end`, then grown by the stretch amounts.
///
/// Returns the bounds of the rectangle.
pub fn draw_module(
    canvas: &mut dyn Canvas,
    start: Bounds,
    end: Bounds,
    x_stretch: f64,
    y_stretch: f64,
) -> Bounds {
    let x_pad = (end.min_x() - start.min_x()) / 10.0;
    let y_pad = end.max_y() - start.min_y();

    let min = Point::new(
        start.min_x() - x_pad - x_stretch,
        start.min_y() - y_pad - y_stretch,
    );
    let max = Point::new(
        end.max_x() + x_pad + x_stretch,
        end.max_y() + y_pad + y_stretch,
    );

    let outline = polyline(
        &[
            min,
            Point::new(max.x(), min.y()),
            max,
            Point::new(min.x(), max.y()),
        ],
        true,
    );
    canvas.add_filled_stroked_path(&outline, &PathStyle::dashed_outline(Color::default(), 1.0));

    debug!(min:?, max:?; "Drew module");
    Bounds::new(min, max)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use sbolv_core::{canvas::RecordingCanvas, draw::StrokeStyle};

    use super::*;
    use crate::transform::path_vertices;

    #[test]
    fn test_module_padding() {
        let start = Bounds::new(Point::new(0.0, -5.0), Point::new(10.0, 5.0));
        let end = Bounds::new(Point::new(40.0, -5.0), Point::new(50.0, 5.0));

        let mut canvas = RecordingCanvas::new();
        let bounds = draw_module(&mut canvas, start, end, 1.0, 2.0);

        assert_approx_eq!(f64, bounds.min_x(), -5.0);
        assert_approx_eq!(f64, bounds.min_y(), -17.0);
        assert_approx_eq!(f64, bounds.max_x(), 55.0);
        assert_approx_eq!(f64, bounds.max_y(), 17.0);

        let (path, style) = canvas.paths().next().unwrap();
        assert_eq!(style.fill(), None);
        assert_eq!(*style.stroke().unwrap().style(), StrokeStyle::Dashed);
        for vertex in path_vertices(path) {
            assert!(bounds.contains_point(vertex));
        }
    }

    #[test]
    fn test_single_glyph_module() {
        let glyph = Bounds::new(Point::new(0.0, 0.0), Point::new(10.0, 4.0));
        let bounds = draw_module(&mut RecordingCanvas::new(), glyph, glyph, 0.0, 0.0);

        assert_approx_eq!(f64, bounds.min_x(), 0.0);
        assert_approx_eq!(f64, bounds.max_x(), 10.0);
        assert_approx_eq!(f64, bounds.min_y(), -4.0);
        assert_approx_eq!(f64, bounds.max_y(), 8.0);
    }
}
