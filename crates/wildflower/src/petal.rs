//! Petal curve builder.
//!
//! A petal is a lens shape: two quadratic curves joining the same start and
//! end points, bulging to opposite sides of the start→end spine. Flower
//! heads and leaves both use it; leaves simply start at radius zero.
//!
//! ```text
//!              control_a
//!            .-'''''-.
//!   start  o-----+-----o  end
//!            '-.....-'
//!              control_b
//! ```

use lyon_geom::{point, QuadraticBezierSegment};
use serde::Serialize;

use crate::color::Color;
use crate::geometry::{Bounds, Point, Turn, Vector};

/// Default tolerance for flattening petal curves.
pub const FLATTEN_TOLERANCE: f64 = 0.25;

/// One lens-shaped petal (or leaf).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Petal {
    /// On the inner radius
    pub start: Point,
    /// On the outer radius
    pub end: Point,
    /// Control point of the start→end curve (counter-clockwise side)
    pub control_a: Point,
    /// Control point of the end→start curve (clockwise side)
    pub control_b: Point,
    pub color: Color,
}

impl Petal {
    /// Build a petal pointing from `center` along `angle`.
    ///
    /// Start and end sit at `inner_radius` and `outer_radius`; both control
    /// points sit `bulge_width / 2` from the spine midpoint, perpendicular to
    /// the spine.
    ///
    /// # Panics
    /// Panics when the two radii coincide, since the spine then has no
    /// direction to be perpendicular to.
    pub fn build(
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        angle: f64,
        bulge_width: f64,
        color: Color,
    ) -> Self {
        let start = center.on_circle(angle, inner_radius);
        let end = center.on_circle(angle, outer_radius);

        let spine = Vector::between(start, end);
        let middle = spine.scale(0.5).offset(start);

        let control_a = spine
            .rotate_quarter(Turn::CounterClockwise)
            .with_length(bulge_width / 2.0)
            .offset(middle);
        let control_b = spine
            .rotate_quarter(Turn::Clockwise)
            .with_length(bulge_width / 2.0)
            .offset(middle);

        Self { start, end, control_a, control_b, color }
    }

    /// Vector from start to end.
    #[inline]
    pub fn spine(&self) -> Vector {
        Vector::between(self.start, self.end)
    }

    /// The two curves of the outline, in drawing order.
    fn curves(&self) -> [QuadraticBezierSegment<f64>; 2] {
        [
            QuadraticBezierSegment {
                from: point(self.start.x, self.start.y),
                ctrl: point(self.control_a.x, self.control_a.y),
                to: point(self.end.x, self.end.y),
            },
            QuadraticBezierSegment {
                from: point(self.end.x, self.end.y),
                ctrl: point(self.control_b.x, self.control_b.y),
                to: point(self.start.x, self.start.y),
            },
        ]
    }

    /// Flatten the outline to a closed polyline (first point repeated last).
    pub fn outline(&self, tolerance: f64) -> Vec<Point> {
        let mut points = vec![self.start];
        for curve in self.curves() {
            curve.for_each_flattened(tolerance, &mut |segment| {
                points.push(Point::new(segment.to.x, segment.to.y));
            });
        }
        points
    }

    /// Bounding box of the flattened outline.
    pub fn bounds(&self) -> Bounds {
        let outline = self.outline(FLATTEN_TOLERANCE);
        // outline always holds at least the start point
        Bounds::of_points(&outline).unwrap_or(Bounds {
            min_x: self.start.x,
            min_y: self.start.y,
            max_x: self.start.x,
            max_y: self.start.y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;
    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn endpoints_on_radii() {
        let center = Point::new(100.0, 100.0);
        let petal = Petal::build(center, 10.0, 40.0, 0.0, 8.0, RED);
        assert!((petal.start.x - 110.0).abs() < EPS);
        assert!((petal.end.x - 140.0).abs() < EPS);
        assert!((petal.start.y - 100.0).abs() < EPS);
    }

    #[test]
    fn angle_turns_toward_positive_y() {
        let petal = Petal::build(Point::new(0.0, 0.0), 1.0, 2.0, PI / 2.0, 1.0, RED);
        assert!((petal.end.y - 2.0).abs() < EPS);
    }

    #[test]
    fn controls_symmetric_and_perpendicular() {
        let center = Point::new(3.0, -7.0);
        for i in 0..12 {
            let angle = i as f64 * PI / 6.0 + 0.1;
            let petal = Petal::build(center, 12.0, 50.0, angle, 20.0, RED);
            let middle = petal.start.midpoint(petal.end);

            // Symmetric about the spine midpoint
            let mid_controls = petal.control_a.midpoint(petal.control_b);
            assert!((mid_controls.x - middle.x).abs() < 1e-9);
            assert!((mid_controls.y - middle.y).abs() < 1e-9);

            // Each offset is perpendicular to the spine, at half the bulge
            let spine = petal.spine();
            for control in [petal.control_a, petal.control_b] {
                let offset = Vector::between(middle, control);
                assert!(offset.dot(spine).abs() < 1e-6);
                assert!((offset.length() - 10.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn control_a_is_counter_clockwise_side() {
        // Spine along +x; counter-clockwise quarter turn of (1, 0) is (0, 1)
        let petal = Petal::build(Point::new(0.0, 0.0), 0.0, 10.0, 0.0, 4.0, RED);
        assert!((petal.control_a.x - 5.0).abs() < EPS);
        assert!((petal.control_a.y - 2.0).abs() < EPS);
        assert!((petal.control_b.y + 2.0).abs() < EPS);
    }

    #[test]
    fn leaf_starts_at_center() {
        let corner = Point::new(20.0, 30.0);
        let leaf = Petal::build(corner, 0.0, 60.0, 1.5 * PI, 40.0, RED);
        assert_eq!(leaf.start, corner);
        assert!((leaf.spine().length() - 60.0).abs() < 1e-9);
    }

    #[test]
    #[should_panic(expected = "zero-length")]
    fn equal_radii_panic() {
        Petal::build(Point::new(0.0, 0.0), 5.0, 5.0, 0.0, 2.0, RED);
    }

    #[test]
    fn outline_is_closed_and_contains_bulge() {
        let petal = Petal::build(Point::new(0.0, 0.0), 0.0, 10.0, 0.0, 4.0, RED);
        let outline = petal.outline(0.01);
        assert!(outline.len() > 4);
        let first = outline[0];
        let last = outline[outline.len() - 1];
        assert!(first.distance(last) < 1e-9);

        // A quadratic peaks halfway to its control point: 4 / 2 / 2 = 1
        let bounds = petal.bounds();
        assert!((bounds.max_y - 1.0).abs() < 0.05);
        assert!((bounds.min_y + 1.0).abs() < 0.05);
        assert!((bounds.max_x - 10.0).abs() < 1e-9);
    }
}
