//! Flower head generator.
//!
//! A flower head is a center disc ringed by petals. Petals come in opposing
//! pairs: for `i` in `0..half_count` one petal points along `iπ/half_count`
//! and its twin along the same angle plus `π`, which spaces the pairs evenly
//! over a half turn.

use std::f64::consts::PI;

use serde::Serialize;

use crate::color::Color;
use crate::geometry::{Bounds, Point};
use crate::petal::Petal;
use crate::rng::RandomSource;

/// Radial flower capping a stem or branch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlowerHead {
    pub center: Point,
    /// Where petals start
    pub inner_radius: f64,
    /// Where petals end
    pub outer_radius: f64,
    /// Number of opposing petal pairs
    pub half_count: u32,
    /// Width between a petal's two control points
    pub bulge_width: f64,
    pub color: Color,
}

impl FlowerHead {
    /// Derive a flower from the width of the stem it caps.
    ///
    /// Draw order: half count `⌊U(8,18)⌋`, outer radius `stem_width·U(2,6)`,
    /// inner radius `outer·U(0.25,0.5)`, bulge factor `U(4,6)`.
    pub fn grow(center: Point, stem_width: f64, color: Color, rng: &mut dyn RandomSource) -> Self {
        let half_count = (rng.next_f64() * 10.0 + 8.0).floor() as u32;
        let outer_radius = (rng.next_f64() * 4.0 + 2.0) * stem_width;
        let inner_radius = (rng.next_f64() * 0.25 + 0.25) * outer_radius;
        let bulge_width = (PI * inner_radius / half_count as f64) * (rng.next_f64() * 2.0 + 4.0);

        Self {
            center,
            inner_radius,
            outer_radius,
            half_count,
            bulge_width,
            color,
        }
    }

    /// Radius of the center disc: midway between inner and outer radius.
    #[inline]
    pub fn disc_radius(&self) -> f64 {
        (self.inner_radius + self.outer_radius) / 2.0
    }

    #[inline]
    pub fn petal_count(&self) -> usize {
        2 * self.half_count as usize
    }

    /// Petal angles as `(θ, θ + π)` pairs.
    pub fn petal_pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        (0..self.half_count).map(move |i| {
            let angle = PI / self.half_count as f64 * i as f64;
            (angle, angle + PI)
        })
    }

    /// All petals, each pair's two members adjacent.
    pub fn petals(&self) -> Vec<Petal> {
        let mut petals = Vec::with_capacity(self.petal_count());
        for (angle, opposite) in self.petal_pairs() {
            for a in [angle, opposite] {
                petals.push(Petal::build(
                    self.center,
                    self.inner_radius,
                    self.outer_radius,
                    a,
                    self.bulge_width,
                    self.color,
                ));
            }
        }
        petals
    }

    /// Bounding box of disc and petals.
    pub fn bounds(&self) -> Bounds {
        let r = self.disc_radius();
        let disc = Bounds {
            min_x: self.center.x - r,
            min_y: self.center.y - r,
            max_x: self.center.x + r,
            max_y: self.center.y + r,
        };
        self.petals()
            .iter()
            .fold(disc, |acc, petal| acc.union(&petal.bounds()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{Rng, Scripted};
    use crate::geometry::Vector;

    const PINK: Color = Color::rgb(0xe0, 0x63, 0x77);

    #[test]
    fn scripted_draws_set_dimensions() {
        let mut source = Scripted::new(vec![0.5, 0.5, 0.0, 0.5]);
        let head = FlowerHead::grow(Point::new(0.0, 0.0), 10.0, PINK, &mut source);
        assert_eq!(head.half_count, 13);
        assert!((head.outer_radius - 40.0).abs() < 1e-12);
        assert!((head.inner_radius - 10.0).abs() < 1e-12);
        assert!((head.bulge_width - PI * 10.0 / 13.0 * 5.0).abs() < 1e-12);
        assert!((head.disc_radius() - 25.0).abs() < 1e-12);
        assert_eq!(source.draws(), 4);
    }

    #[test]
    fn half_count_range() {
        let mut low = Scripted::constant(0.0);
        let mut high = Scripted::constant(0.999_999);
        assert_eq!(FlowerHead::grow(Point::new(0.0, 0.0), 5.0, PINK, &mut low).half_count, 8);
        assert_eq!(FlowerHead::grow(Point::new(0.0, 0.0), 5.0, PINK, &mut high).half_count, 17);
    }

    #[test]
    fn inner_radius_inside_outer() {
        let mut rng = Rng::new(99);
        for _ in 0..200 {
            let width = rng.uniform(1.0, 40.0);
            let head = FlowerHead::grow(Point::new(0.0, 0.0), width, PINK, &mut rng);
            assert!(head.outer_radius >= 2.0 * width && head.outer_radius < 6.0 * width);
            assert!(head.inner_radius >= 0.25 * head.outer_radius);
            assert!(head.inner_radius < 0.5 * head.outer_radius);
        }
    }

    #[test]
    fn petals_come_in_opposite_pairs() {
        let mut rng = Rng::new(3);
        let center = Point::new(50.0, 60.0);
        let head = FlowerHead::grow(center, 12.0, PINK, &mut rng);
        let petals = head.petals();
        assert_eq!(petals.len(), 2 * head.half_count as usize);

        for pair in petals.chunks(2) {
            let a = Vector::between(center, pair[0].end);
            let b = Vector::between(center, pair[1].end);
            // Opposite directions: b == -a
            assert!((a.x + b.x).abs() < 1e-9);
            assert!((a.y + b.y).abs() < 1e-9);
        }
    }

    #[test]
    fn pair_angles_evenly_spaced_over_half_turn() {
        let head = FlowerHead {
            center: Point::new(0.0, 0.0),
            inner_radius: 5.0,
            outer_radius: 20.0,
            half_count: 8,
            bulge_width: 4.0,
            color: PINK,
        };
        let pairs: Vec<_> = head.petal_pairs().collect();
        assert_eq!(pairs.len(), 8);
        for (i, (angle, opposite)) in pairs.iter().enumerate() {
            assert!((angle - i as f64 * PI / 8.0).abs() < 1e-12);
            assert!((opposite - angle - PI).abs() < 1e-12);
        }
    }

    #[test]
    fn bounds_cover_petal_tips() {
        let head = FlowerHead {
            center: Point::new(0.0, 0.0),
            inner_radius: 5.0,
            outer_radius: 20.0,
            half_count: 8,
            bulge_width: 4.0,
            color: PINK,
        };
        let b = head.bounds();
        assert!((b.max_x - 20.0).abs() < 1e-9);
        assert!((b.min_x + 20.0).abs() < 1e-9);
    }
}
