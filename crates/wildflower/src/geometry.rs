//! Core geometry types for wildflower.
//!
//! Screen coordinates: x grows to the right, y grows downward. Angles are
//! measured counter-clockwise from the positive x axis, so "straight up" is
//! `π/2` and following an angle subtracts its sine from y.
//!
//! ## Rust Lesson #3: Copy types instead of mutation
//!
//! In JS a `Vector` class would typically mutate itself and `return this`
//! for chaining. Here `Vector` is a small `Copy` value: every operation hands
//! back a fresh vector, so two computations can never share (and clobber)
//! the same scratch instance.

use serde::{Deserialize, Serialize};

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A 2D displacement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

/// Direction of a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Project from this point along `angle` by `distance`.
    ///
    /// Uses the screen convention: `x' = x + cos(angle)·d`, `y' = y − sin(angle)·d`.
    #[inline]
    pub fn follow_angle(&self, angle: f64, distance: f64) -> Point {
        Point::new(
            self.x + angle.cos() * distance,
            self.y - angle.sin() * distance,
        )
    }

    /// Point at `radius` from this one along `angle`, with y following the
    /// sine directly (petal layout around a flower center).
    #[inline]
    pub fn on_circle(&self, angle: f64, radius: f64) -> Point {
        Point::new(
            self.x + angle.cos() * radius,
            self.y + angle.sin() * radius,
        )
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        Vector::between(*self, other).length()
    }

    /// Midpoint between this point and another.
    #[inline]
    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl Vector {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Displacement from `a` to `b`.
    #[inline]
    pub fn between(a: Point, b: Point) -> Self {
        Self::new(b.x - a.x, b.y - a.y)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        // hypot avoids underflow when squaring tiny components
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Heading of this vector in `[-π/2, 3π/2)`.
    ///
    /// A two-quadrant arctangent of `y/x`, shifted by `π` when `x < 0` to
    /// recover the full turn.
    ///
    /// # Panics
    /// Panics on a zero-length vector, which has no heading.
    pub fn angle(&self) -> f64 {
        assert!(!self.is_zero(), "angle of a zero-length vector is undefined");
        let atan = (self.y / self.x).atan();
        if self.x < 0.0 { atan + std::f64::consts::PI } else { atan }
    }

    #[inline]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Same direction, new length.
    ///
    /// # Panics
    /// Panics on a zero-length vector, which has no direction to keep.
    pub fn with_length(self, length: f64) -> Self {
        let current = self.length();
        assert!(current > 0.0, "cannot set the length of a zero-length vector");
        self.scale(length / current)
    }

    /// Rotate by exactly 90 degrees.
    #[inline]
    pub fn rotate_quarter(self, turn: Turn) -> Self {
        match turn {
            Turn::Clockwise => Self::new(self.y, -self.x),
            Turn::CounterClockwise => Self::new(-self.y, self.x),
        }
    }

    /// Translate a point by this vector.
    #[inline]
    pub fn offset(&self, point: Point) -> Point {
        Point::new(point.x + self.x, point.y + self.y)
    }

    #[inline]
    pub fn dot(&self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }
}

impl Bounds {
    /// Bounding box of a point set; `None` when empty.
    pub fn of_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in &points[1..] {
            bounds.include(*p);
        }
        Some(bounds)
    }

    /// Grow to contain `p`.
    pub fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grow every side by `margin`.
    pub fn expand(&self, margin: f64) -> Bounds {
        Bounds {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn tiny_vectors_keep_their_length() {
        let v = Vector::new(3e-300, 4e-300);
        assert!((v.length() - 5e-300).abs() < 1e-310);

        let unit = v.with_length(1.0);
        assert!((unit.x - 0.6).abs() < 1e-12);
        assert!((unit.y - 0.8).abs() < 1e-12);
    }

    #[test]
    fn tiny_petal_builds() {
        let petal = crate::petal::Petal::build(
            Point::new(0.0, 0.0),
            1e-300,
            4e-300,
            0.3,
            1e-300,
            crate::color::Color::rgb(0, 0, 0),
        );
        assert!(petal.spine().length() > 0.0);
    }

    const EPS: f64 = 1e-9;

    #[test]
    fn follow_angle_up_decreases_y() {
        let p = Point::new(10.0, 100.0).follow_angle(PI / 2.0, 20.0);
        assert!((p.x - 10.0).abs() < EPS);
        assert!((p.y - 80.0).abs() < EPS);
    }

    #[test]
    fn follow_angle_zero_moves_right() {
        let p = Point::new(0.0, 0.0).follow_angle(0.0, 5.0);
        assert!((p.x - 5.0).abs() < EPS);
        assert!(p.y.abs() < EPS);
    }

    #[test]
    fn on_circle_uses_downward_sine() {
        let p = Point::new(0.0, 0.0).on_circle(PI / 2.0, 3.0);
        assert!(p.x.abs() < EPS);
        assert!((p.y - 3.0).abs() < EPS);
    }

    #[test]
    fn angle_covers_left_half_plane() {
        assert!((Vector::new(1.0, 1.0).angle() - PI / 4.0).abs() < EPS);
        assert!((Vector::new(-1.0, 1.0).angle() - 3.0 * PI / 4.0).abs() < EPS);
        assert!((Vector::new(-1.0, -1.0).angle() - 5.0 * PI / 4.0).abs() < EPS);
        assert!((Vector::new(1.0, -1.0).angle() + PI / 4.0).abs() < EPS);
    }

    #[test]
    fn angle_of_vertical_vector() {
        assert!((Vector::new(0.0, 2.0).angle() - PI / 2.0).abs() < EPS);
        assert!((Vector::new(0.0, -2.0).angle() + PI / 2.0).abs() < EPS);
    }

    #[test]
    #[should_panic(expected = "zero-length")]
    fn angle_of_zero_vector_panics() {
        Vector::new(0.0, 0.0).angle();
    }

    #[test]
    #[should_panic(expected = "zero-length")]
    fn with_length_of_zero_vector_panics() {
        Vector::new(0.0, 0.0).with_length(3.0);
    }

    #[test]
    fn with_length_keeps_direction() {
        let v = Vector::new(3.0, 4.0).with_length(10.0);
        assert!((v.x - 6.0).abs() < EPS);
        assert!((v.y - 8.0).abs() < EPS);
    }

    #[test]
    fn quarter_turns_are_perpendicular_and_opposite() {
        let v = Vector::new(2.0, 1.0);
        let cw = v.rotate_quarter(Turn::Clockwise);
        let ccw = v.rotate_quarter(Turn::CounterClockwise);
        assert_eq!(cw, Vector::new(1.0, -2.0));
        assert_eq!(ccw, Vector::new(-1.0, 2.0));
        assert!(v.dot(cw).abs() < EPS);
        assert_eq!(cw.scale(-1.0), ccw);
    }

    #[test]
    fn operations_do_not_alias() {
        let spine = Vector::new(4.0, 0.0);
        let half = spine.scale(0.5);
        let side = spine.rotate_quarter(Turn::Clockwise);
        assert_eq!(spine, Vector::new(4.0, 0.0));
        assert_eq!(half, Vector::new(2.0, 0.0));
        assert_eq!(side, Vector::new(0.0, -4.0));
    }

    #[test]
    fn bounds_of_points() {
        let b = Bounds::of_points(&[
            Point::new(1.0, 5.0),
            Point::new(-2.0, 3.0),
            Point::new(4.0, -1.0),
        ])
        .unwrap();
        assert_eq!(b, Bounds { min_x: -2.0, min_y: -1.0, max_x: 4.0, max_y: 5.0 });
        assert_eq!(b.width(), 6.0);
        assert_eq!(b.height(), 6.0);
        assert!(Bounds::of_points(&[]).is_none());
    }
}
