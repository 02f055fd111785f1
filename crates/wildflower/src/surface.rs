//! Drawing surfaces.
//!
//! Generation never rasterizes anything itself. A finished [`crate::Plant`]
//! replays its shapes onto anything implementing [`Surface`].
//!
//! ## Rust Lesson #8: Traits
//!
//! A trait is like a TypeScript `interface`: it names methods a type must
//! provide. `&mut dyn Surface` is a "trait object" - the caller doesn't know
//! (or care) whether it's drawing into an SVG string, a recorder in a test,
//! or something else entirely.

use crate::color::Color;
use crate::geometry::Point;
use crate::petal::Petal;

/// A 2D drawing target.
pub trait Surface {
    /// Reset the surface to an empty `width × height` area.
    fn clear(&mut self, width: f64, height: f64);

    /// Fill a closed polygon and stroke its outline.
    fn fill_polygon(&mut self, points: &[Point], fill: Color, stroke: Color, stroke_width: f64);

    /// Fill a circle (no outline).
    fn fill_circle(&mut self, center: Point, radius: f64, fill: Color);

    /// Fill a petal outline (start → control_a → end → control_b → start)
    /// with the petal's color and stroke it.
    fn fill_petal(&mut self, petal: &Petal, stroke: Color, stroke_width: f64);
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    Polygon {
        points: Vec<Point>,
        fill: Color,
        stroke: Color,
        stroke_width: f64,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Color,
    },
    Petal {
        petal: Petal,
        stroke: Color,
        stroke_width: f64,
    },
}

/// A surface that just remembers what it was asked to draw.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of polygon fills.
    pub fn polygons(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Polygon { .. }))
            .count()
    }

    /// Number of circle fills.
    pub fn circles(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    /// Number of petal fills (flower petals and leaves).
    pub fn petals(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Petal { .. }))
            .count()
    }
}

impl Surface for Recorder {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_polygon(&mut self, points: &[Point], fill: Color, stroke: Color, stroke_width: f64) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            fill,
            stroke,
            stroke_width,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, fill: Color) {
        self.commands.push(DrawCommand::Circle { center, radius, fill });
    }

    fn fill_petal(&mut self, petal: &Petal, stroke: Color, stroke_width: f64) {
        self.commands.push(DrawCommand::Petal {
            petal: *petal,
            stroke,
            stroke_width,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Color = Color::rgb(0, 0, 0);

    #[test]
    fn clear_discards_previous_commands() {
        let mut recorder = Recorder::new();
        recorder.fill_circle(Point::new(1.0, 1.0), 2.0, BLACK);
        recorder.clear(10.0, 20.0);
        assert_eq!(recorder.commands, vec![DrawCommand::Clear { width: 10.0, height: 20.0 }]);
    }

    #[test]
    fn counts_by_kind() {
        let mut recorder = Recorder::new();
        let square = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        recorder.fill_polygon(&square, BLACK, BLACK, 2.0);
        recorder.fill_circle(Point::new(0.0, 0.0), 1.0, BLACK);
        let petal = Petal::build(Point::new(0.0, 0.0), 1.0, 3.0, 0.0, 1.0, BLACK);
        recorder.fill_petal(&petal, BLACK, 2.0);
        recorder.fill_petal(&petal, BLACK, 2.0);
        assert_eq!(recorder.polygons(), 1);
        assert_eq!(recorder.circles(), 1);
        assert_eq!(recorder.petals(), 2);
    }
}
