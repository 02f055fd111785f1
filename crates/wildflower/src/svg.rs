//! SVG output.
//!
//! `SvgSurface` implements [`Surface`] by appending SVG elements to a string.
//! Petals keep their quadratic curves (`Q` path commands) instead of being
//! flattened, so the output scales cleanly.

use std::fmt::Write;

use crate::color::Color;
use crate::geometry::{Bounds, Point};
use crate::petal::Petal;
use crate::surface::Surface;

/// A surface that builds an SVG document.
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    view_box: Option<Bounds>,
    background: Option<Color>,
    body: String,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `bounds` as the viewBox instead of the cleared canvas.
    pub fn with_view_box(mut self, bounds: Bounds) -> Self {
        self.view_box = Some(bounds);
        self
    }

    /// Paint a full-size background rectangle under everything else.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Number of shape elements written so far.
    pub fn element_count(&self) -> usize {
        self.body.lines().count()
    }

    /// Finish the document.
    pub fn finish(&self) -> String {
        let view_box = self.view_box.unwrap_or(Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: self.width,
            max_y: self.height,
        });

        let mut svg = String::new();
        svg.push_str(&format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{:.2}" height="{:.2}" viewBox="{:.2} {:.2} {:.2} {:.2}">
"#,
            view_box.width(),
            view_box.height(),
            view_box.min_x,
            view_box.min_y,
            view_box.width(),
            view_box.height(),
        ));

        if let Some(color) = self.background {
            svg.push_str(&format!(
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>\n",
                view_box.min_x,
                view_box.min_y,
                view_box.width(),
                view_box.height(),
                color
            ));
        }

        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }
}

/// "x1,y1 x2,y2 ..." for a `points` attribute.
fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

impl Surface for SvgSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.body.clear();
    }

    fn fill_polygon(&mut self, points: &[Point], fill: Color, stroke: Color, stroke_width: f64) {
        if points.len() < 3 {
            return;
        }
        // write! to a String cannot fail
        let _ = writeln!(
            self.body,
            "  <polygon points=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{:.2}\"/>",
            points_attr(points),
            fill,
            stroke,
            stroke_width
        );
    }

    fn fill_circle(&mut self, center: Point, radius: f64, fill: Color) {
        let _ = writeln!(
            self.body,
            "  <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"/>",
            center.x, center.y, radius, fill
        );
    }

    fn fill_petal(&mut self, petal: &Petal, stroke: Color, stroke_width: f64) {
        let _ = writeln!(
            self.body,
            "  <path d=\"M{:.2},{:.2} Q{:.2},{:.2} {:.2},{:.2} Q{:.2},{:.2} {:.2},{:.2} Z\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{:.2}\"/>",
            petal.start.x,
            petal.start.y,
            petal.control_a.x,
            petal.control_a.y,
            petal.end.x,
            petal.end.y,
            petal.control_b.x,
            petal.control_b.y,
            petal.start.x,
            petal.start.y,
            petal.color,
            stroke,
            stroke_width
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
