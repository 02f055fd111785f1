//! Plant generation entry point.
//!
//! `grow_plant` turns a stream of random numbers into a complete [`Plant`]:
//! the primary stem walk (with any branches and leaves it spawns along the
//! way) and the flower at its tip. Shapes are recorded in paint order, so a
//! branch and its flower come before the parent's next segment, and
//! [`Plant::draw`] replays them onto any [`Surface`].

use std::f64::consts::PI;

use serde::Serialize;

use crate::color::Color;
use crate::config::{Canvas, ColorPolicy, SessionConfig};
use crate::flower::FlowerHead;
use crate::geometry::{Bounds, Point};
use crate::petal::Petal;
use crate::rng::RandomSource;
use crate::stem::{self, Segment, StemKind, StemState, StemTrace, StopCondition};
use crate::surface::Surface;

/// Initial conditions of a primary stem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlantStart {
    pub position: Point,
    pub heading: f64,
    pub width: f64,
    /// Target plant height; the stem stops once `y <= stem_height / 2`
    pub stem_height: f64,
}

impl PlantStart {
    /// Random start for `config.canvas`.
    ///
    /// Draw order: heading `U(π/4, 3π/4)`, width `U(w, 2w)` for
    /// `w = min_base_width`, stem height `U(H/4, 3H/4)`. The stem starts
    /// horizontally centered at `y = H − stem_height/2`.
    pub fn roll(config: &SessionConfig, rng: &mut dyn RandomSource) -> Self {
        let Canvas { width, height } = config.canvas;
        let heading = rng.next_f64() * PI * 0.5 + PI * 0.25;
        let stem_width = rng.next_f64() * config.min_base_width + config.min_base_width;
        let stem_height = rng.next_f64() * height / 2.0 + height / 4.0;

        Self {
            position: Point::new(width / 2.0, height - stem_height / 2.0),
            heading,
            width: stem_width,
            stem_height,
        }
    }
}

/// Fixed colors and stroke used when drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Style {
    pub outline: Color,
    pub stem: Color,
    pub center: Color,
    pub outline_width: f64,
}

impl From<&SessionConfig> for Style {
    fn from(config: &SessionConfig) -> Self {
        Self {
            outline: config.outline_color,
            stem: config.stem_color,
            center: config.center_color,
            outline_width: config.outline_width,
        }
    }
}

/// One drawable element, in paint order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Segment(Segment),
    Flower(FlowerHead),
    Leaf(Petal),
}

/// A fully generated plant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plant {
    pub start: PlantStart,
    /// Color of the primary flower
    pub color: Color,
    pub policy: ColorPolicy,
    pub canvas: Canvas,
    pub style: Style,
    shapes: Vec<Shape>,
    stems: Vec<StemTrace>,
}

/// Mutable state threaded through one generation pass.
pub(crate) struct Growth<'a> {
    pub(crate) config: &'a SessionConfig,
    pub(crate) rng: &'a mut dyn RandomSource,
    pub(crate) plant_color: Color,
    pub(crate) policy: ColorPolicy,
    pub(crate) stem_height: f64,
    pub(crate) shapes: Vec<Shape>,
    pub(crate) stems: Vec<StemTrace>,
    /// Segments emitted so far, across every walk
    pub(crate) segments: usize,
}

impl Growth<'_> {
    pub(crate) fn push_segment(&mut self, segment: Segment) {
        self.segments += 1;
        self.shapes.push(Shape::Segment(segment));
    }

    /// Whether the plant may still emit segments.
    #[inline]
    pub(crate) fn has_budget(&self) -> bool {
        self.segments < self.config.max_segments
    }

    /// Cap a finished walk with a flower (four draws).
    pub(crate) fn push_flower(&mut self, end: &StemState, color: Color) {
        let head = FlowerHead::grow(end.position, end.width, color, self.rng);
        self.shapes.push(Shape::Flower(head));
    }

    /// Attach a leaf to a random corner of `segment`.
    ///
    /// Draw order: corner, length `U(50,80)`, angle `U(π,2π)`, bulge `U(30,50)`.
    pub(crate) fn attach_leaf(&mut self, segment: &Segment) {
        let corner = segment.corners[self.rng.index(4)];
        let length = self.rng.next_f64() * 30.0 + 50.0;
        let angle = self.rng.next_f64() * PI + PI;
        let bulge = self.rng.next_f64() * 20.0 + 30.0;
        let leaf = Petal::build(corner, 0.0, length, angle, bulge, self.config.leaf_color);
        self.shapes.push(Shape::Leaf(leaf));
    }
}

/// Generate one plant at a random start.
pub fn grow_plant(config: &SessionConfig, rng: &mut dyn RandomSource) -> Plant {
    let start = PlantStart::roll(config, rng);
    grow_plant_from(config, start, rng)
}

/// Generate one plant from explicit initial conditions.
///
/// Draw order: plant color, color policy (unless the config forces one),
/// the primary walk, then the terminal flower.
///
/// # Panics
/// Panics if the start width is not positive and finite.
pub fn grow_plant_from(config: &SessionConfig, start: PlantStart, rng: &mut dyn RandomSource) -> Plant {
    assert!(
        start.width > 0.0 && start.width.is_finite(),
        "stem width must be positive and finite, got {}",
        start.width
    );

    let color = config.pick_flower_color(rng);
    let policy = config.color_policy.unwrap_or_else(|| {
        if rng.chance(0.5) {
            ColorPolicy::Shared
        } else {
            ColorPolicy::Diverse
        }
    });

    let mut growth = Growth {
        config,
        rng,
        plant_color: color,
        policy,
        stem_height: start.stem_height,
        shapes: Vec::new(),
        stems: Vec::new(),
        segments: 0,
    };

    let end = stem::walk(
        &mut growth,
        StemState::new(start.position, start.heading, start.width),
        StemKind::Primary,
        StopCondition::AboveHeight(start.stem_height / 2.0),
    );
    growth.push_flower(&end, color);

    Plant {
        start,
        color,
        policy,
        canvas: config.canvas,
        style: Style::from(config),
        shapes: growth.shapes,
        stems: growth.stems,
    }
}

impl Plant {
    /// All shapes in paint order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Every walk; the primary stem is first, branches follow in spawn order.
    pub fn stems(&self) -> &[StemTrace] {
        &self.stems
    }

    pub fn primary(&self) -> &StemTrace {
        // walk() always records the primary stem first
        &self.stems[0]
    }

    pub fn branches(&self) -> impl Iterator<Item = &StemTrace> {
        self.stems
            .iter()
            .filter(|s| matches!(s.kind, StemKind::Branch { .. }))
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Segment(segment) => Some(segment),
            _ => None,
        })
    }

    pub fn flowers(&self) -> impl Iterator<Item = &FlowerHead> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Flower(head) => Some(head),
            _ => None,
        })
    }

    pub fn leaves(&self) -> impl Iterator<Item = &Petal> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Leaf(leaf) => Some(leaf),
            _ => None,
        })
    }

    /// The flower at the tip of the primary stem (always painted last).
    pub fn head(&self) -> &FlowerHead {
        match self.shapes.last() {
            Some(Shape::Flower(head)) => head,
            _ => unreachable!("a plant always ends with its primary flower"),
        }
    }

    pub fn petal_count(&self) -> usize {
        self.flowers().map(FlowerHead::petal_count).sum()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Bounding box of everything drawn, with curves flattened.
    pub fn bounds(&self) -> Bounds {
        let head = self.head().bounds();
        self.shapes.iter().fold(head, |acc, shape| {
            let b = match shape {
                Shape::Segment(segment) => segment.bounds(),
                Shape::Flower(flower) => flower.bounds(),
                Shape::Leaf(leaf) => leaf.bounds(),
            };
            acc.union(&b)
        })
    }

    /// Clear `surface` and paint the plant onto it.
    pub fn draw(&self, surface: &mut dyn Surface) {
        let style = &self.style;
        surface.clear(self.canvas.width, self.canvas.height);

        for shape in &self.shapes {
            match shape {
                Shape::Segment(segment) => {
                    surface.fill_polygon(&segment.corners, style.stem, style.outline, style.outline_width);
                }
                Shape::Flower(head) => {
                    surface.fill_circle(head.center, head.disc_radius(), style.center);
                    for petal in head.petals() {
                        surface.fill_petal(&petal, style.outline, style.outline_width);
                    }
                }
                Shape::Leaf(leaf) => {
                    surface.fill_petal(leaf, style.outline, style.outline_width);
                }
            }
        }
    }
}
