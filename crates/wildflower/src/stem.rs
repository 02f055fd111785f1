//! Stem path generator.
//!
//! A stem is a random walk. Each step emits one quadrilateral [`Segment`]
//! around the current position, then moves forward, nudges the heading,
//! and shrinks the width. Steps overlap (the walk advances 80% of the width
//! while a segment is a full width tall) so consecutive segments never leave
//! a gap.
//!
//! Algorithm (per step):
//!   1. segment corners from position, heading, width
//!   2. advance along heading by `advance_ratio · width`
//!   3. steer: biased back toward vertical outside the cone, unbiased inside
//!   4. taper: `width *= U(taper.min, taper.max)`
//!   5. maybe spawn a branch
//!   6. maybe attach a leaf (primary stem only)

use std::f64::consts::PI;

use serde::Serialize;

use crate::branch;
use crate::config::SessionConfig;
use crate::geometry::{Bounds, Point};
use crate::plant::Growth;
use crate::rng::RandomSource;

/// A walk stops once its width tapers below this.
pub const MIN_STEM_WIDTH: f64 = 1e-3;

/// One quadrilateral slice of a stem.
///
/// Corners are ordered bottom-right, top-right, top-left, bottom-left
/// (relative to the heading).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub corners: [Point; 4],
}

impl Segment {
    #[inline]
    pub fn bottom_right(&self) -> Point {
        self.corners[0]
    }

    #[inline]
    pub fn top_right(&self) -> Point {
        self.corners[1]
    }

    #[inline]
    pub fn top_left(&self) -> Point {
        self.corners[2]
    }

    #[inline]
    pub fn bottom_left(&self) -> Point {
        self.corners[3]
    }

    pub fn bounds(&self) -> Bounds {
        // four corners, never empty
        let mut bounds = Bounds {
            min_x: self.corners[0].x,
            min_y: self.corners[0].y,
            max_x: self.corners[0].x,
            max_y: self.corners[0].y,
        };
        for corner in &self.corners[1..] {
            bounds.include(*corner);
        }
        bounds
    }
}

/// Walk state: where the stem is, which way it grows, how wide it is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StemState {
    pub position: Point,
    /// Radians; `π/2` is straight up
    pub heading: f64,
    pub width: f64,
}

impl StemState {
    pub fn new(position: Point, heading: f64, width: f64) -> Self {
        Self { position, heading, width }
    }

    /// Angular distance from straight up.
    #[inline]
    pub fn deviation(&self) -> f64 {
        (self.heading - PI / 2.0).abs()
    }

    /// The segment for the current step.
    ///
    /// Bottom corners sit half a width to either side of the position; top
    /// corners are projected a full width forward along the heading skewed
    /// inward by `skew`, giving a slightly twisted trapezoid.
    pub fn segment(&self, skew: f64) -> Segment {
        let half = self.width / 2.0;
        let bottom_right = self.position.follow_angle(self.heading - PI / 2.0, half);
        let top_right = bottom_right.follow_angle(self.heading + skew, self.width);
        let bottom_left = self.position.follow_angle(self.heading + PI / 2.0, half);
        let top_left = bottom_left.follow_angle(self.heading - skew, self.width);

        Segment {
            corners: [bottom_right, top_right, top_left, bottom_left],
        }
    }

    /// Move forward by `ratio` of the current width.
    #[inline]
    pub fn advance(&mut self, ratio: f64) {
        self.position = self.position.follow_angle(self.heading, self.width * ratio);
    }

    /// Perturb the heading (one draw).
    ///
    /// Outside the cone the change only ever points back toward vertical;
    /// inside it is uniform in `[−max_rotation/2, max_rotation/2)`. Primary
    /// stems and branches share the cone from `angle_limit`.
    pub fn steer(&mut self, config: &SessionConfig, rng: &mut dyn RandomSource) {
        let r = rng.next_f64();
        if self.deviation() > config.cone_half_width() {
            let nudge = r * config.max_rotation;
            if self.heading > PI / 2.0 {
                self.heading -= nudge;
            } else {
                self.heading += nudge;
            }
        } else {
            self.heading += r * config.max_rotation - config.max_rotation / 2.0;
        }
    }

    /// Shrink the width by a factor in `[min, max)` (one draw).
    #[inline]
    pub fn taper(&mut self, factor: f64) {
        self.width *= factor;
    }
}

/// Primary stem or branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StemKind {
    Primary,
    Branch { depth: u32 },
}

impl StemKind {
    /// 0 for the primary stem, nesting level for branches.
    #[inline]
    pub fn depth(&self) -> u32 {
        match self {
            StemKind::Primary => 0,
            StemKind::Branch { depth } => *depth,
        }
    }

    /// Whether stems of this kind may spawn branches.
    #[inline]
    pub fn can_branch(&self, config: &SessionConfig) -> bool {
        self.depth() < config.max_branch_depth
    }
}

/// When a walk stops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StopCondition {
    /// Keep going while `y` is below (greater than) this line
    AboveHeight(f64),
    /// Take exactly this many steps
    Steps(usize),
}

impl StopCondition {
    #[inline]
    fn keep_going(&self, state: &StemState, step: usize) -> bool {
        match *self {
            StopCondition::AboveHeight(threshold) => state.position.y > threshold,
            StopCondition::Steps(n) => step < n,
        }
    }
}

/// Record of one walk, kept for inspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StemTrace {
    pub kind: StemKind,
    /// State at each emitted segment, in order
    pub steps: Vec<StemState>,
    /// State after the last step; the flower sits here
    pub end: StemState,
}

impl StemTrace {
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.steps.len()
    }

    pub fn start(&self) -> StemState {
        self.steps.first().copied().unwrap_or(self.end)
    }
}

/// Run one walk to completion, emitting segments (and any branches or
/// leaves) into `growth`. Returns the final state.
///
/// Besides its stop condition and step cap, a walk ends early when its
/// width falls below [`MIN_STEM_WIDTH`] or the plant's segment budget
/// (`max_segments`) is spent.
pub(crate) fn walk(
    growth: &mut Growth<'_>,
    mut state: StemState,
    kind: StemKind,
    stop: StopCondition,
) -> StemState {
    let config = growth.config;
    let (taper, cap) = match kind {
        StemKind::Primary => (config.stem_taper, config.max_stem_steps),
        StemKind::Branch { .. } => (config.branch_taper, config.max_branch_steps),
    };

    let index = growth.stems.len();
    growth.stems.push(StemTrace {
        kind,
        steps: Vec::new(),
        end: state,
    });

    let mut step = 0;
    while step < cap
        && state.width >= MIN_STEM_WIDTH
        && growth.has_budget()
        && stop.keep_going(&state, step)
    {
        let segment = state.segment(config.segment_skew);
        growth.stems[index].steps.push(state);
        growth.push_segment(segment);

        state.advance(config.advance_ratio);
        state.steer(config, growth.rng);
        let factor = taper.sample(growth.rng);
        state.taper(factor);

        if kind.can_branch(config) && growth.rng.chance(config.branch_chance) {
            branch::spawn(growth, &state, kind.depth() + 1);
        }

        if kind == StemKind::Primary && growth.rng.chance(config.leaf_chance) {
            growth.attach_leaf(&segment);
        }

        step += 1;
    }

    growth.stems[index].end = state;
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Scripted;

    const EPS: f64 = 1e-9;

    #[test]
    fn upright_segment_corners() {
        let state = StemState::new(Point::new(100.0, 200.0), PI / 2.0, 20.0);
        let segment = state.segment(0.0);
        assert!((segment.bottom_right().x - 110.0).abs() < EPS);
        assert!((segment.bottom_left().x - 90.0).abs() < EPS);
        assert!((segment.bottom_right().y - 200.0).abs() < EPS);
        assert!((segment.top_right().x - 110.0).abs() < EPS);
        assert!((segment.top_right().y - 180.0).abs() < EPS);
        assert!((segment.top_left().y - 180.0).abs() < EPS);
    }

    #[test]
    fn skew_pulls_top_corners_inward() {
        let state = StemState::new(Point::new(0.0, 0.0), PI / 2.0, 10.0);
        let segment = state.segment(PI * 0.05);
        // Right corner leans left, left corner leans right
        assert!(segment.top_right().x < segment.bottom_right().x);
        assert!(segment.top_left().x > segment.bottom_left().x);
        let top_gap = segment.top_right().x - segment.top_left().x;
        assert!(top_gap < 10.0 && top_gap > 0.0);
    }

    #[test]
    fn advance_moves_eighty_percent_of_width() {
        let mut state = StemState::new(Point::new(0.0, 100.0), PI / 2.0, 25.0);
        state.advance(0.8);
        assert!((state.position.y - 80.0).abs() < EPS);
    }

    #[test]
    fn steer_inside_cone_is_centered() {
        let config = SessionConfig { max_rotation: 0.4, ..SessionConfig::default() };
        let mut state = StemState::new(Point::new(0.0, 0.0), PI / 2.0, 10.0);
        state.steer(&config, &mut Scripted::constant(0.0));
        assert!((state.heading - (PI / 2.0 - 0.2)).abs() < EPS);

        let mut state = StemState::new(Point::new(0.0, 0.0), PI / 2.0, 10.0);
        state.steer(&config, &mut Scripted::constant(0.5));
        assert!((state.heading - PI / 2.0).abs() < EPS);
    }

    #[test]
    fn steer_outside_cone_turns_back() {
        let config = SessionConfig { max_rotation: 0.4, ..SessionConfig::default() };
        // Leaning far right (heading below π/2)
        let mut right = StemState::new(Point::new(0.0, 0.0), 0.2, 10.0);
        right.steer(&config, &mut Scripted::constant(0.5));
        assert!((right.heading - 0.4).abs() < EPS);

        // Leaning far left
        let mut left = StemState::new(Point::new(0.0, 0.0), PI - 0.2, 10.0);
        left.steer(&config, &mut Scripted::constant(0.5));
        assert!((left.heading - (PI - 0.4)).abs() < EPS);
    }

    #[test]
    fn steer_outside_cone_never_increases_deviation() {
        let config = SessionConfig { max_rotation: 0.3 * PI, ..SessionConfig::default() };
        for r in [0.0, 0.1, 0.5, 0.9, 0.999] {
            let mut state = StemState::new(Point::new(0.0, 0.0), PI / 2.0 + 0.3 * PI, 10.0);
            let before = state.deviation();
            state.steer(&config, &mut Scripted::constant(r));
            assert!(state.deviation() <= before + EPS);
        }
    }

    #[test]
    fn kind_depth_and_branching() {
        let config = SessionConfig { max_branch_depth: 2, ..SessionConfig::default() };
        assert!(StemKind::Primary.can_branch(&config));
        assert!(StemKind::Branch { depth: 1 }.can_branch(&config));
        assert!(!StemKind::Branch { depth: 2 }.can_branch(&config));
    }

    #[test]
    fn stop_conditions() {
        let state = StemState::new(Point::new(0.0, 60.0), PI / 2.0, 10.0);
        assert!(StopCondition::AboveHeight(50.0).keep_going(&state, 100));
        assert!(!StopCondition::AboveHeight(60.0).keep_going(&state, 0));
        assert!(StopCondition::Steps(3).keep_going(&state, 2));
        assert!(!StopCondition::Steps(3).keep_going(&state, 3));
    }
}
