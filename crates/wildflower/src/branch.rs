//! Branch recursion.
//!
//! A branch is a fresh stem walk rooted at the parent's current position,
//! run for a fixed number of steps and capped by its own flower. Its length
//! comes from a heuristic rather than a physical measure:
//!
//!   steps = ⌈(start_y − stem_height/2) / start_width⌉
//!
//! so branches spawned low on a plant, or from a thin stem, run longer.
//! Branches may themselves branch until `max_branch_depth` is reached.

use std::f64::consts::PI;

use crate::config::ColorPolicy;
use crate::plant::Growth;
use crate::stem::{self, StemKind, StemState, StopCondition};

/// Number of steps for a branch starting at height `start_y` with
/// `start_width`, clamped to `cap`.
///
/// Heights at or above the plant's stopping line give zero steps.
///
/// # Panics
/// Panics if `start_width` is not a positive, finite number; the formula
/// divides by it and would otherwise never terminate.
pub fn step_count(start_y: f64, stem_height: f64, start_width: f64, cap: usize) -> usize {
    assert!(
        start_width > 0.0 && start_width.is_finite(),
        "branch width must be positive and finite, got {}",
        start_width
    );
    let raw = (start_y - stem_height / 2.0) / start_width;
    if raw > 0.0 {
        (raw.ceil() as usize).min(cap)
    } else {
        0
    }
}

/// Spawn a branch from `parent` and grow it to its flower.
///
/// Draw order: heading offset `U(−π/2, π/2)`, flower color (diverse policy
/// only), the walk itself, then the flower.
pub(crate) fn spawn(growth: &mut Growth<'_>, parent: &StemState, depth: u32) {
    let heading = parent.heading + growth.rng.next_f64() * PI - PI / 2.0;
    let steps = step_count(
        parent.position.y,
        growth.stem_height,
        parent.width,
        growth.config.max_branch_steps,
    );

    let color = match growth.policy {
        ColorPolicy::Shared => growth.plant_color,
        ColorPolicy::Diverse => growth.config.pick_flower_color(growth.rng),
    };

    let start = StemState::new(parent.position, heading, parent.width);
    let end = stem::walk(growth, start, StemKind::Branch { depth }, StopCondition::Steps(steps));
    growth.push_flower(&end, color);
}
