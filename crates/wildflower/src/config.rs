//! Session configuration.
//!
//! A `SessionConfig` is built once, before any plant is generated, and only
//! read afterwards. The handful of values that vary per session (maximum
//! heading rotation, branch probability) are drawn by [`SessionConfig::roll`]
//! instead of living in global state.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::rng::RandomSource;

/// Whether a plant's branches share the main flower color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorPolicy {
    /// Every flower on the plant uses the plant's color.
    Shared,
    /// Each branch flower picks its own palette color.
    Diverse,
}

/// Multiplicative per-step width factor range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaperRange {
    pub min: f64,
    pub max: f64,
}

impl TaperRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Draw one factor.
    #[inline]
    pub fn sample(&self, rng: &mut dyn RandomSource) -> f64 {
        rng.uniform(self.min, self.max)
    }
}

/// Drawing area size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self { width: 600.0, height: 800.0 }
    }
}

/// Smallest accepted `min_base_width`.
pub const MIN_BASE_WIDTH: f64 = 1.0;

/// Process-wide generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Stroke for segments, petals and leaves
    pub outline_color: Color,
    /// Fill for stem segments
    pub stem_color: Color,
    /// Fill for the flower center disc
    pub center_color: Color,
    /// Fill for leaves
    pub leaf_color: Color,
    /// Flower colors to pick from
    pub palette: Vec<Color>,
    /// Smallest base width of a primary stem
    pub min_base_width: f64,
    /// Heading corrections start once the deviation from vertical exceeds `π/2 − angle_limit`
    pub angle_limit: f64,
    /// Largest heading change per step
    pub max_rotation: f64,
    /// Per-step probability of spawning a branch
    pub branch_chance: f64,
    /// Per-step probability of attaching a leaf
    pub leaf_chance: f64,
    /// Forced color policy; `None` rolls one per plant
    pub color_policy: Option<ColorPolicy>,
    pub stem_taper: TaperRange,
    pub branch_taper: TaperRange,
    /// Angular skew of segment top corners (radians)
    pub segment_skew: f64,
    /// Walk advance per step, as a fraction of the current width
    pub advance_ratio: f64,
    /// Stroke width of segment outlines
    pub outline_width: f64,
    /// Branches nested deeper than this never spawn further branches
    pub max_branch_depth: u32,
    /// Upper bound on the steps of any single branch
    pub max_branch_steps: usize,
    /// Upper bound on the steps of a primary stem
    pub max_stem_steps: usize,
    /// Upper bound on the segments of a whole plant, branches included
    pub max_segments: usize,
    pub canvas: Canvas,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            outline_color: Color::rgb(0x4b, 0x53, 0x20),
            stem_color: Color::rgb(0x84, 0xf5, 0x42),
            center_color: Color::rgb(0xe0, 0xdd, 0x26),
            leaf_color: Color::rgb(0x24, 0x8f, 0x11),
            palette: vec![
                Color::rgb(0xe0, 0x63, 0x77),
                Color::rgb(0xc8, 0x33, 0x49),
                Color::rgb(0x5b, 0x9a, 0xa0),
                Color::rgb(0x62, 0x25, 0x69),
                Color::rgb(0xe2, 0x8d, 0x00),
            ],
            min_base_width: 25.0,
            angle_limit: PI * 0.3,
            max_rotation: PI * 0.2,
            branch_chance: 0.04,
            leaf_chance: 0.0,
            color_policy: None,
            stem_taper: TaperRange::new(0.96, 1.0),
            branch_taper: TaperRange::new(0.95, 1.0),
            segment_skew: PI * 0.05,
            advance_ratio: 0.8,
            outline_width: 2.0,
            max_branch_depth: 3,
            max_branch_steps: 512,
            max_stem_steps: 4096,
            max_segments: 20_000,
            canvas: Canvas::default(),
        }
    }
}

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    EmptyPalette,
    /// A size or ratio that must be strictly positive
    NotPositive(&'static str, f64),
    /// A value below its accepted floor: name, value, floor
    BelowMinimum(&'static str, f64, f64),
    /// A probability outside `[0, 1]`
    BadProbability(&'static str, f64),
    /// A taper range that is inverted or allows growth or collapse
    BadTaper(&'static str, TaperRange),
    /// An angle outside `[0, π/2]`
    BadAngle(&'static str, f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyPalette => write!(f, "palette must contain at least one color"),
            ConfigError::NotPositive(name, v) => write!(f, "{} must be positive, got {}", name, v),
            ConfigError::BelowMinimum(name, v, min) => {
                write!(f, "{} must be at least {}, got {}", name, min, v)
            }
            ConfigError::BadProbability(name, v) => {
                write!(f, "{} must be within [0, 1], got {}", name, v)
            }
            ConfigError::BadTaper(name, t) => write!(
                f,
                "{} must satisfy 0 < min <= max <= 1, got [{}, {}]",
                name, t.min, t.max
            ),
            ConfigError::BadAngle(name, v) => {
                write!(f, "{} must be within [0, π/2], got {}", name, v)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl SessionConfig {
    /// Draw the per-session randomized values: `max_rotation` in
    /// `[0.1π, 0.3π)`, then `branch_chance` in `[0, 0.08)`.
    pub fn roll(mut self, rng: &mut dyn RandomSource) -> Self {
        self.max_rotation = PI * 0.1 + rng.next_f64() * PI * 0.2;
        self.branch_chance = rng.next_f64() * 0.08;
        self
    }

    /// Check every value generation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        for (name, value) in [
            ("min_base_width", self.min_base_width),
            ("advance_ratio", self.advance_ratio),
            ("canvas.width", self.canvas.width),
            ("canvas.height", self.canvas.height),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NotPositive(name, value));
            }
        }
        for (name, steps) in [
            ("max_branch_steps", self.max_branch_steps),
            ("max_stem_steps", self.max_stem_steps),
            ("max_segments", self.max_segments),
        ] {
            if steps == 0 {
                return Err(ConfigError::NotPositive(name, 0.0));
            }
        }
        if self.min_base_width < MIN_BASE_WIDTH {
            return Err(ConfigError::BelowMinimum("min_base_width", self.min_base_width, MIN_BASE_WIDTH));
        }
        if !(self.outline_width >= 0.0) {
            return Err(ConfigError::NotPositive("outline_width", self.outline_width));
        }
        for (name, value) in [
            ("branch_chance", self.branch_chance),
            ("leaf_chance", self.leaf_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::BadProbability(name, value));
            }
        }
        for (name, taper) in [("stem_taper", self.stem_taper), ("branch_taper", self.branch_taper)] {
            if !(taper.min > 0.0 && taper.min <= taper.max && taper.max <= 1.0) {
                return Err(ConfigError::BadTaper(name, taper));
            }
        }
        for (name, value) in [
            ("angle_limit", self.angle_limit),
            ("max_rotation", self.max_rotation),
            ("segment_skew", self.segment_skew),
        ] {
            if !(0.0..=PI / 2.0).contains(&value) {
                return Err(ConfigError::BadAngle(name, value));
            }
        }
        Ok(())
    }

    /// Pick a flower color from the palette (one draw).
    pub fn pick_flower_color(&self, rng: &mut dyn RandomSource) -> Color {
        assert!(!self.palette.is_empty(), "palette must contain at least one color");
        self.palette[rng.index(self.palette.len())]
    }

    /// Deviation from vertical beyond which heading changes are biased back
    /// toward center.
    #[inline]
    pub fn cone_half_width(&self) -> f64 {
        PI / 2.0 - self.angle_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Scripted;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SessionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn roll_draws_rotation_then_branch_chance() {
        let mut source = Scripted::new(vec![0.5, 0.25]);
        let config = SessionConfig::default().roll(&mut source);
        assert!((config.max_rotation - PI * 0.2).abs() < 1e-12);
        assert!((config.branch_chance - 0.02).abs() < 1e-12);
        assert_eq!(config.leaf_chance, 0.0);
        assert_eq!(source.draws(), 2);
    }

    #[test]
    fn roll_stays_in_band() {
        let mut rng = crate::rng::Rng::new(7);
        for _ in 0..200 {
            let config = SessionConfig::default().roll(&mut rng);
            assert!(config.max_rotation >= PI * 0.1 && config.max_rotation < PI * 0.3);
            assert!(config.branch_chance >= 0.0 && config.branch_chance < 0.08);
        }
    }

    #[test]
    fn empty_palette_rejected() {
        let config = SessionConfig { palette: Vec::new(), ..SessionConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::EmptyPalette));
    }

    #[test]
    fn growing_taper_rejected() {
        let config = SessionConfig {
            stem_taper: TaperRange::new(0.9, 1.1),
            ..SessionConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::BadTaper("stem_taper", _))));
    }

    #[test]
    fn bad_probability_rejected() {
        let config = SessionConfig { leaf_chance: 1.5, ..SessionConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::BadProbability("leaf_chance", _))));
    }

    #[test]
    fn non_positive_width_rejected() {
        let config = SessionConfig { min_base_width: 0.0, ..SessionConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::NotPositive("min_base_width", _))));
    }

    #[test]
    fn tiny_width_rejected() {
        for width in [0.5, 1e-300] {
            let config = SessionConfig { min_base_width: width, ..SessionConfig::default() };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::BelowMinimum("min_base_width", _, _))
            ));
        }
        let config = SessionConfig { min_base_width: 1.0, ..SessionConfig::default() };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn zero_segment_budget_rejected() {
        let config = SessionConfig { max_segments: 0, ..SessionConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::NotPositive("max_segments", _))));
    }

    #[test]
    fn cone_matches_angle_limit() {
        let config = SessionConfig::default();
        assert!((config.cone_half_width() - PI * 0.2).abs() < 1e-12);
    }
}
