//! # wildflower
//!
//! Procedural plant generation: a stem random-walks upward in overlapping
//! quadrilateral segments, occasionally forks into branches, and every stem
//! ends in a flower head of lens-shaped petals.
//!
//! ```no_run
//! use wildflower::{grow_plant, Rng, SessionConfig, SvgSurface};
//!
//! let mut rng = Rng::new(42);
//! let config = SessionConfig::default().roll(&mut rng);
//! let plant = grow_plant(&config, &mut rng);
//!
//! let mut svg = SvgSurface::new();
//! plant.draw(&mut svg);
//! println!("{}", svg.finish());
//! ```
//!
//! ## Rust Lesson #7: Modules
//!
//! Visibility is per item, not per file. `pub` items are part of the crate's
//! API, `pub(crate)` items are shared between modules but hidden from users.
//! `plant` ties the generators together; `branch` and `stem` call back into
//! it through a crate-private `Growth` struct, which is why some of their
//! items are `pub(crate)` rather than `pub`.

pub mod branch;
pub mod color;
pub mod config;
pub mod flower;
pub mod geometry;
pub mod petal;
pub mod plant;
pub mod rng;
pub mod stem;
pub mod surface;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use color::{Color, ColorError};
pub use config::{Canvas, ColorPolicy, ConfigError, SessionConfig, TaperRange};
pub use flower::FlowerHead;
pub use geometry::{Bounds, Point, Turn, Vector};
pub use petal::{Petal, FLATTEN_TOLERANCE};
pub use plant::{grow_plant, grow_plant_from, Plant, PlantStart, Shape, Style};
pub use rng::{RandomSource, Rng, Scripted};
pub use stem::{Segment, StemKind, StemState, StemTrace};
pub use surface::{DrawCommand, Recorder, Surface};
pub use svg::SvgSurface;
