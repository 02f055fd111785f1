//! CLI command implementations.
//!
//! - `draw` - Grow a plant and write SVG, PNG or JSON
//! - `config` - Print the effective configuration
//! - `palette` - List the colors a plant is drawn with

pub mod common;
pub mod config_cmd;
pub mod config_file;
pub mod draw;
pub mod palette;

pub use config_cmd::cmd_config;
pub use draw::cmd_draw;
pub use palette::cmd_palette;
