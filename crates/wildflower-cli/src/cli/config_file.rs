//! YAML configuration overlay.
//!
//! Every field is optional; only the fields present in the file override
//! the session configuration. The output of `wildflower config` is itself a
//! valid config file.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use wildflower::{Color, ColorPolicy, ConfigError, SessionConfig, TaperRange};

/// Error type for loading a config file.
#[derive(Debug)]
pub enum LoadError {
    Read { path: String, source: std::io::Error },
    Parse { path: String, source: serde_yaml::Error },
    Invalid(ConfigError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Read { path, source } => write!(f, "cannot read config {}: {}", path, source),
            LoadError::Parse { path, source } => write!(f, "invalid config {}: {}", path, source),
            LoadError::Invalid(e) => write!(f, "invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Read { source, .. } => Some(source),
            LoadError::Parse { source, .. } => Some(source),
            LoadError::Invalid(e) => Some(e),
        }
    }
}

/// Canvas overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CanvasOverride {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// A partial `SessionConfig` as read from YAML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub outline_color: Option<Color>,
    pub stem_color: Option<Color>,
    pub center_color: Option<Color>,
    pub leaf_color: Option<Color>,
    pub palette: Option<Vec<Color>>,
    pub min_base_width: Option<f64>,
    pub angle_limit: Option<f64>,
    pub max_rotation: Option<f64>,
    pub branch_chance: Option<f64>,
    pub leaf_chance: Option<f64>,
    pub color_policy: Option<ColorPolicy>,
    pub stem_taper: Option<TaperRange>,
    pub branch_taper: Option<TaperRange>,
    pub segment_skew: Option<f64>,
    pub advance_ratio: Option<f64>,
    pub outline_width: Option<f64>,
    pub max_branch_depth: Option<u32>,
    pub max_branch_steps: Option<usize>,
    pub max_stem_steps: Option<usize>,
    pub max_segments: Option<usize>,
    pub canvas: Option<CanvasOverride>,
}

impl ConfigFile {
    /// Load a config file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| LoadError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse from a YAML string. An empty document is an empty overlay.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Overwrite the fields of `config` that this file sets.
    pub fn apply(self, config: &mut SessionConfig) {
        if let Some(v) = self.outline_color {
            config.outline_color = v;
        }
        if let Some(v) = self.stem_color {
            config.stem_color = v;
        }
        if let Some(v) = self.center_color {
            config.center_color = v;
        }
        if let Some(v) = self.leaf_color {
            config.leaf_color = v;
        }
        if let Some(v) = self.palette {
            config.palette = v;
        }
        if let Some(v) = self.min_base_width {
            config.min_base_width = v;
        }
        if let Some(v) = self.angle_limit {
            config.angle_limit = v;
        }
        if let Some(v) = self.max_rotation {
            config.max_rotation = v;
        }
        if let Some(v) = self.branch_chance {
            config.branch_chance = v;
        }
        if let Some(v) = self.leaf_chance {
            config.leaf_chance = v;
        }
        if let Some(v) = self.color_policy {
            config.color_policy = Some(v);
        }
        if let Some(v) = self.stem_taper {
            config.stem_taper = v;
        }
        if let Some(v) = self.branch_taper {
            config.branch_taper = v;
        }
        if let Some(v) = self.segment_skew {
            config.segment_skew = v;
        }
        if let Some(v) = self.advance_ratio {
            config.advance_ratio = v;
        }
        if let Some(v) = self.outline_width {
            config.outline_width = v;
        }
        if let Some(v) = self.max_branch_depth {
            config.max_branch_depth = v;
        }
        if let Some(v) = self.max_branch_steps {
            config.max_branch_steps = v;
        }
        if let Some(v) = self.max_stem_steps {
            config.max_stem_steps = v;
        }
        if let Some(v) = self.max_segments {
            config.max_segments = v;
        }
        if let Some(canvas) = self.canvas {
            if let Some(w) = canvas.width {
                config.canvas.width = w;
            }
            if let Some(h) = canvas.height {
                config.canvas.height = h;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_overlay_keeps_other_fields() {
        let yaml = r##"
palette: ["#ff0000", "#00ff00"]
leaf_chance: 0.1
canvas:
  width: 1000
"##;
        let file = ConfigFile::from_yaml(yaml).unwrap();
        let mut config = SessionConfig::default();
        file.apply(&mut config);

        assert_eq!(config.palette, vec![Color::rgb(255, 0, 0), Color::rgb(0, 255, 0)]);
        assert_eq!(config.leaf_chance, 0.1);
        assert_eq!(config.canvas.width, 1000.0);
        assert_eq!(config.canvas.height, 800.0);
        assert_eq!(config.stem_color, SessionConfig::default().stem_color);
    }

    #[test]
    fn empty_file_is_empty_overlay() {
        let mut config = SessionConfig::default();
        ConfigFile::from_yaml("\n").unwrap().apply(&mut config);
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn dumped_config_loads_back() {
        let original = SessionConfig {
            color_policy: Some(ColorPolicy::Diverse),
            branch_chance: 0.07,
            max_segments: 500,
            ..SessionConfig::default()
        };
        let yaml = serde_yaml::to_string(&original).unwrap();
        let mut config = SessionConfig::default();
        ConfigFile::from_yaml(&yaml).unwrap().apply(&mut config);
        assert_eq!(config, original);
    }

    #[test]
    fn bad_color_is_a_parse_error() {
        assert!(ConfigFile::from_yaml("stem_color: green").is_err());
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        assert!(ConfigFile::from_yaml("petal_count: 12").is_err());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = ConfigFile::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.yaml"));
    }
}
