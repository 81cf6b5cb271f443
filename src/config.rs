//! Configuration: the button map, D-Pad mode and window geometry.
//!
//! Loaded from an optional YAML file; every field has a compiled-in default
//! matching the pad the tester was originally written for.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::actions::Action;

/// Default physical-button-index → action assignment.
///
/// These indices are configuration defaults, not verified hardware facts:
/// run with `--diagnostics` to check the numbering of a specific pad and
/// override `mapping.button_map` in the config file when it differs.
static DEFAULT_BUTTON_MAP: Lazy<HashMap<u8, Action>> = Lazy::new(|| {
    HashMap::from([
        (0, Action::ActionX),
        (1, Action::ActionA),
        (2, Action::ActionB),
        (3, Action::ActionY),
        (4, Action::ActionL),
        (5, Action::ActionR),
        (8, Action::Select),
        (9, Action::Start),
    ])
});

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub mapping: MappingConfig,
    #[serde(default)]
    pub window: WindowConfig,
}

/// Button map and directional-input mode handed to the translator.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MappingConfig {
    /// Physical button index → action. Indices not present are ignored.
    #[serde(default = "default_button_map")]
    pub button_map: HashMap<u8, Action>,
    #[serde(default)]
    pub dpad: DpadConfig,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            button_map: default_button_map(),
            dpad: DpadConfig::default(),
        }
    }
}

fn default_button_map() -> HashMap<u8, Action> {
    DEFAULT_BUTTON_MAP.clone()
}

/// How directional input is read.
///
/// Most modern pads report the D-Pad on two analog axes; set `use_hat` when
/// the diagnostics dump shows a hat instead.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct DpadConfig {
    /// Read the hat instead of the axis pair.
    #[serde(default)]
    pub use_hat: bool,
    /// Axis index for gauche/droite in axis mode.
    #[serde(default = "default_horizontal_axis")]
    pub horizontal_axis: usize,
    /// Axis index for haut/bas in axis mode.
    #[serde(default = "default_vertical_axis")]
    pub vertical_axis: usize,
}

impl Default for DpadConfig {
    fn default() -> Self {
        Self {
            use_hat: false,
            horizontal_axis: default_horizontal_axis(),
            vertical_axis: default_vertical_axis(),
        }
    }
}

fn default_horizontal_axis() -> usize {
    0
}

fn default_vertical_axis() -> usize {
    1
}

/// Display window geometry.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_width")]
    pub width: f32,
    #[serde(default = "default_window_height")]
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

fn default_window_width() -> f32 {
    400.0
}

fn default_window_height() -> f32 {
    200.0
}

impl AppConfig {
    /// Load the config file, falling back to the defaults when it is absent.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config file at {}, using built-in defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_button_map_matches_documented_indices() {
        let config = MappingConfig::default();
        assert_eq!(config.button_map.len(), 8);
        assert_eq!(config.button_map[&0], Action::ActionX);
        assert_eq!(config.button_map[&1], Action::ActionA);
        assert_eq!(config.button_map[&2], Action::ActionB);
        assert_eq!(config.button_map[&3], Action::ActionY);
        assert_eq!(config.button_map[&4], Action::ActionL);
        assert_eq!(config.button_map[&5], Action::ActionR);
        assert_eq!(config.button_map[&8], Action::Select);
        assert_eq!(config.button_map[&9], Action::Start);
        assert!(!config.button_map.contains_key(&6));
        assert!(!config.button_map.contains_key(&7));
    }

    #[test]
    fn test_default_dpad_is_axis_mode() {
        let dpad = DpadConfig::default();
        assert!(!dpad.use_hat);
        assert_eq!(dpad.horizontal_axis, 0);
        assert_eq!(dpad.vertical_axis, 1);
    }

    #[test]
    fn test_partial_yaml_keeps_field_defaults() {
        let config: AppConfig = serde_yaml::from_str(
            "mapping:\n  dpad:\n    use_hat: true\n",
        )
        .unwrap();
        assert!(config.mapping.dpad.use_hat);
        // Unspecified fields fall back to their defaults.
        assert_eq!(config.mapping.dpad.horizontal_axis, 0);
        assert_eq!(config.mapping.button_map[&9], Action::Start);
        assert_eq!(config.window.width, 400.0);
    }

    #[test]
    fn test_button_map_override_parses_action_names() {
        let config: AppConfig = serde_yaml::from_str(
            "mapping:\n  button_map:\n    2: action_a\n    7: start\n",
        )
        .unwrap();
        assert_eq!(config.mapping.button_map.len(), 2);
        assert_eq!(config.mapping.button_map[&2], Action::ActionA);
        assert_eq!(config.mapping.button_map[&7], Action::Start);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = AppConfig::load_or_default("does-not-exist.yaml").unwrap();
        assert_eq!(config.mapping.button_map.len(), 8);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "window:\n  width: 640\n  height: 360").unwrap();
        let config = AppConfig::load_or_default(file.path()).unwrap();
        assert_eq!(config.window.width, 640.0);
        assert_eq!(config.window.height, 360.0);
        // Sections missing from the file still get defaults.
        assert!(!config.mapping.dpad.use_hat);
    }

    #[test]
    fn test_load_rejects_malformed_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mapping: [not, a, mapping]").unwrap();
        assert!(AppConfig::load_or_default(file.path()).is_err());
    }
}
