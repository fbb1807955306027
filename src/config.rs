//! Runtime configuration persistence
//!
//! Stores settings in `~/.config/panelkit/config.yaml`

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::dragger::{InteractionSettings, DEFAULT_RESIZE_THICKNESS, DEFAULT_TITLE_BAR_HEIGHT};
use crate::geometry::{Screen, Vec2};

/// Runtime configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Size of root space in reference units
    #[serde(default = "default_reference_resolution")]
    pub reference_resolution: Vec2,

    /// Screen pixels per reference unit
    #[serde(default = "default_ui_scale")]
    pub ui_scale: f32,

    /// Width of the resize strips around each panel
    #[serde(default = "default_resize_thickness")]
    pub resize_thickness: f32,

    /// Height of the title bar drag surface
    #[serde(default = "default_title_bar_height")]
    pub title_bar_height: f32,
}

fn default_reference_resolution() -> Vec2 {
    Screen::default().reference_resolution
}

fn default_ui_scale() -> f32 {
    1.0
}

fn default_resize_thickness() -> f32 {
    DEFAULT_RESIZE_THICKNESS
}

fn default_title_bar_height() -> f32 {
    DEFAULT_TITLE_BAR_HEIGHT
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            reference_resolution: default_reference_resolution(),
            ui_scale: default_ui_scale(),
            resize_thickness: default_resize_thickness(),
            title_bar_height: default_title_bar_height(),
        }
    }
}

impl RuntimeConfig {
    /// Load config from disk, or return defaults if not found or invalid
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = crate::config_paths::config_file().context("No config directory available")?;
        self.save_to(&path)?;
        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Save config to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    pub fn screen(&self) -> Screen {
        Screen::new(self.reference_resolution, self.ui_scale)
    }

    pub fn interaction(&self) -> InteractionSettings {
        InteractionSettings {
            resize_thickness: self.resize_thickness.max(0.0),
            title_bar_height: self.title_bar_height.max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: RuntimeConfig = serde_yaml::from_str("ui_scale: 1.5\n").unwrap();
        assert_eq!(config.ui_scale, 1.5);
        assert_eq!(config.reference_resolution, Vec2::new(1920.0, 1080.0));
        assert_eq!(config.resize_thickness, DEFAULT_RESIZE_THICKNESS);
    }

    #[test]
    fn test_screen_sanitizes_scale() {
        let config = RuntimeConfig {
            ui_scale: -2.0,
            ..Default::default()
        };
        assert_eq!(config.screen().scale, 1.0);
    }

    #[test]
    fn test_interaction_settings_from_config() {
        let config = RuntimeConfig {
            resize_thickness: 6.0,
            title_bar_height: 24.0,
            ..Default::default()
        };
        let settings = config.interaction();
        assert_eq!(settings.resize_thickness, 6.0);
        assert_eq!(settings.title_bar_height, 24.0);
    }
}
