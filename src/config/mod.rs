//! Configuration for theme handling

pub mod context;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use context::ThemeContext;

/// Tunable theme rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    /// Color slots that keep their alpha channel
    pub colors_with_alpha: Vec<String>,

    /// Slot to read when a slot is missing from raw input
    pub fallback_colors: IndexMap<String, String>,

    /// Largest alpha difference still considered equal
    pub alpha_equality_tolerance: f64,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        let colors_with_alpha = [
            "toolbar",
            "toolbar_field",
            "toolbar_field_border",
            "toolbar_top_separator",
            "toolbar_bottom_separator",
            "toolbar_vertical_separator",
            "tab_selected",
        ];
        let fallback_colors = [("tab_selected", "toolbar"), ("tab_text", "toolbar_text")];

        Self {
            colors_with_alpha: colors_with_alpha.into_iter().map(String::from).collect(),
            fallback_colors: fallback_colors
                .into_iter()
                .map(|(slot, fallback)| (slot.to_string(), fallback.to_string()))
                .collect(),
            alpha_equality_tolerance: 0.01,
        }
    }
}

impl ThemeSettings {
    /// Load settings from the config directory, or defaults if there are none
    pub fn load() -> Result<Self> {
        let path = Self::settings_path()?;

        if path.exists() {
            Self::from_path(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from a specific file
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings {:?}", path))
    }

    /// Get the path to the settings file
    pub fn settings_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "theme-kit")
            .context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("settings.json"))
    }

    /// Whether `slot` keeps its alpha channel
    pub fn allows_alpha(&self, slot: &str) -> bool {
        self.colors_with_alpha.iter().any(|name| name == slot)
    }

    /// Alternate slot for `slot`, if any
    pub fn fallback_for(&self, slot: &str) -> Option<&str> {
        self.fallback_colors.get(slot).map(String::as_str)
    }
}
