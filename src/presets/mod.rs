//! Preset themes
//!
//! A [`PresetSource`] is a flat collection of JSON theme files addressed by
//! file name. The bundled presets are embedded in the binary; a
//! [`DirectoryPresets`] reads the same layout from disk.

use std::fs;
use std::path::PathBuf;

use rust_embed::RustEmbed;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ThemeContext;
use crate::error::ThemeError;
use crate::theme::{RawTheme, Theme, normalize_theme};

/// File name of the default theme in every preset source
pub const DEFAULT_PRESET: &str = "default.json";

/// A collection of preset theme files
pub trait PresetSource {
    /// File names of every preset
    fn keys(&self) -> Result<Vec<String>, ThemeError>;

    /// Load one preset as JSON
    fn load(&self, filename: &str) -> Result<Value, ThemeError>;
}

#[derive(RustEmbed)]
#[folder = "presets/"]
#[include = "*.json"]
struct BundledPresetFiles;

/// Presets embedded in the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledPresets;

impl PresetSource for BundledPresets {
    fn keys(&self) -> Result<Vec<String>, ThemeError> {
        Ok(BundledPresetFiles::iter().map(|name| name.into_owned()).collect())
    }

    fn load(&self, filename: &str) -> Result<Value, ThemeError> {
        let file = BundledPresetFiles::get(filename)
            .ok_or_else(|| ThemeError::PresetNotFound(filename.to_string()))?;
        parse_preset(filename, &file.data)
    }
}

/// Presets stored as `*.json` files in a directory
#[derive(Debug, Clone)]
pub struct DirectoryPresets {
    root: PathBuf,
}

impl DirectoryPresets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PresetSource for DirectoryPresets {
    fn keys(&self) -> Result<Vec<String>, ThemeError> {
        let entries = fs::read_dir(&self.root)
            .map_err(|source| ThemeError::Io { path: self.root.clone(), source })?;

        let mut keys = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    keys.push(name.to_string());
                }
            }
        }
        Ok(keys)
    }

    fn load(&self, filename: &str) -> Result<Value, ThemeError> {
        let path = self.root.join(filename);
        if !path.is_file() {
            return Err(ThemeError::PresetNotFound(filename.to_string()));
        }

        let data = fs::read(&path).map_err(|source| ThemeError::Io { path: path.clone(), source })?;
        parse_preset(filename, &data)
    }
}

fn parse_preset(filename: &str, data: &[u8]) -> Result<Value, ThemeError> {
    serde_json::from_slice(data)
        .map_err(|source| ThemeError::InvalidPreset { filename: filename.to_string(), source })
}

/// A normalized preset theme
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresetTheme {
    /// Position in the source listing
    pub idx: usize,
    pub filename: String,
    #[serde(flatten)]
    pub theme: Theme,
}

/// Normalize every preset in `source`, ordered by file name
///
/// Presets that fail to load are skipped.
pub fn build_preset_list(
    ctx: &ThemeContext,
    source: &dyn PresetSource,
) -> Result<Vec<PresetTheme>, ThemeError> {
    let mut keys = source.keys()?;
    keys.sort();

    let mut presets: Vec<PresetTheme> = keys
        .into_iter()
        .enumerate()
        .filter_map(|(idx, filename)| match source.load(&filename) {
            Ok(data) => {
                let theme = normalize_theme(ctx, &RawTheme::from(data));
                Some(PresetTheme { idx, filename, theme })
            }
            Err(e) => {
                warn!(%filename, error = %e, "Skipping preset");
                None
            }
        })
        .collect();

    presets.sort_by(|a, b| a.filename.cmp(&b.filename));
    debug!(count = presets.len(), "Built preset theme list");
    Ok(presets)
}
