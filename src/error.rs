//! Error types for loading theme data

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading presets and building a [`crate::ThemeContext`]
///
/// The theme operations themselves never fail.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// A preset file was requested that the source doesn't have
    #[error("Preset not found: {0}")]
    PresetNotFound(String),

    /// Preset file is not valid JSON
    #[error("Failed to parse preset {filename}: {source}")]
    InvalidPreset {
        /// Preset file name
        filename: String,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// The default theme has no usable `colors` section
    #[error("Default theme defines no colors")]
    MissingDefaultColors,

    /// Reading from a preset directory failed
    #[error("Failed to read {path:?}: {source}")]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },
}

impl ThemeError {
    /// Check if the error comes from malformed preset content rather than IO
    pub fn is_content_error(&self) -> bool {
        matches!(self, ThemeError::InvalidPreset { .. } | ThemeError::MissingDefaultColors)
    }
}
