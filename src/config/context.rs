//! Shared, immutable theme state
//!
//! Built once at startup and passed by reference to every theme operation.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use super::ThemeSettings;
use crate::assets::BackgroundRegistry;
use crate::color::RawColor;
use crate::error::ThemeError;
use crate::presets::{self, BundledPresets, DEFAULT_PRESET, PresetSource, PresetTheme};
use crate::theme::RawTheme;

/// Default theme, color slots, backgrounds and presets
#[derive(Debug, Clone)]
pub struct ThemeContext {
    settings: ThemeSettings,
    default_theme: RawTheme,
    /// Slot names in default theme order
    color_names: Vec<String>,
    backgrounds: BackgroundRegistry,
    presets: Vec<PresetTheme>,
}

impl ThemeContext {
    /// Context over the presets and backgrounds embedded in the binary
    pub fn bundled(settings: ThemeSettings) -> Result<Self, ThemeError> {
        Self::load(&BundledPresets, BackgroundRegistry::bundled(), settings)
    }

    /// Context over any preset source
    ///
    /// `default.json` must exist and define at least one color. Other
    /// presets that fail to load are skipped.
    pub fn load(
        source: &dyn PresetSource,
        backgrounds: BackgroundRegistry,
        settings: ThemeSettings,
    ) -> Result<Self, ThemeError> {
        let value = source.load(DEFAULT_PRESET)?;
        let mut default_theme = RawTheme::from(&value);

        // Every key of the default `colors` object is a slot, whatever its value
        let default_colors: IndexMap<String, RawColor> = value
            .get("colors")
            .and_then(Value::as_object)
            .map(|colors| {
                colors
                    .iter()
                    .map(|(name, color)| {
                        (name.clone(), RawColor::from_json(color).unwrap_or_default())
                    })
                    .collect()
            })
            .unwrap_or_default();
        if default_colors.is_empty() {
            return Err(ThemeError::MissingDefaultColors);
        }
        let color_names = default_colors.keys().cloned().collect();
        default_theme.colors = default_colors;

        let mut context =
            Self { settings, default_theme, color_names, backgrounds, presets: Vec::new() };
        context.presets = presets::build_preset_list(&context, source)?;

        debug!(
            slots = context.color_names.len(),
            backgrounds = context.backgrounds.len(),
            presets = context.presets.len(),
            "Theme context ready"
        );
        Ok(context)
    }

    pub fn settings(&self) -> &ThemeSettings {
        &self.settings
    }

    /// The default theme as loaded, before normalization
    pub fn default_theme(&self) -> &RawTheme {
        &self.default_theme
    }

    /// Fallback value for every color slot
    ///
    /// Slots whose default value is not a color record map to an empty record.
    pub fn default_colors(&self) -> &IndexMap<String, RawColor> {
        &self.default_theme.colors
    }

    /// Every valid color slot, in a stable order
    pub fn color_names(&self) -> &[String] {
        &self.color_names
    }

    pub fn backgrounds(&self) -> &BackgroundRegistry {
        &self.backgrounds
    }

    /// Normalized presets, ordered by file name
    pub fn presets(&self) -> &[PresetTheme] {
        &self.presets
    }

    /// Find a preset by file name
    pub fn preset(&self, filename: &str) -> Option<&PresetTheme> {
        self.presets.iter().find(|p| p.filename == filename)
    }
}
