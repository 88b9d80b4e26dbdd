//! Conversion to the browser theming API format

use std::collections::HashMap;
use std::hash::BuildHasher;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::model::Theme;
use crate::assets::BackgroundResolver;
use crate::color::{Color, RawColor, color_to_css};
use crate::config::ThemeContext;

/// Transparent 1x1 PNG
///
/// Older browsers require `headerURL`, but a real header image draws a text
/// shadow over the toolbar.
pub const BLANK_IMAGE: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

const CUSTOM_ALIGNMENT: &str = "left top";
const CUSTOM_TILING: &str = "no-repeat";
const BUNDLED_ALIGNMENT: &str = "top";
const BUNDLED_TILING: &str = "repeat";

/// Browser colors that themes don't define, and the slot they copy
const DERIVED_COLORS: [(&str, &str); 3] =
    [("tab_loading", "tab_line"), ("popup", "accentcolor"), ("popup_text", "toolbar_text")];

/// Theme in the shape the browser theming API accepts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowserTheme {
    pub images: BrowserImages,
    pub properties: BrowserProperties,
    /// Color key -> CSS color string
    pub colors: IndexMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowserImages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_backgrounds: Option<Vec<String>>,
    #[serde(rename = "headerURL")]
    pub header_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowserProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_backgrounds_alignment: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_backgrounds_tiling: Option<Vec<String>>,
}

/// A user-supplied background as kept in storage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredCustomBackground {
    /// Image payload, usually a data URL
    #[serde(default)]
    pub image: Option<String>,
}

impl StoredCustomBackground {
    pub fn new(image: impl Into<String>) -> Self {
        Self { image: Some(image.into()) }
    }
}

/// Resolves custom background names to image payloads
pub trait CustomBackgroundLookup {
    /// Image payload for `name`, if one is stored
    fn image(&self, name: &str) -> Option<&str>;
}

impl<S: BuildHasher> CustomBackgroundLookup for HashMap<String, StoredCustomBackground, S> {
    fn image(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|background| background.image.as_deref())
    }
}

impl CustomBackgroundLookup for IndexMap<String, StoredCustomBackground> {
    fn image(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|background| background.image.as_deref())
    }
}

/// Convert a canonical theme for the browser theming API
///
/// Custom backgrounds take priority over the bundled background. Custom
/// backgrounds without a stored image are skipped.
pub fn convert_to_browser_theme<R, L>(
    ctx: &ThemeContext,
    theme: &Theme,
    backgrounds: &R,
    custom_backgrounds: &L,
) -> BrowserTheme
where
    R: BackgroundResolver + ?Sized,
    L: CustomBackgroundLookup + ?Sized,
{
    let mut out = BrowserTheme::default();

    let custom = theme.custom_backgrounds().unwrap_or_default();
    if !custom.is_empty() {
        let mut images = Vec::new();
        let mut alignment = Vec::new();
        let mut tiling = Vec::new();

        for background in custom {
            let image = background
                .name
                .as_deref()
                .and_then(|name| custom_backgrounds.image(name))
                .filter(|image| !image.is_empty());
            let Some(image) = image else {
                trace!(name = ?background.name, "No stored image for custom background, skipping");
                continue;
            };
            images.push(image.to_string());
            alignment.push(background.alignment.as_deref().unwrap_or(CUSTOM_ALIGNMENT).to_string());
            tiling.push(background.tiling.as_deref().unwrap_or(CUSTOM_TILING).to_string());
        }

        out.images.additional_backgrounds = Some(images);
        out.properties.additional_backgrounds_alignment = Some(alignment);
        out.properties.additional_backgrounds_tiling = Some(tiling);
    } else if let Some(url) = theme
        .additional_backgrounds()
        .and_then(|list| list.first())
        .and_then(|id| ctx.backgrounds().normalize(id))
        .and_then(|id| backgrounds.resolve(id))
    {
        out.images.additional_backgrounds = Some(vec![url]);
        out.properties.additional_backgrounds_alignment = Some(vec![BUNDLED_ALIGNMENT.to_string()]);
        out.properties.additional_backgrounds_tiling = Some(vec![BUNDLED_TILING.to_string()]);
    }

    out.images.header_url = BLANK_IMAGE.to_string();

    for (key, color) in theme.colors.iter().flatten() {
        out.colors.insert(key.clone(), color.to_css());
    }

    for (key, source) in DERIVED_COLORS {
        if theme.color(key).is_none() {
            out.colors.insert(key.to_string(), css_or_black(theme.color(source)));
        }
    }

    out
}

fn css_or_black(color: Option<&Color>) -> String {
    match color {
        Some(color) => color.to_css(),
        None => color_to_css(&RawColor::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::BackgroundRegistry;
    use crate::theme::model::{CustomBackground, RawTheme, ThemeImages};
    use crate::theme::normalize::normalize_theme;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn context() -> ThemeContext {
        ThemeContext::bundled(Default::default()).unwrap()
    }

    fn normalized(ctx: &ThemeContext, value: serde_json::Value) -> Theme {
        normalize_theme(ctx, &RawTheme::from(value))
    }

    fn no_custom() -> HashMap<String, StoredCustomBackground> {
        HashMap::new()
    }

    #[test]
    fn colors_become_css_strings() {
        let ctx = context();
        let theme = normalized(
            &ctx,
            json!({"colors": {
                "accentcolor": {"r": 1, "g": 2, "b": 3},
                "toolbar": {"r": 4, "g": 5, "b": 6, "a": 0.5}
            }}),
        );

        let out = convert_to_browser_theme(&ctx, &theme, ctx.backgrounds(), &no_custom());
        assert_eq!(out.colors["accentcolor"], "rgb(1, 2, 3)");
        assert_eq!(out.colors["toolbar"], "rgba(4, 5, 6, 0.5)");
        for name in ctx.color_names() {
            assert!(out.colors.contains_key(name), "missing {name}");
        }
    }

    #[test]
    fn derived_colors_fall_back_to_source_slots() {
        let ctx = context();
        let theme = normalized(
            &ctx,
            json!({"colors": {
                "tab_line": {"r": 10, "g": 0, "b": 0},
                "accentcolor": {"r": 0, "g": 20, "b": 0},
                "toolbar_text": {"r": 0, "g": 0, "b": 30}
            }}),
        );

        let out = convert_to_browser_theme(&ctx, &theme, ctx.backgrounds(), &no_custom());
        assert_eq!(out.colors["tab_loading"], "rgb(10, 0, 0)");
        assert_eq!(out.colors["popup"], "rgb(0, 20, 0)");
        assert_eq!(out.colors["popup_text"], "rgb(0, 0, 30)");
    }

    #[test]
    fn derived_colors_keep_explicit_values() {
        let ctx = context();
        let mut theme = normalized(&ctx, json!({}));
        theme.colors.as_mut().unwrap().insert("popup".into(), Color::rgb(9, 9, 9));

        let out = convert_to_browser_theme(&ctx, &theme, ctx.backgrounds(), &no_custom());
        assert_eq!(out.colors["popup"], "rgb(9, 9, 9)");
    }

    #[test]
    fn derived_colors_without_source_are_black() {
        let ctx = context();
        let theme = Theme::default();
        let out = convert_to_browser_theme(&ctx, &theme, ctx.backgrounds(), &no_custom());
        assert_eq!(out.colors.len(), 3);
        assert_eq!(out.colors["popup"], "rgb(0, 0, 0)");
    }

    #[test]
    fn header_url_is_always_blank() {
        let ctx = context();
        let theme = normalized(&ctx, json!({"images": {"headerURL": "bg-000.svg"}}));
        let out = convert_to_browser_theme(&ctx, &theme, ctx.backgrounds(), &no_custom());
        assert_eq!(out.images.header_url, BLANK_IMAGE);
    }

    #[test]
    fn bundled_background_is_resolved() {
        let ctx = context();
        let registry =
            BackgroundRegistry::from_images([("bg-000.svg", "moz-extension://bg-000.svg")]);
        let theme = normalized(&ctx, json!({"images": {"additional_backgrounds": ["bg-000.svg"]}}));

        let out = convert_to_browser_theme(&ctx, &theme, &registry, &no_custom());
        assert_eq!(
            out.images.additional_backgrounds,
            Some(vec!["moz-extension://bg-000.svg".to_string()])
        );
        assert_eq!(out.properties.additional_backgrounds_alignment, Some(vec!["top".to_string()]));
        assert_eq!(out.properties.additional_backgrounds_tiling, Some(vec!["repeat".to_string()]));
    }

    #[test]
    fn bundled_background_resolves_to_data_url() {
        let ctx = context();
        let theme = normalized(&ctx, json!({"images": {"additional_backgrounds": ["bg-001.svg"]}}));

        let out = convert_to_browser_theme(&ctx, &theme, ctx.backgrounds(), &no_custom());
        let images = out.images.additional_backgrounds.unwrap();
        assert_eq!(images.len(), 1);
        assert!(images[0].starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn no_background_leaves_sections_empty() {
        let ctx = context();
        let theme = normalized(&ctx, json!({}));
        let out = convert_to_browser_theme(&ctx, &theme, ctx.backgrounds(), &no_custom());

        assert_eq!(out.images.additional_backgrounds, None);
        assert_eq!(out.properties, BrowserProperties::default());
    }

    #[test]
    fn unknown_bundled_background_is_ignored() {
        let ctx = context();
        let mut theme = normalized(&ctx, json!({}));
        theme.images = Some(ThemeImages {
            additional_backgrounds: Some(vec!["missing.png".into()]),
            custom_backgrounds: None,
        });

        let out = convert_to_browser_theme(&ctx, &theme, ctx.backgrounds(), &no_custom());
        assert_eq!(out.images.additional_backgrounds, None);
    }

    #[test]
    fn custom_backgrounds_take_priority_and_skip_missing_images() {
        let ctx = context();
        let theme = normalized(
            &ctx,
            json!({"images": {
                "additional_backgrounds": ["bg-000.svg"],
                "custom_backgrounds": [
                    {"name": "sky", "alignment": "center", "tiling": "repeat-x"},
                    {"name": "gone"},
                    {"name": 5},
                    {"name": "empty"},
                    {"name": "sea"}
                ]
            }}),
        );

        let mut stored = HashMap::new();
        stored.insert("sky".to_string(), StoredCustomBackground::new("data:sky"));
        stored.insert("empty".to_string(), StoredCustomBackground::default());
        stored.insert("5".to_string(), StoredCustomBackground::new("data:number"));
        stored.insert("sea".to_string(), StoredCustomBackground::new("data:sea"));

        let out = convert_to_browser_theme(&ctx, &theme, ctx.backgrounds(), &stored);
        assert_eq!(
            out.images.additional_backgrounds,
            Some(vec!["data:sky".to_string(), "data:sea".to_string()])
        );
        assert_eq!(
            out.properties.additional_backgrounds_alignment,
            Some(vec!["center".to_string(), "left top".to_string()])
        );
        assert_eq!(
            out.properties.additional_backgrounds_tiling,
            Some(vec!["repeat-x".to_string(), "no-repeat".to_string()])
        );
    }

    #[test]
    fn all_custom_backgrounds_missing_gives_empty_lists() {
        let ctx = context();
        let mut theme = normalized(&ctx, json!({}));
        theme.images.as_mut().unwrap().custom_backgrounds =
            Some(vec![CustomBackground::new("gone")]);

        let stored: IndexMap<String, StoredCustomBackground> = IndexMap::new();
        let out = convert_to_browser_theme(&ctx, &theme, ctx.backgrounds(), &stored);
        assert_eq!(out.images.additional_backgrounds, Some(Vec::new()));
        assert_eq!(out.properties.additional_backgrounds_tiling, Some(Vec::new()));
    }

    #[test]
    fn input_theme_is_untouched() {
        let ctx = context();
        let theme = normalized(&ctx, json!({"images": {"custom_backgrounds": [{"name": "a"}]}}));
        let before = theme.clone();
        let _ = convert_to_browser_theme(&ctx, &theme, ctx.backgrounds(), &no_custom());
        assert_eq!(theme, before);
    }

    #[test]
    fn browser_theme_serializes_in_api_shape() {
        let ctx = context();
        let theme = Theme {
            colors: Some(IndexMap::from([("tab_line".to_string(), Color::rgb(1, 1, 1))])),
            ..Default::default()
        };
        let out = convert_to_browser_theme(&ctx, &theme, ctx.backgrounds(), &no_custom());
        let value = serde_json::to_value(&out).unwrap();

        assert_eq!(value["images"], json!({"headerURL": BLANK_IMAGE}));
        assert_eq!(value["properties"], json!({}));
        assert_eq!(value["colors"]["tab_loading"], json!("rgb(1, 1, 1)"));
    }
}
