//! Theme records
//!
//! [`Theme`] is the canonical shape produced by normalization. Its sections
//! are optional so that themes coming from elsewhere (saved state, another
//! client) can still be compared. [`RawTheme`] is the loose input side: it is
//! built from any JSON value and never fails.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color::{Color, RawColor};

/// A user-supplied background image, referenced by name
///
/// Entries are kept even when `name` is missing or not a string; such entries
/// never resolve to an image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomBackground {
    /// Key into the stored custom backgrounds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// CSS background alignment (e.g. "left top")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
    /// CSS background tiling (e.g. "no-repeat")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiling: Option<String>,
}

impl CustomBackground {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), alignment: None, tiling: None }
    }

    fn from_json(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);

        Self { name: text("name"), alignment: text("alignment"), tiling: text("tiling") }
    }
}

/// Image section of a theme
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeImages {
    /// Bundled background identifiers (at most one after normalization)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_backgrounds: Option<Vec<String>>,
    /// User-supplied backgrounds, in paint order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_backgrounds: Option<Vec<CustomBackground>>,
}

/// A theme in canonical form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Color slot name -> color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<IndexMap<String, Color>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<ThemeImages>,
    /// Display title, ignored by equality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Theme {
    /// Look up a color slot
    pub fn color(&self, name: &str) -> Option<&Color> {
        self.colors.as_ref().and_then(|colors| colors.get(name))
    }

    /// Bundled background identifiers, if the section exists
    pub fn additional_backgrounds(&self) -> Option<&[String]> {
        self.images.as_ref().and_then(|images| images.additional_backgrounds.as_deref())
    }

    /// Custom backgrounds, if the section exists
    pub fn custom_backgrounds(&self) -> Option<&[CustomBackground]> {
        self.images.as_ref().and_then(|images| images.custom_backgrounds.as_deref())
    }
}

/// Image section of raw theme data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawImages {
    /// Legacy single header image identifier
    pub header_url: Option<String>,
    /// First entry of `additional_backgrounds`, when it is a string
    pub additional_background: Option<String>,
    /// Present whenever the input had a truthy `custom_backgrounds` value
    pub custom_backgrounds: Option<Vec<CustomBackground>>,
}

impl RawImages {
    fn from_json(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };

        let header_url = map.get("headerURL").and_then(Value::as_str).map(str::to_string);

        let additional_background = map
            .get("additional_backgrounds")
            .and_then(Value::as_array)
            .and_then(|list| list.first())
            .and_then(Value::as_str)
            .map(str::to_string);

        let custom_backgrounds = map.get("custom_backgrounds").filter(|v| is_truthy(v)).map(|v| {
            v.as_array()
                .map(|list| list.iter().map(CustomBackground::from_json).collect())
                .unwrap_or_default()
        });

        Self { header_url, additional_background, custom_backgrounds }
    }
}

/// Theme data as loaded from a preset file or user input
///
/// Built leniently: sections with the wrong shape are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct RawTheme {
    pub colors: IndexMap<String, RawColor>,
    pub images: RawImages,
    pub title: Option<String>,
}

impl From<Value> for RawTheme {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}

impl From<&Value> for RawTheme {
    fn from(value: &Value) -> Self {
        let colors = value
            .get("colors")
            .and_then(Value::as_object)
            .map(|colors| {
                colors
                    .iter()
                    .filter_map(|(name, color)| Some((name.clone(), RawColor::from_json(color)?)))
                    .collect()
            })
            .unwrap_or_default();

        let images = value.get("images").map(RawImages::from_json).unwrap_or_default();
        let title = value.get("title").and_then(Value::as_str).map(str::to_string);

        Self { colors, images, title }
    }
}

/// Feed a canonical theme back in as raw input
impl From<&Theme> for RawTheme {
    fn from(theme: &Theme) -> Self {
        let colors = theme
            .colors
            .iter()
            .flatten()
            .map(|(name, color)| (name.clone(), RawColor::from(*color)))
            .collect();

        let images = RawImages {
            header_url: None,
            additional_background: theme
                .additional_backgrounds()
                .and_then(|list| list.first())
                .cloned(),
            custom_backgrounds: theme.custom_backgrounds().map(<[_]>::to_vec),
        };

        Self { colors, images, title: theme.title.clone() }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn raw_theme_from_full_json() {
        let raw = RawTheme::from(json!({
            "colors": {
                "toolbar": {"r": 1, "g": 2, "b": 3, "a": 0.5},
                "accentcolor": {"h": 10, "s": 50, "l": 0.5}
            },
            "images": {
                "headerURL": "bg-000.svg",
                "additional_backgrounds": ["bg-001.svg", "bg-002.svg"],
                "custom_backgrounds": [{"name": "mine", "tiling": "repeat"}]
            },
            "title": "Sample"
        }));

        assert_eq!(raw.colors.len(), 2);
        assert_eq!(raw.colors["toolbar"], RawColor::rgba(1.0, 2.0, 3.0, 0.5));
        assert_eq!(raw.images.header_url.as_deref(), Some("bg-000.svg"));
        assert_eq!(raw.images.additional_background.as_deref(), Some("bg-001.svg"));
        assert_eq!(
            raw.images.custom_backgrounds,
            Some(vec![CustomBackground {
                name: Some("mine".into()),
                alignment: None,
                tiling: Some("repeat".into())
            }])
        );
        assert_eq!(raw.title.as_deref(), Some("Sample"));
    }

    #[test]
    fn raw_theme_tolerates_malformed_sections() {
        let raw = RawTheme::from(json!({
            "colors": {"toolbar": "red", "tab_line": null},
            "images": {"additional_backgrounds": [42, "bg-001.svg"], "custom_backgrounds": "yes"},
            "title": 7
        }));

        assert!(raw.colors.is_empty());
        assert_eq!(raw.images.additional_background, None);
        assert_eq!(raw.images.custom_backgrounds, Some(Vec::new()));
        assert_eq!(raw.title, None);

        assert_eq!(RawTheme::from(json!(null)), RawTheme::default());
        assert_eq!(RawTheme::from(json!([1, 2])), RawTheme::default());
    }

    #[test]
    fn custom_backgrounds_keep_entries_without_string_names() {
        let raw = RawTheme::from(json!({"images": {"custom_backgrounds": [
            {"name": "a"},
            {"name": 5},
            {"tiling": "repeat"},
            42
        ]}}));

        let custom = raw.images.custom_backgrounds.unwrap();
        assert_eq!(custom.len(), 4);
        assert_eq!(custom[0], CustomBackground::new("a"));
        assert_eq!(custom[1], CustomBackground::default());
        assert_eq!(
            custom[2],
            CustomBackground { tiling: Some("repeat".into()), ..Default::default() }
        );
        assert_eq!(custom[3], CustomBackground::default());
    }

    #[test]
    fn falsy_custom_backgrounds_are_absent() {
        let raw = RawTheme::from(json!({"images": {"custom_backgrounds": null}}));
        assert_eq!(raw.images.custom_backgrounds, None);

        let raw = RawTheme::from(json!({"images": {"custom_backgrounds": []}}));
        assert_eq!(raw.images.custom_backgrounds, Some(Vec::new()));
    }

    #[test]
    fn raw_theme_deserializes_from_str() {
        let raw: RawTheme = serde_json::from_str(r#"{"title": "From text"}"#).unwrap();
        assert_eq!(raw.title.as_deref(), Some("From text"));
    }

    #[test]
    fn theme_serializes_without_empty_sections() {
        let theme = Theme { title: Some("Only title".into()), ..Default::default() };
        assert_eq!(serde_json::to_value(&theme).unwrap(), json!({"title": "Only title"}));
    }

    #[test]
    fn theme_round_trips_into_raw_input() {
        let mut colors = IndexMap::new();
        colors.insert("toolbar".to_string(), Color::rgba(1, 2, 3, 0.5));
        colors.insert("tab_line".to_string(), Color::rgb(4, 5, 6));
        let theme = Theme {
            colors: Some(colors),
            images: Some(ThemeImages {
                additional_backgrounds: Some(vec!["bg-001.svg".into()]),
                custom_backgrounds: None,
            }),
            title: None,
        };

        let raw = RawTheme::from(&theme);
        assert_eq!(raw.colors["toolbar"], RawColor::rgba(1.0, 2.0, 3.0, 0.5));
        assert_eq!(raw.colors["tab_line"], RawColor::rgb(4.0, 5.0, 6.0));
        assert_eq!(raw.images.additional_background.as_deref(), Some("bg-001.svg"));
        assert_eq!(raw.images.custom_backgrounds, None);
    }
}
