//! Theme normalization
//!
//! Produces a [`Theme`] with a fixed shape from any [`RawTheme`]: every color
//! slot of the default theme is present, alpha is kept only where allowed,
//! and background identifiers are validated against the bundled registry.

use indexmap::IndexMap;

use super::model::{RawTheme, Theme, ThemeImages};
use crate::color::{Color, RawColor, make_color};
use crate::config::ThemeContext;

/// Normalize one color slot
///
/// `data` wins over `default_color`; with neither, the color resolves to
/// black.
pub fn normalize_theme_color(
    ctx: &ThemeContext,
    name: &str,
    data: Option<&RawColor>,
    default_color: Option<&RawColor>,
) -> Color {
    let raw = data.or(default_color).cloned().unwrap_or_default();
    let mut color = make_color(&raw).to_rgb();
    if !ctx.settings().allows_alpha(name) {
        color.a = None;
    }
    color
}

/// Normalize the full color map, in default theme slot order
///
/// A slot missing from `colors` is looked up under its fallback name before
/// the default theme's value is used.
pub fn normalize_theme_colors(
    ctx: &ThemeContext,
    colors: &IndexMap<String, RawColor>,
) -> IndexMap<String, Color> {
    let default_colors = ctx.default_colors();

    ctx.color_names()
        .iter()
        .map(|name| {
            let matched = colors.get(name).or_else(|| {
                ctx.settings().fallback_for(name).and_then(|fallback| colors.get(fallback))
            });
            let color = normalize_theme_color(ctx, name, matched, default_colors.get(name));
            (name.clone(), color)
        })
        .collect()
}

/// Normalize a raw theme into canonical form
pub fn normalize_theme(ctx: &ThemeContext, data: &RawTheme) -> Theme {
    let backgrounds = ctx.backgrounds();
    let mut images =
        ThemeImages { additional_backgrounds: Some(Vec::new()), custom_backgrounds: None };

    if let Some(custom) = &data.images.custom_backgrounds {
        images.custom_backgrounds = Some(custom.clone());
    }

    // Later sources override earlier ones
    let candidates = [&data.images.header_url, &data.images.additional_background];
    for candidate in candidates.into_iter().flatten() {
        if let Some(background) = backgrounds.normalize(candidate) {
            images.additional_backgrounds = Some(vec![background.to_string()]);
        }
    }

    Theme {
        colors: Some(normalize_theme_colors(ctx, &data.colors)),
        images: Some(images),
        title: data.title.clone(),
    }
}
