//! Semantic theme equality
//!
//! Two themes are equal when they would render the same: same background
//! selection and the same color for every default slot, with alpha compared
//! within a tolerance. Titles are not compared.

use super::model::Theme;
use crate::color::Color;
use crate::config::ThemeContext;

/// Compare two themes
///
/// Quirks kept on purpose:
/// - only the first bundled background is compared;
/// - two themes that both lack a `colors` section are equal;
/// - two absent themes are equal.
pub fn themes_equal(ctx: &ThemeContext, theme_a: Option<&Theme>, theme_b: Option<&Theme>) -> bool {
    if theme_a.is_some() != theme_b.is_some() {
        return false;
    }

    // Only one bundled image is supported, so only the first one counts
    let backgrounds_a = theme_a.and_then(Theme::additional_backgrounds);
    let backgrounds_b = theme_b.and_then(Theme::additional_backgrounds);
    match (backgrounds_a, backgrounds_b) {
        (Some(a), Some(b)) if a.first() != b.first() => return false,
        (Some(_), None) | (None, Some(_)) => return false,
        _ => {}
    }

    let custom_a = theme_a.and_then(Theme::custom_backgrounds);
    let custom_b = theme_b.and_then(Theme::custom_backgrounds);
    match (custom_a, custom_b) {
        (Some(a), Some(b)) if a != b => return false,
        (Some(_), None) | (None, Some(_)) => return false,
        _ => {}
    }

    let colors_a = theme_a.and_then(|theme| theme.colors.as_ref());
    let colors_b = theme_b.and_then(|theme| theme.colors.as_ref());
    let (colors_a, colors_b) = match (colors_a, colors_b) {
        (Some(a), Some(b)) => (a, b),
        (None, None) => return true,
        _ => return false,
    };

    let tolerance = ctx.settings().alpha_equality_tolerance;
    ctx.color_names().iter().all(|name| match (colors_a.get(name), colors_b.get(name)) {
        (Some(a), Some(b)) => colors_equal(a, b, tolerance),
        (None, None) => true,
        _ => false,
    })
}

fn colors_equal(a: &Color, b: &Color, tolerance: f64) -> bool {
    if (a.r, a.g, a.b) != (b.r, b.g, b.b) {
        return false;
    }

    match (a.a, b.a) {
        (Some(alpha_a), Some(alpha_b)) => alpha_within(alpha_a, alpha_b, tolerance),
        (None, None) => true,
        _ => false,
    }
}

/// `|a - b| <= tolerance`, allowing for representation error in the difference
fn alpha_within(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance + f64::EPSILON
}
