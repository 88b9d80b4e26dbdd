//! Color records and the coercion step applied to every theme color
//!
//! Theme files carry colors as loose channel maps (`{r, g, b, a}` or
//! `{h, s, l, a}`). [`make_color`] applies the saturation/alpha fixups and
//! resolves the map into a [`ColorValue`], which can then be turned into a
//! canonical [`Color`] record or a CSS string.

mod convert;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A color as it appears in raw theme data
///
/// Every channel is optional. Fields that do not belong to the color model
/// that ends up being used (e.g. `s` next to `r`, `g`, `b`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawColor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

impl RawColor {
    /// Create an RGB color
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r: Some(r), g: Some(g), b: Some(b), ..Default::default() }
    }

    /// Create an RGB color with alpha
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { a: Some(a), ..Self::rgb(r, g, b) }
    }

    /// Create an HSL color
    pub fn hsl(h: f64, s: f64, l: f64) -> Self {
        Self { h: Some(h), s: Some(s), l: Some(l), ..Default::default() }
    }

    /// Read a color from arbitrary JSON
    ///
    /// Returns `None` for anything that is not an object. Channels that are
    /// neither numbers nor numeric strings are treated as absent.
    pub fn from_json(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        let channel = |key: &str| map.get(key).and_then(number);

        Some(Self {
            r: channel("r"),
            g: channel("g"),
            b: channel("b"),
            h: channel("h"),
            s: channel("s"),
            l: channel("l"),
            v: channel("v"),
            a: channel("a"),
        })
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok().filter(|n: &f64| n.is_finite()),
        _ => None,
    }
}

impl From<Color> for RawColor {
    fn from(color: Color) -> Self {
        Self {
            a: color.a,
            ..Self::rgb(f64::from(color.r), f64::from(color.g), f64::from(color.b))
        }
    }
}

/// A canonical color: integer RGB channels plus optional alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: None }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a: Some(a) }
    }

    /// CSS string for this color
    pub fn to_css(&self) -> String {
        make_color(&RawColor::from(*self)).to_rgb_string()
    }
}

/// A resolved color, ready to be rendered
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorValue {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

impl ColorValue {
    fn from_raw(raw: &RawColor) -> Self {
        let (r, g, b) = match raw {
            RawColor { r: Some(r), g: Some(g), b: Some(b), .. } => convert::rgb_to_rgb(*r, *g, *b),
            RawColor { h: Some(h), s: Some(s), v: Some(v), .. } => convert::hsv_to_rgb(*h, *s, *v),
            RawColor { h: Some(h), s: Some(s), l: Some(l), .. } => convert::hsl_to_rgb(*h, *s, *l),
            _ => (0.0, 0.0, 0.0),
        };

        Self { r, g, b, a: convert::bound_alpha(raw.a) }
    }

    /// Alpha in `[0, 1]`
    pub fn alpha(&self) -> f64 {
        self.a
    }

    /// Rounded RGB channels, always carrying alpha
    pub fn to_rgb(&self) -> Color {
        Color::rgba(channel(self.r), channel(self.g), channel(self.b), self.a)
    }

    /// `rgb(r, g, b)` when opaque, `rgba(r, g, b, a)` otherwise
    pub fn to_rgb_string(&self) -> String {
        let (r, g, b) = (channel(self.r), channel(self.g), channel(self.b));
        if self.a == 1.0 {
            format!("rgb({r}, {g}, {b})")
        } else {
            let a = (self.a * 100.0).round() / 100.0;
            format!("rgba({r}, {g}, {b}, {a})")
        }
    }
}

fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Coerce a raw color into a [`ColorValue`]
///
/// Saturation is always read as a 0-100 value: its integer part is divided
/// by 100. Alpha above 1 is first rescaled the same way, then rounded up to
/// the next hundredth to absorb floating-point drift from other editors.
/// Rescaling happens before rounding; alpha that still exceeds 1 resolves to
/// opaque.
pub fn make_color(raw: &RawColor) -> ColorValue {
    let mut color = raw.clone();

    if let Some(s) = color.s {
        color.s = Some(s.floor() / 100.0);
    }

    if let Some(mut a) = color.a {
        if a > 1.0 {
            a = a.floor() / 100.0;
        }
        color.a = Some((a * 100.0).ceil() / 100.0);
    }

    ColorValue::from_raw(&color)
}

/// Shorthand for `make_color(raw).to_rgb_string()`
pub fn color_to_css(raw: &RawColor) -> String {
    make_color(raw).to_rgb_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn rgb_input_passes_through() {
        let color = make_color(&RawColor::rgb(10.0, 20.0, 30.0)).to_rgb();
        assert_eq!(color, Color::rgba(10, 20, 30, 1.0));
    }

    #[test]
    fn rgb_channels_are_rounded_and_clamped() {
        let color = make_color(&RawColor::rgb(10.4, 300.0, -5.0)).to_rgb();
        assert_eq!((color.r, color.g, color.b), (10, 255, 0));
    }

    #[test]
    fn saturation_is_rescaled_from_percent() {
        // h: 0, s: 100, l: 50 reads as pure red after the fixup
        let color = make_color(&RawColor::hsl(0.0, 100.9, 0.5)).to_rgb();
        assert_eq!((color.r, color.g, color.b), (255, 0, 0));
    }

    #[test]
    fn saturation_below_one_floors_to_grey() {
        let color = make_color(&RawColor::hsl(0.0, 0.8, 0.5)).to_rgb();
        assert_eq!((color.r, color.g, color.b), (128, 128, 128));
    }

    #[test]
    fn rgb_takes_precedence_over_stray_hsl_fields() {
        let raw = RawColor { s: Some(150.7), a: Some(150.0), ..RawColor::rgb(10.0, 20.0, 30.0) };
        let color = make_color(&raw).to_rgb();
        assert_eq!((color.r, color.g, color.b), (10, 20, 30));
    }

    #[test]
    fn alpha_is_rescaled_then_rounded_up() {
        // 150 -> 1.5 -> ceil -> 1.5 -> out of range -> opaque
        let raw = RawColor::rgba(10.0, 20.0, 30.0, 150.0);
        assert_eq!(make_color(&raw).alpha(), 1.0);

        // 25.9 -> 0.25
        let raw = RawColor::rgba(10.0, 20.0, 30.0, 25.9);
        assert_eq!(make_color(&raw).alpha(), 0.25);

        // 0.501 -> 0.51
        let raw = RawColor::rgba(10.0, 20.0, 30.0, 0.501);
        assert_eq!(make_color(&raw).alpha(), 0.51);

        // 0.5 stays
        let raw = RawColor::rgba(10.0, 20.0, 30.0, 0.5);
        assert_eq!(make_color(&raw).alpha(), 0.5);
    }

    #[test]
    fn empty_color_is_black() {
        assert_eq!(make_color(&RawColor::default()).to_rgb(), Color::rgba(0, 0, 0, 1.0));
    }

    #[test]
    fn css_string_for_opaque_and_translucent() {
        assert_eq!(color_to_css(&RawColor::rgb(1.0, 2.0, 3.0)), "rgb(1, 2, 3)");
        assert_eq!(color_to_css(&RawColor::rgba(1.0, 2.0, 3.0, 0.25)), "rgba(1, 2, 3, 0.25)");
        assert_eq!(Color::rgba(1, 2, 3, 0.0).to_css(), "rgba(1, 2, 3, 0)");
        assert_eq!(Color::rgb(255, 255, 255).to_css(), "rgb(255, 255, 255)");
    }

    #[test]
    fn from_json_reads_numbers_and_numeric_strings() {
        let raw = RawColor::from_json(&json!({"r": 1, "g": "2", "b": 3.5, "a": null, "x": 9}));
        assert_eq!(raw, Some(RawColor::rgb(1.0, 2.0, 3.5)));
        assert_eq!(RawColor::from_json(&json!("red")), None);
    }
}
