//! Channel conversions
//!
//! Clamping and percentage rules match what browser color libraries accept,
//! so values written by other theme editors resolve to the same RGB triple.

/// Clamp `n` into `[0, max]` and scale it to `[0, 1]`
pub(crate) fn bound01(n: f64, max: f64) -> f64 {
    let n = n.clamp(0.0, max);
    if (n - max).abs() < 0.000001 {
        return 1.0;
    }
    (n % max) / max
}

/// Scale a saturation/lightness/value channel to `[0, 1]`
///
/// Values up to 1 are fractions, larger values are percentages. Fractions go
/// through a percentage with two decimal places, truncated.
pub(crate) fn percent_channel(n: f64) -> f64 {
    if n <= 1.0 {
        let percent = (n * 100.0).clamp(0.0, 100.0);
        let percent = (percent * 100.0).trunc() / 100.0;
        bound01(percent, 100.0)
    } else {
        bound01(n, 100.0)
    }
}

/// Alpha outside `[0, 1]` means fully opaque
pub(crate) fn bound_alpha(a: Option<f64>) -> f64 {
    match a {
        Some(a) if (0.0..=1.0).contains(&a) => a,
        _ => 1.0,
    }
}

/// RGB channels in `[0, 255]`, unrounded
pub(crate) fn rgb_to_rgb(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    (bound01(r, 255.0) * 255.0, bound01(g, 255.0) * 255.0, bound01(b, 255.0) * 255.0)
}

pub(crate) fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let h = bound01(h, 360.0);
    let s = percent_channel(s);
    let l = percent_channel(l);

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (hue_to_rgb(p, q, h + 1.0 / 3.0), hue_to_rgb(p, q, h), hue_to_rgb(p, q, h - 1.0 / 3.0))
    };

    (r * 255.0, g * 255.0, b * 255.0)
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

pub(crate) fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    let h = bound01(h, 360.0) * 6.0;
    let s = percent_channel(s);
    let v = percent_channel(v);

    let i = h.floor();
    let f = h - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match (i as u32) % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    (r * 255.0, g * 255.0, b * 255.0)
}
