// THEORY:
// Colorspace conversion turns an RGB fingerprint into the two representations the
// similarity metrics work on: HSV (for absolute colour comparison) and a single
// luminance scalar per cell (for texture comparison).
//
// Hue is taken from whichever channel holds the maximum. The three channel tests
// run in sequence (red, then green, then blue) and a later match overwrites an
// earlier one, so ties at the maximum resolve to the last tied channel. Gray cells
// (max == min) have no hue; the division yields NaN, which is mapped to 0.

use crate::core_modules::pixel::pixel::Rgb;

pub type Hue = f64;
pub type Saturation = f64;
pub type Value = f64;

/// `h` in degrees `[0, 360)`, `s` and `v` in percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hsv {
    pub h: Hue,
    pub s: Saturation,
    pub v: Value,
}

impl Hsv {
    pub fn new(h: Hue, s: Saturation, v: Value) -> Self {
        Self { h, s, v }
    }
}

pub type HsvFingerprint = Vec<Hsv>;
pub type GrayFingerprint = Vec<f64>;

impl From<&Rgb> for Hsv {
    fn from(rgb: &Rgb) -> Self {
        rgb_to_hsv(rgb)
    }
}

/// Converts one RGB sample to HSV.
pub fn rgb_to_hsv(rgb: &Rgb) -> Hsv {
    let (red, green, blue) = rgb.normalized();
    let maximum = red.max(green).max(blue);
    let minimum = red.min(green).min(blue);
    let chroma = maximum - minimum;

    let v = maximum * 100.0;
    // Black has no defined saturation; it reports fully saturated.
    let s = if maximum > 0.0 {
        chroma / maximum * 100.0
    } else {
        100.0
    };

    let mut h = f64::NAN;
    if red == maximum {
        h = (green - blue) / chroma * 60.0;
    }
    if green == maximum {
        h = 120.0 + (blue - red) / chroma * 60.0;
    }
    if blue == maximum {
        h = 240.0 + (red - green) / chroma * 60.0;
    }
    if h < 0.0 {
        h += 360.0;
    }
    if h.is_nan() {
        h = 0.0;
    }

    Hsv { h, s, v }
}

/// Converts every sample, keeping order.
pub fn to_hsv(fingerprint: &[Rgb]) -> HsvFingerprint {
    fingerprint.iter().map(rgb_to_hsv).collect()
}

/// Per-sample luminance `0.30R + 0.59G + 0.11B` on the 0..255 scale.
pub fn to_grayscale(fingerprint: &[Rgb]) -> GrayFingerprint {
    fingerprint.iter().map(Rgb::luminance).collect()
}

/// Mean of `values`, or 0 when there are none.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean HSV value of the whole fingerprint, scaled to `[0, 1]`.
pub fn overall_lightness(fingerprint: &[Rgb]) -> f64 {
    let values: Vec<f64> = fingerprint.iter().map(|rgb| rgb_to_hsv(rgb).v).collect();
    average(&values) / 100.0
}
