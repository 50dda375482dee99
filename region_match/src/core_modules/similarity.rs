// THEORY:
// The similarity module holds the two comparison "lenses" of the engine. Both take two
// fingerprints and return a score in `[0, 100]`, where 100 means identical under that
// lens. The scores are never blended; callers pick one or both.
//
// 1.  **Texture**: binarize each grayscale fingerprint against its own mean and count
//     the positions where the bit patterns disagree. Each side is thresholded
//     relative to itself, so a uniform brightness shift does not change the score.
// 2.  **Absolute**: per-cell Euclidean distance in HSV space, normalized by a fixed
//     per-channel budget (hue 50, saturation 20, value 20). Channels are not rescaled
//     before squaring, so hue (up to 360) dominates unless it is ignored.
//
// Both lenses compare only the common prefix of the two fingerprints.

use std::ops::{BitOr, BitOrAssign};

use crate::core_modules::color_space::Hsv;

const HUE_WEIGHT: f64 = 50.0;
const SATURATION_WEIGHT: f64 = 20.0;
const VALUE_WEIGHT: f64 = 20.0;

/// The HSV channels an absolute comparison should leave out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IgnoredChannels(u8);

impl IgnoredChannels {
    pub const NONE: Self = Self(0);
    pub const HUE: Self = Self(0b001);
    pub const SATURATION: Self = Self(0b010);
    pub const VALUE: Self = Self(0b100);
    pub const ALL: Self = Self(0b111);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The per-cell distance budget of the channels that are still compared.
    pub fn max_difference(self) -> f64 {
        let mut budget = 0.0;
        if !self.contains(Self::HUE) {
            budget += HUE_WEIGHT;
        }
        if !self.contains(Self::SATURATION) {
            budget += SATURATION_WEIGHT;
        }
        if !self.contains(Self::VALUE) {
            budget += VALUE_WEIGHT;
        }
        budget
    }
}

impl BitOr for IgnoredChannels {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for IgnoredChannels {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

fn binarize(values: &[f64]) -> Vec<bool> {
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|value| *value > mean).collect()
}

/// Fraction of positions where the mean-thresholded bit patterns differ.
/// An empty comparison is maximally distant.
pub fn hamming_distance(a: &[f64], b: &[f64]) -> f64 {
    let length = a.len().min(b.len());
    if length == 0 {
        return 1.0;
    }
    let bits_a = binarize(a);
    let bits_b = binarize(b);
    let differing = bits_a
        .iter()
        .zip(bits_b.iter())
        .take(length)
        .filter(|(x, y)| x != y)
        .count();
    differing as f64 / length as f64
}

/// Structural similarity of two grayscale fingerprints, invariant to uniform
/// brightness shifts.
pub fn texture_similarity(a: &[f64], b: &[f64]) -> f64 {
    (1.0 - hamming_distance(a, b).min(1.0)) * 100.0
}

/// Colour similarity of two HSV fingerprints.
///
/// Zero compared cells score 0. With every channel ignored nothing can differ,
/// so a non-empty comparison scores 100.
pub fn absolute_similarity(a: &[Hsv], b: &[Hsv], ignored: IgnoredChannels) -> f64 {
    let length = a.len().min(b.len());
    if length == 0 {
        return 0.0;
    }

    let max_difference = ignored.max_difference();
    if max_difference == 0.0 {
        return 100.0;
    }

    let compare_h = !ignored.contains(IgnoredChannels::HUE);
    let compare_s = !ignored.contains(IgnoredChannels::SATURATION);
    let compare_v = !ignored.contains(IgnoredChannels::VALUE);

    let mut total_difference = 0.0;
    let mut total_budget = 0.0;
    for (first, second) in a.iter().zip(b.iter()) {
        let mut squared = 0.0;
        if compare_h {
            squared += (first.h - second.h).powi(2);
        }
        if compare_s {
            squared += (first.s - second.s).powi(2);
        }
        if compare_v {
            squared += (first.v - second.v).powi(2);
        }
        total_difference += squared.sqrt();
        total_budget += max_difference;
    }

    (1.0 - (total_difference / total_budget).min(1.0)) * 100.0
}
