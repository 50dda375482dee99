// THEORY:
// A `ReferencePattern` is what the automation layer keeps after a user selects a region
// of interest on a screenshot: the region plus every derived fingerprint, computed once
// at registration and reused for every later comparison. Patterns are immutable; a new
// capture produces a new pattern.

use log::warn;

use crate::core_modules::chunk::chunk::Region;
use crate::core_modules::color_space::{
    average, to_grayscale, to_hsv, GrayFingerprint, Hsv, HsvFingerprint,
};
use crate::core_modules::grid_sampler::{sample_cell_grid, RgbFingerprint};
use crate::core_modules::pixel::pixel::{Bitmap, Rgb};
use crate::core_modules::similarity::{absolute_similarity, texture_similarity, IgnoredChannels};
use crate::error::MatchError;

/// A captured region with its cached fingerprints.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferencePattern {
    region: Region,
    rgb: RgbFingerprint,
    grayscale: GrayFingerprint,
    hsv: HsvFingerprint,
    lightness: f64,
}

impl ReferencePattern {
    /// Samples `region` of `bitmap` and caches its fingerprints.
    pub fn capture(bitmap: &Bitmap, region: Region) -> Result<Self, MatchError> {
        if bitmap.is_empty() || !region.fits_within(bitmap.width(), bitmap.height()) {
            warn!(
                "rejecting pattern capture: {:?} does not fit {}x{} bitmap",
                region,
                bitmap.width(),
                bitmap.height()
            );
            return Err(MatchError::RegionOutOfBounds {
                region,
                width: bitmap.width(),
                height: bitmap.height(),
            });
        }
        Ok(Self::from_fingerprint(region, sample_cell_grid(bitmap, &region)))
    }

    /// Builds a pattern from an already sampled RGB fingerprint.
    pub fn from_fingerprint(region: Region, rgb: RgbFingerprint) -> Self {
        let grayscale = to_grayscale(&rgb);
        let hsv = to_hsv(&rgb);
        // Mean HSV value in percent, at the 4 decimal places patterns are persisted with.
        let values: Vec<f64> = hsv.iter().map(|cell| cell.v).collect();
        let lightness = (average(&values) * 10_000.0).round() / 10_000.0;
        Self {
            region,
            rgb,
            grayscale,
            hsv,
            lightness,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn rgb(&self) -> &[Rgb] {
        &self.rgb
    }

    pub fn grayscale(&self) -> &[f64] {
        &self.grayscale
    }

    pub fn hsv(&self) -> &[Hsv] {
        &self.hsv
    }

    /// Mean HSV value of the pattern on the `0..=100` scale.
    pub fn lightness(&self) -> f64 {
        self.lightness
    }

    /// Texture score of the same region in a newer capture.
    pub fn texture_similarity_to(&self, bitmap: &Bitmap) -> f64 {
        let current = sample_cell_grid(bitmap, &self.region);
        texture_similarity(&self.grayscale, &to_grayscale(&current))
    }

    /// Absolute colour score of the same region in a newer capture.
    pub fn absolute_similarity_to(&self, bitmap: &Bitmap, ignored: IgnoredChannels) -> f64 {
        let current = sample_cell_grid(bitmap, &self.region);
        absolute_similarity(&self.hsv, &to_hsv(&current), ignored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::grid_sampler::CELL_COUNT;

    fn checkerboard(width: u32, height: u32, cell: u32, bright: u8) -> Bitmap {
        Bitmap::from_fn(width, height, |x, y| {
            if (x / cell + y / cell) % 2 == 0 {
                [bright, bright, bright, 255]
            } else {
                [0, 0, 0, 255]
            }
        })
    }

    #[test]
    fn caches_every_fingerprint() {
        let bitmap = checkerboard(64, 64, 8, 255);
        let pattern = ReferencePattern::capture(&bitmap, Region::new(0, 0, 32, 32)).unwrap();
        assert_eq!(pattern.rgb().len(), CELL_COUNT);
        assert_eq!(pattern.grayscale().len(), CELL_COUNT);
        assert_eq!(pattern.hsv().len(), CELL_COUNT);
        assert_eq!(pattern.region(), Region::new(0, 0, 32, 32));
    }

    #[test]
    fn lightness_is_rounded_to_four_places() {
        let bitmap = Bitmap::from_fn(16, 16, |_, _| [100, 0, 0, 255]);
        let pattern = ReferencePattern::capture(&bitmap, Region::new(0, 0, 16, 16)).unwrap();
        assert_eq!(pattern.lightness(), 39.2157);
    }

    #[test]
    fn lightness_is_a_percentage() {
        let bitmap = checkerboard(64, 64, 8, 255);
        let pattern = ReferencePattern::capture(&bitmap, Region::new(0, 0, 64, 64)).unwrap();
        let expected = crate::core_modules::color_space::overall_lightness(pattern.rgb()) * 100.0;
        assert!((pattern.lightness() - expected).abs() < 1e-4);
    }

    #[test]
    fn rejects_bitmaps_without_pixels() {
        let bitmap = Bitmap::new(10, 0, Vec::new()).unwrap();
        let result = ReferencePattern::capture(&bitmap, Region::new(0, 0, 0, 0));
        assert!(matches!(result, Err(MatchError::RegionOutOfBounds { width: 10, height: 0, .. })));
    }

    #[test]
    fn rejects_regions_outside_the_bitmap() {
        let bitmap = checkerboard(32, 32, 4, 255);
        let result = ReferencePattern::capture(&bitmap, Region::new(20, 0, 16, 16));
        assert!(matches!(result, Err(MatchError::RegionOutOfBounds { .. })));
    }

    #[test]
    fn unchanged_screen_matches_itself() {
        let bitmap = checkerboard(64, 64, 4, 200);
        let pattern = ReferencePattern::capture(&bitmap, Region::new(8, 8, 32, 32)).unwrap();
        assert_eq!(pattern.texture_similarity_to(&bitmap), 100.0);
        assert_eq!(pattern.absolute_similarity_to(&bitmap, IgnoredChannels::NONE), 100.0);
    }

    #[test]
    fn dimmed_screen_keeps_texture_but_loses_colour() {
        let original = checkerboard(64, 64, 8, 240);
        let dimmed = checkerboard(64, 64, 8, 60);
        let pattern = ReferencePattern::capture(&original, Region::new(0, 0, 64, 64)).unwrap();

        assert_eq!(pattern.texture_similarity_to(&dimmed), 100.0);
        assert!(pattern.absolute_similarity_to(&dimmed, IgnoredChannels::NONE) < 100.0);
    }
}
