// THEORY:
// The `pipeline` module is the public face of the engine. It lines the stages up in the
// order data flows through them (sample → convert → compare → search) and re-exports
// the value types a caller needs, so the automation layer never has to reach into
// `core_modules`.
//
// Every function here is a pure, synchronous computation over borrowed inputs. For
// evaluating many patterns concurrently see `parallel_pipeline`.

use crate::core_modules::area_search;
use crate::core_modules::color_space;
use crate::core_modules::grid_sampler;
use crate::core_modules::similarity;

// Re-export key data structures for the public API.
pub use crate::core_modules::area_search::AreaMatch;
pub use crate::core_modules::chunk::chunk::Region;
pub use crate::core_modules::color_space::{GrayFingerprint, Hsv, HsvFingerprint};
pub use crate::core_modules::grid_sampler::{CELL_COUNT, GRID_HEIGHT, GRID_WIDTH, RgbFingerprint};
pub use crate::core_modules::pixel::pixel::{Bitmap, Rgb};
pub use crate::core_modules::reference_pattern::ReferencePattern;
pub use crate::core_modules::similarity::IgnoredChannels;
pub use crate::core_modules::utils::image_helper::image_helper::{load, save};
pub use crate::error::MatchError;

/// Stage 1: reduce `region` of `bitmap` to `CELL_COUNT` averaged samples.
pub fn sample_cell_grid(bitmap: &Bitmap, region: &Region) -> RgbFingerprint {
    grid_sampler::sample_cell_grid(bitmap, region)
}

/// Stage 2a: HSV view of a fingerprint.
pub fn to_hsv(fingerprint: &[Rgb]) -> HsvFingerprint {
    color_space::to_hsv(fingerprint)
}

/// Stage 2b: luminance view of a fingerprint.
pub fn to_grayscale(fingerprint: &[Rgb]) -> GrayFingerprint {
    color_space::to_grayscale(fingerprint)
}

/// Whole-region brightness in `[0, 1]`.
pub fn overall_lightness(fingerprint: &[Rgb]) -> f64 {
    color_space::overall_lightness(fingerprint)
}

/// Stage 3a: brightness-invariant structure score in `[0, 100]`.
pub fn texture_similarity(a: &[f64], b: &[f64]) -> f64 {
    similarity::texture_similarity(a, b)
}

/// Stage 3b: colour score in `[0, 100]`.
pub fn absolute_similarity(a: &[Hsv], b: &[Hsv], ignored: IgnoredChannels) -> f64 {
    similarity::absolute_similarity(a, b, ignored)
}

/// Stage 4: slide `pattern` over `area` until a window scores above `threshold`.
pub fn search_area(
    pattern: &ReferencePattern,
    bitmap: &Bitmap,
    area: Region,
    threshold: f64,
    ignored: IgnoredChannels,
) -> AreaMatch {
    area_search::search_area(pattern, bitmap, area, threshold, ignored)
}
