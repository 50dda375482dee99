// THEORY:
// Area search answers "is the reference pattern somewhere inside this area right now?"
// It slides a window the size of the pattern's region over every integer offset of the
// area, fingerprints each window and scores it against the pattern with the absolute
// metric.
//
// Key architectural principles:
// 1.  **Bounded Window**: The last offset on each axis is
//     `max(area.start + area.size - pattern.size, area.start)`, so a window never leaves
//     the area. An area no larger than the pattern evaluates exactly one offset.
// 2.  **Greedy Accept**: The search stops at the first offset whose running best score
//     strictly exceeds the threshold. It does not go on to find the global maximum;
//     callers who need that must pass a threshold nothing can reach.
// 3.  **Cost**: Every offset re-runs the grid sampler, the HSV conversion and the metric.
//     There is no timeout; a large area with an unreachable threshold is scanned in
//     full.

use log::{debug, trace};

use crate::core_modules::chunk::chunk::Region;
use crate::core_modules::color_space::to_hsv;
use crate::core_modules::grid_sampler::sample_cell_grid;
use crate::core_modules::pixel::pixel::Bitmap;
use crate::core_modules::reference_pattern::ReferencePattern;
use crate::core_modules::similarity::{absolute_similarity, IgnoredChannels};

/// Outcome of sliding a pattern over an area.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaMatch {
    /// Best absolute score seen before the search stopped.
    pub value: f64,
    /// Whether `value` strictly exceeded the threshold.
    pub matched: bool,
    /// The window that produced `value`.
    pub position: Region,
    /// Number of offsets scored.
    pub evaluated: usize,
}

/// Slides `pattern` over `area` of `bitmap` looking for a window that scores above
/// `expect` on the absolute metric.
pub fn search_area(
    pattern: &ReferencePattern,
    bitmap: &Bitmap,
    area: Region,
    expect: f64,
    ignored: IgnoredChannels,
) -> AreaMatch {
    let crop = pattern.region();
    let max_x = area.right().saturating_sub(crop.width).max(area.left);
    let max_y = area.bottom().saturating_sub(crop.height).max(area.top);

    let mut best = AreaMatch {
        value: 0.0,
        matched: false,
        position: crop.moved_to(area.left, area.top),
        evaluated: 0,
    };

    for top in area.top..=max_y {
        for left in area.left..=max_x {
            let window = crop.moved_to(left, top);
            let candidate = to_hsv(&sample_cell_grid(bitmap, &window));
            let score = absolute_similarity(pattern.hsv(), &candidate, ignored);
            best.evaluated += 1;

            if score > best.value {
                trace!("new best {score:.3} at ({left}, {top})");
                best.value = score;
                best.position = window;
            }
            if best.value > expect {
                debug!(
                    "pattern found at ({}, {}) scoring {:.3} > {expect} after {} offsets",
                    best.position.left, best.position.top, best.value, best.evaluated
                );
                best.matched = true;
                return best;
            }
        }
    }

    debug!(
        "area {:?} exhausted after {} offsets, best {:.3} <= {expect}",
        area, best.evaluated, best.value
    );
    best
}
