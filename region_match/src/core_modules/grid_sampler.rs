// THEORY:
// The grid sampler is the block reducer of the engine. It slices a `Region` of a
// `Bitmap` into a fixed `GRID_WIDTH` x `GRID_HEIGHT` grid of `Chunk`s and reduces
// each chunk to its average colour, producing the RGB fingerprint every later
// stage consumes.
//
// Key architectural principles:
// 1.  **Fixed Output Shape**: Whatever the region's size or aspect ratio, the output
//     always has `CELL_COUNT` samples, in row-major order (rows outer, columns
//     inner). Fingerprints are only comparable position by position.
// 2.  **Floating Spans, Floored Edges**: The region's width and height are split into
//     equal floating point spans; each cell edge is the floor of its span boundary.
//     End edges are inclusive, so a cell reaches one pixel into its neighbour.
// 3.  **In-Bounds Requests**: The sampler is the only caller of `Bitmap::rgb_at`, so
//     it is the one responsible for never requesting a pixel outside the bitmap.
//     Inclusive ends that would step past the bitmap's last column/row are pulled
//     back onto it.
// 4.  **Stateless**: There is no memory between calls; two calls with the same
//     bitmap and region always produce the same fingerprint.

use crate::core_modules::chunk::chunk::{Chunk, Region};
use crate::core_modules::pixel::pixel::{Bitmap, Rgb};

pub const GRID_WIDTH: u32 = 8;
pub const GRID_HEIGHT: u32 = 8;
pub const CELL_COUNT: usize = (GRID_WIDTH * GRID_HEIGHT) as usize;

/// Ordered per-cell averaged colours of a region.
pub type RgbFingerprint = Vec<Rgb>;

/// Inclusive pixel bounds of grid cell `(row, column)` of `region`.
pub fn cell_bounds(bitmap: &Bitmap, region: &Region, row: u32, column: u32) -> Chunk {
    let per_width = region.width as f64 / GRID_WIDTH as f64;
    let per_height = region.height as f64 / GRID_HEIGHT as f64;

    let last_x = bitmap.width().saturating_sub(1);
    let last_y = bitmap.height().saturating_sub(1);

    let x_end = region
        .left
        .saturating_add((per_width * (column + 1) as f64).floor() as u32)
        .min(last_x);
    let y_end = region
        .top
        .saturating_add((per_height * (row + 1) as f64).floor() as u32)
        .min(last_y);
    let x_start = region
        .left
        .saturating_add((per_width * column as f64).floor() as u32)
        .min(x_end);
    let y_start = region
        .top
        .saturating_add((per_height * row as f64).floor() as u32)
        .min(y_end);

    Chunk::new(x_start, x_end, y_start, y_end)
}

/// Cuts `region` into the fixed grid and averages each cell.
///
/// The region is expected to lie inside the bitmap and be at least
/// `GRID_WIDTH` x `GRID_HEIGHT` pixels. Smaller regions still yield
/// `CELL_COUNT` samples, but neighbouring cells collapse onto the same pixels.
/// A bitmap with no pixels yields an all-black grid.
pub fn sample_cell_grid(bitmap: &Bitmap, region: &Region) -> RgbFingerprint {
    if bitmap.is_empty() {
        return vec![Rgb::default(); CELL_COUNT];
    }

    let mut fingerprint = Vec::with_capacity(CELL_COUNT);
    for row in 0..GRID_HEIGHT {
        for column in 0..GRID_WIDTH {
            let chunk = cell_bounds(bitmap, region, row, column);
            fingerprint.push(chunk.average_rgb(bitmap));
        }
    }
    fingerprint
}
