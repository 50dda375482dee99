// THEORY:
// The `chunk` module describes rectangles of pixels. A `Region` is the caller-facing
// rectangle (a region of interest, or a search area); a `Chunk` is one cell of the
// fixed grid that a region is cut into.
//
// Key architectural principles:
// 1.  **Spatial Pooling**: A chunk reduces every pixel it covers to one averaged `Rgb`
//     sample. This is what makes fingerprints tolerant of single-pixel noise.
// 2.  **Inclusive Bounds**: Cell bounds are inclusive on both ends, so neighbouring
//     cells share their boundary column/row. Fingerprints depend on this exact
//     overlap and it must not be "fixed" without re-capturing every stored pattern.
// 3.  **Data Container**: Like `Rgb`, `Chunk` is dumb. It knows how to average its
//     own pixels and nothing about the grid it belongs to.

pub mod chunk {
    use crate::core_modules::pixel::pixel::{Bitmap, Rgb};

    /// An axis-aligned rectangle in bitmap pixel coordinates.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Region {
        pub left: u32,
        pub top: u32,
        pub width: u32,
        pub height: u32,
    }

    impl Region {
        pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
            Self {
                left,
                top,
                width,
                height,
            }
        }

        /// Exclusive right edge, saturating at `u32::MAX`.
        pub fn right(&self) -> u32 {
            self.left.saturating_add(self.width)
        }

        /// Exclusive bottom edge, saturating at `u32::MAX`.
        pub fn bottom(&self) -> u32 {
            self.top.saturating_add(self.height)
        }

        /// Whether the region lies inside a `width` x `height` bitmap.
        pub fn fits_within(&self, width: u32, height: u32) -> bool {
            self.right() <= width && self.bottom() <= height
        }

        /// The same-sized region moved to `(left, top)`.
        pub fn moved_to(&self, left: u32, top: u32) -> Self {
            Self { left, top, ..*self }
        }
    }

    /// One grid cell: an inclusive pixel rectangle `[x_start, x_end] x [y_start, y_end]`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Chunk {
        pub x_start: u32,
        pub x_end: u32,
        pub y_start: u32,
        pub y_end: u32,
    }

    impl Chunk {
        pub fn new(x_start: u32, x_end: u32, y_start: u32, y_end: u32) -> Self {
            Self {
                x_start,
                x_end,
                y_start,
                y_end,
            }
        }

        pub fn pixel_count(&self) -> u64 {
            (self.x_end - self.x_start + 1) as u64 * (self.y_end - self.y_start + 1) as u64
        }

        /// Mean RGB over every pixel the chunk covers.
        pub fn average_rgb(&self, bitmap: &Bitmap) -> Rgb {
            let mut sum_r = 0.0;
            let mut sum_g = 0.0;
            let mut sum_b = 0.0;

            for y in self.y_start..=self.y_end {
                for x in self.x_start..=self.x_end {
                    let rgb = bitmap.rgb_at(x, y);
                    sum_r += rgb.red;
                    sum_g += rgb.green;
                    sum_b += rgb.blue;
                }
            }

            let count = self.pixel_count() as f64;
            Rgb::new(sum_r / count, sum_g / count, sum_b / count)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::chunk::*;
    use crate::core_modules::pixel::pixel::{Bitmap, Rgb};

    #[test]
    fn region_edges_and_containment() {
        let region = Region::new(2, 3, 10, 5);
        assert_eq!(region.right(), 12);
        assert_eq!(region.bottom(), 8);
        assert!(region.fits_within(12, 8));
        assert!(!region.fits_within(11, 8));
        assert_eq!(region.moved_to(0, 0), Region::new(0, 0, 10, 5));
    }

    #[test]
    fn edges_saturate_at_the_coordinate_limit() {
        let region = Region::new(u32::MAX - 2, u32::MAX, 10, 1);
        assert_eq!(region.right(), u32::MAX);
        assert_eq!(region.bottom(), u32::MAX);
        assert!(!region.fits_within(640, 480));
    }

    #[test]
    fn averages_inclusive_bounds() {
        // Column x carries red = x * 10.
        let bitmap = Bitmap::from_fn(4, 4, |x, _| [x as u8 * 10, 0, 0, 255]);
        let chunk = Chunk::new(1, 2, 0, 3);
        assert_eq!(chunk.pixel_count(), 8);
        assert_eq!(chunk.average_rgb(&bitmap), Rgb::new(15.0, 0.0, 0.0));
    }

    #[test]
    fn single_pixel_chunk_is_that_pixel() {
        let bitmap = Bitmap::from_fn(2, 2, |x, y| [x as u8, y as u8, 99, 0]);
        let chunk = Chunk::new(1, 1, 1, 1);
        assert_eq!(chunk.average_rgb(&bitmap), Rgb::new(1.0, 1.0, 99.0));
    }
}
