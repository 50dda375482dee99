// THEORY:
// The `pixel` module is the lowest layer of the engine. It owns the two "dumb" data
// containers everything else is built on: the captured `Bitmap` and the floating
// point `Rgb` sample that the block reducer averages into.
//
// Key principles:
// 1.  **Raw Layout**: A bitmap is a row-major buffer with 4 bytes per pixel
//     (R, G, B, then alpha or padding). The 4th byte is never read.
// 2.  **Hot Path**: `Bitmap::rgb_at` is called once per pixel of every sampled
//     cell, for every window of an area search. It does no clamping; callers own
//     the coordinate contract. Debug builds assert it.
// 3.  **Single-Sample Scope**: Anything that needs more than one sample (averaging,
//     colorspace sequences, comparisons) lives in higher modules.

pub mod pixel {
    use crate::error::MatchError;

    pub type Byte = u8;
    pub type Bytes = Vec<Byte>;
    pub type Channel = f64;
    pub type Luminance = f64;

    /// Bytes per pixel in a raw bitmap buffer.
    pub const CHANNELS: usize = 4;

    const RED_WEIGHT: f64 = 0.30;
    const GREEN_WEIGHT: f64 = 0.59;
    const BLUE_WEIGHT: f64 = 0.11;

    /// An RGB triple with channels in `[0, 255]`. Usually the average of a grid
    /// cell rather than a single pixel, hence the floating point channels.
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Rgb {
        pub red: Channel,
        pub green: Channel,
        pub blue: Channel,
    }

    impl Rgb {
        pub fn new(red: Channel, green: Channel, blue: Channel) -> Self {
            Self { red, green, blue }
        }

        /// Grayscale weight `0.30R + 0.59G + 0.11B`, on the 0..255 scale.
        pub fn luminance(&self) -> Luminance {
            RED_WEIGHT * self.red + GREEN_WEIGHT * self.green + BLUE_WEIGHT * self.blue
        }

        /// Channels scaled to `[0, 1]`.
        pub fn normalized(&self) -> (f64, f64, f64) {
            (self.red / 255.0, self.green / 255.0, self.blue / 255.0)
        }
    }

    impl From<&[Byte]> for Rgb {
        /// Reads the first three bytes as R, G, B. Anything after them is ignored.
        fn from(bytes: &[Byte]) -> Self {
            Rgb::new(bytes[0] as Channel, bytes[1] as Channel, bytes[2] as Channel)
        }
    }

    /// An immutable RGBA snapshot of a captured screen region.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Bitmap {
        width: u32,
        height: u32,
        data: Bytes,
    }

    impl Bitmap {
        /// Wraps a raw RGBA buffer. The buffer may be longer than the
        /// dimensions need (trailing padding), never shorter.
        pub fn new(width: u32, height: u32, data: Bytes) -> Result<Self, MatchError> {
            let expected = width as usize * height as usize * CHANNELS;
            if data.len() < expected {
                return Err(MatchError::BufferTooSmall {
                    expected,
                    actual: data.len(),
                });
            }
            Ok(Self {
                width,
                height,
                data,
            })
        }

        /// Builds a bitmap by asking `pixel` for the RGBA bytes of every coordinate.
        pub fn from_fn<F>(width: u32, height: u32, mut pixel: F) -> Self
        where
            F: FnMut(u32, u32) -> [Byte; CHANNELS],
        {
            let mut data = Vec::with_capacity(width as usize * height as usize * CHANNELS);
            for y in 0..height {
                for x in 0..width {
                    data.extend_from_slice(&pixel(x, y));
                }
            }
            Self {
                width,
                height,
                data,
            }
        }

        pub fn width(&self) -> u32 {
            self.width
        }

        pub fn height(&self) -> u32 {
            self.height
        }

        /// True when the bitmap has no pixels to sample.
        pub fn is_empty(&self) -> bool {
            self.width == 0 || self.height == 0
        }

        pub fn as_raw(&self) -> &[Byte] {
            &self.data
        }

        pub fn into_raw(self) -> Bytes {
            self.data
        }

        /// The RGB triple at `(x, y)`.
        ///
        /// Precondition: `x < width` and `y < height`. Only checked in debug builds.
        #[inline]
        pub fn rgb_at(&self, x: u32, y: u32) -> Rgb {
            debug_assert!(
                x < self.width && y < self.height,
                "pixel ({x}, {y}) outside {}x{} bitmap",
                self.width,
                self.height
            );
            let base = (x as usize + y as usize * self.width as usize) * CHANNELS;
            Rgb::from(&self.data[base..base + 3])
        }
    }

    impl From<image::RgbaImage> for Bitmap {
        fn from(image: image::RgbaImage) -> Self {
            let (width, height) = image.dimensions();
            Self {
                width,
                height,
                data: image.into_raw(),
            }
        }
    }

    impl From<Bitmap> for Bytes {
        fn from(bitmap: Bitmap) -> Self {
            bitmap.data
        }
    }
}
