pub mod image_helper {
    use std::io::{BufWriter, Write};
    use std::path::Path;

    use image::ImageEncoder;

    use crate::core_modules::pixel::pixel::Bitmap;
    use crate::error::MatchError;

    /// Decodes any format the `image` crate understands into an RGBA bitmap.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Bitmap, MatchError> {
        let image = image::open(path)?.to_rgba8();
        Ok(Bitmap::from(image))
    }

    /// Writes the bitmap as an RGBA PNG.
    pub fn save<P: AsRef<Path>>(path: P, bitmap: &Bitmap) -> Result<(), MatchError> {
        let output = std::fs::File::create(path).map_err(image::ImageError::IoError)?;
        let mut writer = BufWriter::new(output);
        let encoder = image::codecs::png::PngEncoder::new(&mut writer);
        let pixel_bytes = bitmap.width() as usize * bitmap.height() as usize * 4;

        encoder.write_image(
            &bitmap.as_raw()[..pixel_bytes],
            bitmap.width(),
            bitmap.height(),
            image::ExtendedColorType::Rgba8,
        )?;
        writer.flush().map_err(image::ImageError::IoError)?;

        Ok(())
    }
}
