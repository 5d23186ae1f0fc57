//! PNG encoder: 8-bit gray, gray+alpha, RGB and RGBA, never interlaced.

use std::io::Write;

use enough::Stop;

use crate::error::BitmapError;
use crate::pixel::PixelFormat;

fn color_type_for(format: PixelFormat) -> Result<png::ColorType, BitmapError> {
    match format {
        PixelFormat::Luminance => Ok(png::ColorType::Grayscale),
        PixelFormat::LuminanceAlpha => Ok(png::ColorType::GrayscaleAlpha),
        PixelFormat::Rgb => Ok(png::ColorType::Rgb),
        PixelFormat::Rgba => Ok(png::ColorType::Rgba),
        PixelFormat::Null => Err(BitmapError::UnsupportedFormat(format)),
    }
}

/// Builder for a PNG encode of a packed 8-bit buffer.
#[derive(Clone, Copy, Debug)]
pub struct EncodeRequest {
    format: PixelFormat,
}

impl EncodeRequest {
    pub fn new(format: PixelFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Encode `pixels` into `writer`.
    pub fn encode_to<W: Write>(
        &self,
        writer: W,
        pixels: &[u8],
        width: u32,
        height: u32,
        stop: impl Stop,
    ) -> Result<(), BitmapError> {
        encode_png(writer, pixels, width, height, self.format, &stop)
    }

    /// Encode `pixels` to an in-memory PNG.
    pub fn encode(&self, pixels: &[u8], width: u32, height: u32, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
        let mut out = Vec::new();
        encode_png(&mut out, pixels, width, height, self.format, &stop)?;
        Ok(out)
    }
}

pub(crate) fn encode_png<W: Write>(
    writer: W,
    pixels: &[u8],
    width: u32,
    height: u32,
    format: PixelFormat,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    let color = color_type_for(format)?;
    let expected = format
        .buffer_len(width, height)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    if pixels.len() != expected {
        return Err(BitmapError::BufferSizeMismatch {
            expected,
            actual: pixels.len(),
        });
    }

    stop.check()?;

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(color);
    encoder.set_depth(png::BitDepth::Eight);
    let mut png_writer = encoder.write_header()?;
    // Rows are packed with stride `channels * width`, row 0 first, which is
    // exactly the scanline order the encoder expects.
    png_writer.write_image_data(pixels)?;
    png_writer.finish()?;

    log::debug!("encoded {width}x{height} {format:?} as png");
    Ok(())
}
