//! PNG decoder: header probe, limit checks, and row reconstruction.

use std::io::Read;

use enough::Stop;

use super::{ColorModel, ImageInfo};
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::PixelFormat;

/// Decoded image. Pixels are always owned and tightly packed, top row first.
#[derive(Clone, Debug)]
pub struct DecodeOutput {
    pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    /// Header facts of the source stream.
    pub info: ImageInfo,
}

impl DecodeOutput {
    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

/// Builder for a PNG decode with optional [`Limits`].
#[derive(Debug)]
pub struct DecodeRequest<'a, R> {
    reader: R,
    limits: Option<&'a Limits>,
}

impl<'a, R: Read> DecodeRequest<'a, R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            limits: None,
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode the whole stream. `stop` is checked between row batches.
    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput, BitmapError> {
        decode_stream(self.reader, self.limits, &stop)
    }
}

/// A decoder with the normalizing transform chain installed: palette and
/// low-bit gray expansion plus tRNS to alpha (`EXPAND`), then 16 to 8 bits.
pub(super) fn normalizing_decoder<R: Read>(reader: R) -> png::Decoder<R> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    decoder
}

fn format_for(color: png::ColorType) -> Result<PixelFormat, BitmapError> {
    match color {
        png::ColorType::Grayscale => Ok(PixelFormat::Luminance),
        png::ColorType::GrayscaleAlpha => Ok(PixelFormat::LuminanceAlpha),
        png::ColorType::Rgb => Ok(PixelFormat::Rgb),
        png::ColorType::Rgba => Ok(PixelFormat::Rgba),
        png::ColorType::Indexed => Err(BitmapError::Codec(
            "palette was not expanded to direct color".into(),
        )),
    }
}

pub(super) fn info_of<R: Read>(reader: &png::Reader<R>) -> Result<ImageInfo, BitmapError> {
    let header = reader.info();
    let (out_color, out_depth) = reader.output_color_type();
    if out_depth != png::BitDepth::Eight {
        return Err(BitmapError::Codec(format!(
            "decoder produced {out_depth:?} samples, expected 8-bit"
        )));
    }
    Ok(ImageInfo {
        width: header.width,
        height: header.height,
        color_model: ColorModel::from_png(header.color_type),
        bit_depth: header.bit_depth as u8,
        interlaced: header.interlaced,
        format: format_for(out_color)?,
    })
}

fn decode_stream<R: Read>(
    stream: R,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, BitmapError> {
    let mut reader = normalizing_decoder(stream).read_info()?;
    let info = info_of(&reader)?;
    let (width, height, format) = (info.width, info.height, info.format);

    let row_bytes = (width as usize)
        .checked_mul(format.channels())
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    let len = row_bytes
        .checked_mul(height as usize)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    if len == 0 {
        return Err(BitmapError::Codec(format!("empty image {width}x{height}")));
    }
    if let Some(limits) = limits {
        limits.check(width, height, len)?;
    }
    stop.check()?;

    let pixels = if info.interlaced {
        read_interlaced(&mut reader, len, stop)?
    } else {
        read_rows(&mut reader, row_bytes, len, stop)?
    };

    log::debug!(
        "decoded {width}x{height} png ({:?}, {}-bit, {} pass(es)) as {format:?}",
        info.color_model,
        info.bit_depth,
        info.passes(),
    );
    Ok(DecodeOutput {
        pixels,
        width,
        height,
        format,
        info,
    })
}

/// Single pass: one decoded row per image row, in file order.
fn read_rows<R: Read>(
    reader: &mut png::Reader<R>,
    row_bytes: usize,
    len: usize,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    let mut pixels = vec![0u8; len];
    for (y, out) in pixels.chunks_exact_mut(row_bytes).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        let row = reader
            .next_row()?
            .ok_or_else(|| BitmapError::Codec(format!("image data ended at row {y}")))?;
        let data = row
            .data()
            .get(..row_bytes)
            .ok_or_else(|| BitmapError::Codec(format!("short row {y}")))?;
        out.copy_from_slice(data);
    }
    Ok(pixels)
}

/// Adam7: the decoder collects all seven passes and scatters them into full rows.
///
/// The frame is read in one call, so `stop` is only checked before it starts.
fn read_interlaced<R: Read>(
    reader: &mut png::Reader<R>,
    len: usize,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    stop.check()?;
    let mut pixels = vec![0u8; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut pixels)?;
    if frame.buffer_size() != len {
        return Err(BitmapError::Codec(format!(
            "interlaced frame is {} bytes, expected {len}",
            frame.buffer_size()
        )));
    }
    pixels.truncate(len);
    Ok(pixels)
}
