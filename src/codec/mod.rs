//! PNG decoding and encoding over the `png` crate.
//!
//! Decoding normalizes every supported PNG to one of the four 8-bit
//! [`PixelFormat`]s: palettes become RGB, 1/2/4-bit gray is widened to 8 bits,
//! `tRNS` transparency becomes an explicit alpha channel, and 16-bit samples
//! keep their high byte. Interlaced (Adam7) images are reassembled into full
//! rows. Encoding always writes 8-bit, non-interlaced, non-palette PNGs.

mod decode;
mod encode;

pub use decode::{DecodeOutput, DecodeRequest};
pub use encode::EncodeRequest;

use std::io::Write;

use enough::Stop;

use crate::error::BitmapError;
use crate::pixel::PixelFormat;

/// Color model stored in a PNG header, before normalization.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorModel {
    Gray,
    GrayAlpha,
    Indexed,
    Rgb,
    Rgba,
}

impl ColorModel {
    fn from_png(color: png::ColorType) -> Self {
        match color {
            png::ColorType::Grayscale => Self::Gray,
            png::ColorType::GrayscaleAlpha => Self::GrayAlpha,
            png::ColorType::Indexed => Self::Indexed,
            png::ColorType::Rgb => Self::Rgb,
            png::ColorType::Rgba => Self::Rgba,
        }
    }
}

/// Header-level facts about a PNG stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Color model as stored in the file.
    pub color_model: ColorModel,
    /// Bits per sample as stored in the file (1, 2, 4, 8 or 16).
    pub bit_depth: u8,
    pub interlaced: bool,
    /// The in-memory format a full decode produces.
    pub format: PixelFormat,
}

impl ImageInfo {
    /// Read only the PNG header from `reader`.
    pub fn probe<R: std::io::Read>(reader: R) -> Result<Self, BitmapError> {
        let png_reader = decode::normalizing_decoder(reader).read_info()?;
        decode::info_of(&png_reader)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, BitmapError> {
        Self::probe(data)
    }

    /// Number of passes a decode reads: 7 for Adam7, otherwise 1.
    pub fn passes(&self) -> u8 {
        if self.interlaced { 7 } else { 1 }
    }
}

/// Decode a complete PNG held in memory.
pub fn decode_png(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, BitmapError> {
    DecodeRequest::new(data).decode(stop)
}

/// Encode `pixels` as an 8-bit PNG into `writer`.
///
/// `pixels` must be exactly `width * height * format.channels()` bytes, rows
/// top to bottom. [`PixelFormat::Null`] cannot be encoded.
pub fn encode_png<W: Write>(
    writer: W,
    pixels: &[u8],
    width: u32,
    height: u32,
    format: PixelFormat,
    stop: impl Stop,
) -> Result<(), BitmapError> {
    encode::encode_png(writer, pixels, width, height, format, &stop)
}

/// Encode `pixels` to an in-memory PNG.
pub fn encode_png_to_vec(
    pixels: &[u8],
    width: u32,
    height: u32,
    format: PixelFormat,
    stop: impl Stop,
) -> Result<Vec<u8>, BitmapError> {
    EncodeRequest::new(format).encode(pixels, width, height, stop)
}
