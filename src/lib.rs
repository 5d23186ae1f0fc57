//! # zenraster
//!
//! Owned 8-bit bitmaps with PNG load/save, pixel format conversion, and
//! clipped rectangular blits.
//!
//! ## Pixel formats
//!
//! - **Luminance**: 1 channel
//! - **LuminanceAlpha**: 2 channels
//! - **Rgb**: 3 channels
//! - **Rgba**: 4 channels
//!
//! [`PixelFormat::Null`] marks an empty [`Bitmap`] with no buffer.
//!
//! ## PNG
//!
//! Any PNG color model decodes into one of the four formats: palettes become
//! RGB, 1/2/4-bit gray is widened, `tRNS` becomes alpha, 16-bit samples are
//! truncated to 8 bits, and Adam7 images are deinterlaced. Encoding always
//! writes 8-bit, non-interlaced PNGs in the bitmap's own color model.
//!
//! ## Non-Goals
//!
//! - Gamma and ICC color management
//! - Compression tuning
//! - Bit depths other than 8 bits per channel in memory
//! - Animated images
//!
//! ## Usage
//!
//! ```no_run
//! use zenraster::{Bitmap, PixelFormat, Point, Rect};
//!
//! let mut canvas = Bitmap::filled(PixelFormat::Rgba, 64, 64, 0x0000_00FF)?;
//! let mut sprite = Bitmap::new();
//! sprite.load("sprite.png")?;
//! sprite.convert_format(PixelFormat::Rgba)?;
//!
//! let mut region = Rect::new(0, 0, 16, 16);
//! canvas.blit(Some(Point::new(60, 60)), Some(&mut region), &sprite)?;
//! // region now holds the clipped destination, at most 4x4 here
//!
//! canvas.save("out.png")?;
//! # Ok::<(), zenraster::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

mod bitmap;
mod blit;
mod codec;
mod convert;
mod error;
mod limits;
mod pixel;
mod view;

// Re-exports
pub use bitmap::Bitmap;
pub use blit::{Point, Rect};
pub use codec::{
    ColorModel, DecodeOutput, DecodeRequest, EncodeRequest, ImageInfo, decode_png, encode_png,
    encode_png_to_vec,
};
pub use convert::convert;
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use limits::Limits;
#[cfg(feature = "rgb")]
pub use pixel::BitmapPixel;
pub use pixel::PixelFormat;
pub use view::{PixelView, PixelViewMut};
