use enough::StopReason;

use crate::pixel::PixelFormat;

/// Errors from bitmap decoding, encoding, conversion, and compositing.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("png codec error: {0}")]
    Codec(String),

    #[error("channel count mismatch: blit {src:?} onto {dst:?}")]
    FormatMismatch { dst: PixelFormat, src: PixelFormat },

    #[error("unsupported conversion from {from:?} to {to:?}")]
    UnsupportedConversion { from: PixelFormat, to: PixelFormat },

    #[error("unsupported pixel format: {0:?}")]
    UnsupportedFormat(PixelFormat),

    #[error("operation {operation} not supported for {format:?}")]
    UnsupportedOperation {
        operation: &'static str,
        format: PixelFormat,
    },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}

impl From<png::DecodingError> for BitmapError {
    fn from(e: png::DecodingError) -> Self {
        BitmapError::Codec(e.to_string())
    }
}

impl From<png::EncodingError> for BitmapError {
    fn from(e: png::EncodingError) -> Self {
        BitmapError::Codec(e.to_string())
    }
}
