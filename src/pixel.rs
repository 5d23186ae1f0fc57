/// In-memory pixel layout of a [`Bitmap`](crate::Bitmap). Every channel is 8 bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// No pixel data; the state of an empty bitmap.
    #[default]
    Null,
    /// Single channel, 8-bit grayscale.
    Luminance,
    /// 2 channels, 8-bit grayscale + alpha.
    LuminanceAlpha,
    /// 3 channels, 8-bit RGB.
    Rgb,
    /// 4 channels, 8-bit RGBA.
    Rgba,
}

impl PixelFormat {
    /// Look up a format by its numeric code.
    ///
    /// Unknown codes map to [`PixelFormat::Null`] so callers can probe
    /// speculatively without an error path.
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => Self::Luminance,
            2 => Self::LuminanceAlpha,
            3 => Self::Rgb,
            4 => Self::Rgba,
            _ => Self::Null,
        }
    }

    /// Numeric code; the inverse of [`PixelFormat::from_code`].
    pub fn code(self) -> u32 {
        self.channels() as u32
    }

    /// Number of channels (bytes) per pixel.
    pub fn channels(self) -> usize {
        match self {
            Self::Null => 0,
            Self::Luminance => 1,
            Self::LuminanceAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Whether the last channel is alpha.
    pub fn has_alpha(self) -> bool {
        matches!(self, Self::LuminanceAlpha | Self::Rgba)
    }

    /// Channels that carry color (luminance or RGB), excluding alpha.
    pub fn color_channels(self) -> usize {
        self.channels() - usize::from(self.has_alpha())
    }

    pub fn is_luminance(self) -> bool {
        matches!(self, Self::Luminance | Self::LuminanceAlpha)
    }

    pub fn is_rgb(self) -> bool {
        matches!(self, Self::Rgb | Self::Rgba)
    }

    /// Size of a tightly packed `width` x `height` buffer, or `None` on overflow.
    pub fn buffer_len(self, width: u32, height: u32) -> Option<usize> {
        (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(self.channels())
    }
}

/// Typed pixel that a bitmap buffer can be reinterpreted as.
#[cfg(feature = "rgb")]
pub trait BitmapPixel: Copy + 'static {
    /// The in-memory format whose byte layout matches this pixel type.
    fn format() -> PixelFormat;
}

#[cfg(feature = "rgb")]
impl BitmapPixel for rgb::Gray<u8> {
    fn format() -> PixelFormat {
        PixelFormat::Luminance
    }
}

#[cfg(feature = "rgb")]
impl BitmapPixel for rgb::GrayAlpha<u8> {
    fn format() -> PixelFormat {
        PixelFormat::LuminanceAlpha
    }
}

#[cfg(feature = "rgb")]
impl BitmapPixel for rgb::RGB8 {
    fn format() -> PixelFormat {
        PixelFormat::Rgb
    }
}

#[cfg(feature = "rgb")]
impl BitmapPixel for rgb::RGBA8 {
    fn format() -> PixelFormat {
        PixelFormat::Rgba
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [PixelFormat; 5] = [
        PixelFormat::Null,
        PixelFormat::Luminance,
        PixelFormat::LuminanceAlpha,
        PixelFormat::Rgb,
        PixelFormat::Rgba,
    ];

    #[test]
    fn channel_table() {
        let channels: Vec<_> = ALL.iter().map(|f| f.channels()).collect();
        assert_eq!(channels, [0, 1, 2, 3, 4]);
        let alpha: Vec<_> = ALL.iter().map(|f| f.has_alpha()).collect();
        assert_eq!(alpha, [false, false, true, false, true]);
        let color: Vec<_> = ALL.iter().map(|f| f.color_channels()).collect();
        assert_eq!(color, [0, 1, 1, 3, 3]);
    }

    #[test]
    fn codes_roundtrip_and_unknown_is_null() {
        for f in ALL {
            assert_eq!(PixelFormat::from_code(f.code()), f);
        }
        let unknown = PixelFormat::from_code(0x1908);
        assert_eq!(unknown, PixelFormat::Null);
        assert_eq!(unknown.channels(), 0);
        assert!(!unknown.has_alpha());
    }

    #[test]
    fn buffer_len_checks_overflow() {
        assert_eq!(PixelFormat::Rgb.buffer_len(4, 3), Some(36));
        assert_eq!(PixelFormat::Null.buffer_len(4, 3), Some(0));
        assert_eq!(PixelFormat::Rgba.buffer_len(u32::MAX, u32::MAX), None);
    }
}
