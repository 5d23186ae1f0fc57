//! Pixel format conversion between the luminance and RGB families.
//!
//! Luminance sources replicate their gray sample into every color channel.
//! RGB sources copy channels positionally, or collapse to the unweighted
//! average `(r + g + b) / 3` when the target has a single color channel.
//! Missing alpha is synthesized as fully opaque (255).

use std::borrow::Cow;

use crate::error::BitmapError;
use crate::pixel::PixelFormat;
use crate::view::{PixelView, PixelViewMut};

/// Unweighted luminance of an RGB triple, truncated.
pub(crate) fn average_luma(r: u8, g: u8, b: u8) -> u8 {
    ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) as u8
}

/// Convert `pixels` from `from` to `to`.
///
/// Returns the input unchanged (borrowed) when `to == from` or `to` is
/// [`PixelFormat::Null`]. A `Null` source has nothing to convert and yields
/// [`BitmapError::UnsupportedConversion`].
pub fn convert<'a>(
    from: PixelFormat,
    to: PixelFormat,
    width: u32,
    height: u32,
    pixels: &'a [u8],
) -> Result<Cow<'a, [u8]>, BitmapError> {
    if to == from || to == PixelFormat::Null {
        return Ok(Cow::Borrowed(pixels));
    }
    if from == PixelFormat::Null {
        log::warn!("refusing conversion from {from:?} to {to:?}");
        return Err(BitmapError::UnsupportedConversion { from, to });
    }

    let src = PixelView::new(pixels, width, height, from).ok_or_else(|| {
        BitmapError::BufferSizeMismatch {
            expected: from.buffer_len(width, height).unwrap_or(usize::MAX),
            actual: pixels.len(),
        }
    })?;
    let out_len = to
        .buffer_len(width, height)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    let mut out = vec![0u8; out_len];
    let mut dst = PixelViewMut::new(&mut out, width, height, to)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;

    if from.is_luminance() {
        luminance_to_any(src, &mut dst, from.has_alpha(), to);
    } else {
        rgb_to_any(src, &mut dst, from.has_alpha(), to);
    }

    log::debug!("converted {width}x{height} from {from:?} to {to:?}");
    Ok(Cow::Owned(out))
}

fn luminance_to_any(src: PixelView<'_>, dst: &mut PixelViewMut<'_>, src_alpha: bool, to: PixelFormat) {
    let color = to.color_channels();
    for (s, d) in src.pixels().zip(dst.pixels_mut()) {
        d[..color].fill(s[0]);
        if to.has_alpha() {
            d[color] = if src_alpha { s[1] } else { u8::MAX };
        }
    }
}

fn rgb_to_any(src: PixelView<'_>, dst: &mut PixelViewMut<'_>, src_alpha: bool, to: PixelFormat) {
    let color = to.color_channels();
    for (s, d) in src.pixels().zip(dst.pixels_mut()) {
        if color > 1 {
            d[..color].copy_from_slice(&s[..color]);
        } else {
            d[0] = average_luma(s[0], s[1], s[2]);
        }
        if to.has_alpha() {
            d[color] = if src_alpha { s[3] } else { u8::MAX };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PixelFormat::*;

    #[test]
    fn same_format_and_null_target_are_borrowed() {
        let px = [1u8, 2, 3];
        let same = convert(Rgb, Rgb, 1, 1, &px).unwrap();
        assert!(matches!(same, Cow::Borrowed(_)));
        assert_eq!(&*same, &px);
        let null = convert(Rgb, Null, 1, 1, &px).unwrap();
        assert!(matches!(null, Cow::Borrowed(_)));
    }

    #[test]
    fn null_source_is_rejected() {
        let err = convert(Null, Rgb, 0, 0, &[]).unwrap_err();
        assert!(matches!(
            err,
            BitmapError::UnsupportedConversion { from: Null, to: Rgb }
        ));
    }

    #[test]
    fn wrong_buffer_length_is_rejected() {
        let err = convert(Rgb, Rgba, 2, 2, &[0; 11]).unwrap_err();
        assert!(matches!(
            err,
            BitmapError::BufferSizeMismatch { expected: 12, actual: 11 }
        ));
    }

    #[test]
    fn luminance_expands_and_synthesizes_alpha() {
        let px = [10u8, 200];
        assert_eq!(&*convert(Luminance, Rgb, 2, 1, &px).unwrap(), &[10, 10, 10, 200, 200, 200]);
        assert_eq!(
            &*convert(Luminance, Rgba, 2, 1, &px).unwrap(),
            &[10, 10, 10, 255, 200, 200, 200, 255]
        );
        assert_eq!(&*convert(Luminance, LuminanceAlpha, 2, 1, &px).unwrap(), &[10, 255, 200, 255]);
    }

    #[test]
    fn luminance_alpha_keeps_alpha_or_drops_it() {
        let px = [10u8, 77];
        assert_eq!(&*convert(LuminanceAlpha, Rgba, 1, 1, &px).unwrap(), &[10, 10, 10, 77]);
        assert_eq!(&*convert(LuminanceAlpha, Rgb, 1, 1, &px).unwrap(), &[10, 10, 10]);
        assert_eq!(&*convert(LuminanceAlpha, Luminance, 1, 1, &px).unwrap(), &[10]);
    }

    #[test]
    fn rgb_collapses_to_truncated_average() {
        // (1 + 2 + 2) / 3 = 1 after truncation
        let px = [1u8, 2, 2, 255, 255, 254];
        assert_eq!(&*convert(Rgb, Luminance, 2, 1, &px).unwrap(), &[1, 254]);
        assert_eq!(&*convert(Rgb, LuminanceAlpha, 2, 1, &px).unwrap(), &[1, 255, 254, 255]);
    }

    #[test]
    fn rgba_copies_positionally() {
        let px = [9u8, 8, 7, 6];
        assert_eq!(&*convert(Rgba, Rgb, 1, 1, &px).unwrap(), &[9, 8, 7]);
        assert_eq!(&*convert(Rgb, Rgba, 1, 1, &px[..3]).unwrap(), &[9, 8, 7, 255]);
        assert_eq!(&*convert(Rgba, LuminanceAlpha, 1, 1, &px).unwrap(), &[8, 6]);
    }

    #[test]
    fn rgba_through_luminance_forces_opaque() {
        let (r, g, b, a) = (90u8, 30, 201, 17);
        let px: Vec<u8> = [r, g, b, a].repeat(6);
        let lum = convert(Rgba, Luminance, 3, 2, &px).unwrap().into_owned();
        let la = convert(Luminance, LuminanceAlpha, 3, 2, &lum).unwrap();
        let expected_l = ((r as u32 + g as u32 + b as u32) / 3) as u8;
        for p in la.chunks_exact(2) {
            assert_eq!(p, &[expected_l, 255]);
        }
    }

    #[test]
    fn average_does_not_overflow() {
        assert_eq!(average_luma(255, 255, 255), 255);
        assert_eq!(average_luma(0, 0, 2), 0);
    }
}
