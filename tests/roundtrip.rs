use enough::Unstoppable;
use zenraster::*;

fn noise_pattern(len: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; len];
    let mut state: u32 = 0xDEAD_BEEF;
    for p in pixels.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *p = state as u8;
    }
    pixels
}

fn roundtrip(format: PixelFormat, w: u32, h: u32) {
    let pixels = noise_pattern(format.buffer_len(w, h).unwrap());
    let bitmap = Bitmap::from_raw(format, w, h, pixels.clone()).unwrap();

    let encoded = bitmap.to_png_bytes().unwrap();
    let decoded = Bitmap::from_png_bytes(&encoded).unwrap();

    assert_eq!(decoded.format(), format);
    assert_eq!(decoded.width(), w);
    assert_eq!(decoded.height(), h);
    assert_eq!(decoded.data().unwrap(), &pixels[..]);
    assert_eq!(decoded, bitmap);
}

#[test]
fn png_roundtrip_luminance() {
    roundtrip(PixelFormat::Luminance, 17, 9);
}

#[test]
fn png_roundtrip_luminance_alpha() {
    roundtrip(PixelFormat::LuminanceAlpha, 5, 12);
}

#[test]
fn png_roundtrip_rgb() {
    roundtrip(PixelFormat::Rgb, 8, 6);
}

#[test]
fn png_roundtrip_rgba() {
    roundtrip(PixelFormat::Rgba, 1, 1);
    roundtrip(PixelFormat::Rgba, 33, 3);
}

#[test]
fn top_row_is_written_first() {
    // 1x2: white on top, black below
    let bitmap = Bitmap::from_raw(PixelFormat::Luminance, 1, 2, vec![255, 0]).unwrap();
    let encoded = encode_png_to_vec(bitmap.data().unwrap(), 1, 2, PixelFormat::Luminance, Unstoppable).unwrap();
    let decoded = decode_png(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.pixels(), &[255, 0]);
    assert_eq!(decoded.info.passes(), 1);
}

#[test]
fn empty_bitmap_cannot_be_encoded() {
    let err = Bitmap::new().to_png_bytes().unwrap_err();
    assert!(matches!(err, BitmapError::UnsupportedFormat(PixelFormat::Null)));
}

#[test]
fn image_info_probe() {
    let bitmap = Bitmap::filled(PixelFormat::LuminanceAlpha, 3, 7, 0x1020_3040).unwrap();
    let encoded = bitmap.to_png_bytes().unwrap();

    let info = ImageInfo::from_bytes(&encoded).unwrap();
    assert_eq!(info.width, 3);
    assert_eq!(info.height, 7);
    assert_eq!(info.color_model, ColorModel::GrayAlpha);
    assert_eq!(info.bit_depth, 8);
    assert!(!info.interlaced);
    assert_eq!(info.format, PixelFormat::LuminanceAlpha);
}

#[test]
fn limits_reject_large() {
    let bitmap = Bitmap::filled(PixelFormat::Rgb, 1, 2, 0xFFFF_FFFF).unwrap();
    let encoded = bitmap.to_png_bytes().unwrap();

    let limits = Limits {
        max_pixels: Some(1), // only 1 pixel allowed
        ..Default::default()
    };

    let result = DecodeRequest::new(&encoded[..])
        .with_limits(&limits)
        .decode(Unstoppable);
    match result.unwrap_err() {
        BitmapError::LimitExceeded(_) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }
}

#[test]
fn failed_decode_leaves_bitmap_untouched() {
    let mut bitmap = Bitmap::filled(PixelFormat::Rgb, 2, 2, 0x1122_33FF).unwrap();
    let before = bitmap.clone();

    let mut encoded = bitmap.to_png_bytes().unwrap();
    // signature + IHDR + half an IDAT chunk header
    encoded.truncate(40);
    assert!(bitmap.read_from(&encoded[..]).is_err());
    assert!(bitmap.read_from(&b"\x89PNG\r\n\x1a\nnope"[..]).is_err());
    assert_eq!(bitmap, before);
}

#[cfg(feature = "rgb")]
#[test]
fn typed_pixel_views() {
    use rgb::{RGB8, RGBA8};

    let bitmap = Bitmap::filled(PixelFormat::Rgba, 2, 1, 0x0102_0304).unwrap();
    let px: &[RGBA8] = bitmap.as_pixels().unwrap();
    assert_eq!(px, &[RGBA8::new(1, 2, 3, 4); 2]);
    assert!(bitmap.as_pixels::<RGB8>().is_err());

    let gray = Bitmap::filled(PixelFormat::LuminanceAlpha, 3, 1, 0x4040_4080).unwrap();
    let px: &[rgb::GrayAlpha<u8>] = gray.as_pixels().unwrap();
    assert_eq!(px.len(), 3);
    assert_eq!(px[2].0, 0x40);
    assert_eq!(px[2].1, 0x80);
}

#[cfg(feature = "imgref")]
#[test]
fn imgref_view_has_bitmap_shape() {
    let bitmap = Bitmap::filled(PixelFormat::Rgb, 4, 3, 0x0A0B_0C00).unwrap();
    let img = bitmap.as_imgref::<rgb::RGB8>().unwrap();
    assert_eq!(img.width(), 4);
    assert_eq!(img.height(), 3);
    assert_eq!(img.buf()[0], rgb::RGB8::new(10, 11, 12));
}
