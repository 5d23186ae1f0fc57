#![no_main]
use libfuzzer_sys::fuzz_target;
use zenraster::*;

fuzz_target!(|input: (u8, u8, u8, u8, i32, i32, i32, i32, i32, i32)| {
    let (dw, dh, sw, sh, px, py, rx, ry, rw, rh) = input;
    let dw = u32::from(dw % 64);
    let dh = u32::from(dh % 64);
    let sw = u32::from(sw % 64);
    let sh = u32::from(sh % 64);

    // Any geometry must clip into bounds without panicking
    let Ok(mut dst) = Bitmap::filled(PixelFormat::Rgb, dw, dh, 0) else { return };
    let Ok(src) = Bitmap::filled(PixelFormat::Rgb, sw, sh, 0xFFFF_FFFF) else { return };
    let mut region = Rect::new(rx, ry, rw, rh);
    let written = dst
        .blit(Some(Point::new(px, py)), Some(&mut region), &src)
        .expect("same format blit succeeds");

    assert_eq!(written, region);
    assert!(written.x >= 0 && written.y >= 0);
    if !written.is_empty() {
        assert!(written.x + written.width <= dw as i32);
        assert!(written.y + written.height <= dh as i32);
    }
});
