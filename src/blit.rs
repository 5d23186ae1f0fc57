//! Rectangular region copy between bitmaps, clipped to both bounds.

use crate::error::BitmapError;
use crate::view::{PixelView, PixelViewMut};

/// An integer point in pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rectangle covering a whole `width` x `height` bitmap.
    pub fn of_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, clamp_dim(width), clamp_dim(height))
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn area(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.width as u64 * self.height as u64
        }
    }
}

fn clamp_dim(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

/// Source and destination rectangles of a blit after clipping. Always congruent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BlitGeometry {
    pub src: Rect,
    pub dst: Rect,
}

/// Clip one axis. `src`/`dst` are origins, `len` the shared extent.
///
/// Near edges (negative origins) are trimmed on both sides so the copied
/// spans stay aligned; far edges are trimmed against each bound.
fn clip_axis(mut src: i64, mut dst: i64, mut len: i64, src_bound: i64, dst_bound: i64) -> (i64, i64, i64) {
    if src < 0 {
        dst -= src;
        len += src;
        src = 0;
    }
    let over = src + len - src_bound;
    if over > 0 {
        len -= over;
    }
    if dst < 0 {
        src -= dst;
        len += dst;
        dst = 0;
    }
    let over = dst + len - dst_bound;
    if over > 0 {
        len -= over;
    }
    (src, dst, len.max(0))
}

/// Resolve the source region and insertion point against both bitmap bounds.
pub(crate) fn resolve(
    dst_size: (u32, u32),
    at: Option<Point>,
    region: Option<Rect>,
    src_size: (u32, u32),
) -> BlitGeometry {
    let region = region.unwrap_or_else(|| Rect::of_size(src_size.0, src_size.1));
    let at = at.unwrap_or_default();

    let (sx, dx, w) = clip_axis(
        region.x.into(),
        at.x.into(),
        region.width.into(),
        src_size.0.into(),
        dst_size.0.into(),
    );
    let (sy, dy, h) = clip_axis(
        region.y.into(),
        at.y.into(),
        region.height.into(),
        src_size.1.into(),
        dst_size.1.into(),
    );

    // Everything is now within [0, u32::MAX] bounds, but i32 fields cap at i32::MAX.
    let narrow = |v: i64| i32::try_from(v).unwrap_or(i32::MAX);
    BlitGeometry {
        src: Rect::new(narrow(sx), narrow(sy), narrow(w), narrow(h)),
        dst: Rect::new(narrow(dx), narrow(dy), narrow(w), narrow(h)),
    }
}

/// Copy the resolved region row by row, top to bottom.
pub(crate) fn copy_region(dst: &mut PixelViewMut<'_>, src: PixelView<'_>, geometry: BlitGeometry) {
    if geometry.dst.is_empty() {
        return;
    }
    let (s, d) = (geometry.src, geometry.dst);
    let len = d.width as usize;
    for row in 0..d.height as usize {
        let from = src.span(s.x as usize, s.y as usize + row, len);
        dst.span_mut(d.x as usize, d.y as usize + row, len)
            .copy_from_slice(from);
    }
}

/// Reject blits whose formats differ in channel count.
pub(crate) fn check_channels(
    dst: crate::PixelFormat,
    src: crate::PixelFormat,
) -> Result<(), BitmapError> {
    if dst.channels() != src.channels() {
        log::warn!("blit rejected: {src:?} source onto {dst:?} destination");
        return Err(BitmapError::FormatMismatch { dst, src });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_source_clipped_to_small_destination() {
        let g = resolve((4, 4), None, None, (10, 10));
        assert_eq!(g.src, Rect::new(0, 0, 4, 4));
        assert_eq!(g.dst, Rect::new(0, 0, 4, 4));
    }

    #[test]
    fn far_edge_overhang() {
        let g = resolve((10, 10), Some(Point::new(8, 8)), None, (5, 5));
        assert_eq!(g.dst, Rect::new(8, 8, 2, 2));
        assert_eq!(g.src, Rect::new(0, 0, 2, 2));
    }

    #[test]
    fn source_region_is_clamped_to_source_bounds() {
        let g = resolve((100, 100), None, Some(Rect::new(3, 1, 10, 10)), (8, 6));
        assert_eq!(g.src, Rect::new(3, 1, 5, 5));
        assert_eq!(g.dst, Rect::new(0, 0, 5, 5));
    }

    #[test]
    fn negative_insertion_point_shifts_source() {
        let g = resolve((10, 10), Some(Point::new(-2, -3)), None, (5, 5));
        assert_eq!(g.src, Rect::new(2, 3, 3, 2));
        assert_eq!(g.dst, Rect::new(0, 0, 3, 2));
    }

    #[test]
    fn negative_region_origin_shifts_destination() {
        let g = resolve((10, 10), Some(Point::new(1, 1)), Some(Rect::new(-1, 0, 3, 2)), (5, 5));
        assert_eq!(g.src, Rect::new(0, 0, 2, 2));
        assert_eq!(g.dst, Rect::new(2, 1, 2, 2));
    }

    #[test]
    fn disjoint_regions_resolve_to_zero_area() {
        let g = resolve((4, 4), Some(Point::new(10, 0)), None, (3, 3));
        assert!(g.dst.is_empty());
        assert_eq!(g.dst.area(), 0);

        let g = resolve((4, 4), None, Some(Rect::new(7, 7, 2, 2)), (3, 3));
        assert_eq!(g.src.width, 0);
        assert_eq!(g.src.height, 0);
    }

    #[test]
    fn copy_moves_only_the_region() {
        let src: Vec<u8> = (1..=9).collect();
        let mut dst = vec![0u8; 9];
        let g = resolve((3, 3), Some(Point::new(1, 1)), None, (3, 3));
        {
            let sv = PixelView::new(&src, 3, 3, crate::PixelFormat::Luminance).unwrap();
            let mut dv = PixelViewMut::new(&mut dst, 3, 3, crate::PixelFormat::Luminance).unwrap();
            copy_region(&mut dv, sv, g);
        }
        assert_eq!(dst, [0, 0, 0, 0, 1, 2, 0, 4, 5]);
    }
}
