//! Borrowed (x, y, channel) views over a tightly packed row-major buffer.
//!
//! Row 0 is the top row and rows have no padding, so the byte for
//! `(x, y, c)` lives at `(y * width + x) * channels + c`. All per-pixel
//! arithmetic in the crate goes through these views.

use crate::pixel::PixelFormat;

/// Read-only pixel view.
#[derive(Clone, Copy, Debug)]
pub struct PixelView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    channels: usize,
}

/// Mutable pixel view.
#[derive(Debug)]
pub struct PixelViewMut<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
    channels: usize,
}

impl<'a> PixelView<'a> {
    /// View `data` as `width` x `height` pixels of `format`.
    ///
    /// Returns `None` if `data.len()` is not exactly the packed buffer size.
    pub fn new(data: &'a [u8], width: u32, height: u32, format: PixelFormat) -> Option<Self> {
        let expected = format.buffer_len(width, height)?;
        (expected == data.len()).then_some(Self {
            data,
            width: width as usize,
            height: height as usize,
            channels: format.channels(),
        })
    }

    /// Wrap a buffer whose length is already known to match.
    pub(crate) fn packed(data: &'a [u8], width: u32, height: u32, format: PixelFormat) -> Self {
        debug_assert_eq!(format.buffer_len(width, height), Some(data.len()));
        Self {
            data,
            width: width as usize,
            height: height as usize,
            channels: format.channels(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width * self.channels
    }

    /// All channels of the pixel at (x, y).
    pub fn pixel(&self, x: usize, y: usize) -> &'a [u8] {
        let start = (y * self.width + x) * self.channels;
        &self.data[start..start + self.channels]
    }

    /// One channel of the pixel at (x, y).
    pub fn get(&self, x: usize, y: usize, channel: usize) -> u8 {
        self.pixel(x, y)[channel]
    }

    /// `len` pixels of row `y`, starting at column `x`.
    pub fn span(&self, x: usize, y: usize, len: usize) -> &'a [u8] {
        let start = (y * self.width + x) * self.channels;
        &self.data[start..start + len * self.channels]
    }

    pub fn row(&self, y: usize) -> &'a [u8] {
        self.span(0, y, self.width)
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = &'a [u8]> + 'a {
        // `max(1)` keeps chunks_exact valid for zero-channel views, which are always empty.
        self.data.chunks_exact(self.channels.max(1))
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }
}

impl<'a> PixelViewMut<'a> {
    /// Mutable counterpart of [`PixelView::new`].
    pub fn new(data: &'a mut [u8], width: u32, height: u32, format: PixelFormat) -> Option<Self> {
        let expected = format.buffer_len(width, height)?;
        if expected != data.len() {
            return None;
        }
        Some(Self {
            data,
            width: width as usize,
            height: height as usize,
            channels: format.channels(),
        })
    }

    pub(crate) fn packed(data: &'a mut [u8], width: u32, height: u32, format: PixelFormat) -> Self {
        debug_assert_eq!(format.buffer_len(width, height), Some(data.len()));
        Self {
            data,
            width: width as usize,
            height: height as usize,
            channels: format.channels(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn as_view(&self) -> PixelView<'_> {
        PixelView {
            data: &*self.data,
            width: self.width,
            height: self.height,
            channels: self.channels,
        }
    }

    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [u8] {
        let start = (y * self.width + x) * self.channels;
        &mut self.data[start..start + self.channels]
    }

    pub fn set(&mut self, x: usize, y: usize, channel: usize, value: u8) {
        self.pixel_mut(x, y)[channel] = value;
    }

    pub fn span_mut(&mut self, x: usize, y: usize, len: usize) -> &mut [u8] {
        let start = (y * self.width + x) * self.channels;
        &mut self.data[start..start + len * self.channels]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let width = self.width;
        self.span_mut(0, y, width)
    }

    /// Mutable pixels in row-major order.
    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut [u8]> + '_ {
        self.data.chunks_exact_mut(self.channels.max(1))
    }
}
