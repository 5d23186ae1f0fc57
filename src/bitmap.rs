use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use enough::Unstoppable;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::blit::{self, Point, Rect};
use crate::codec::{self, DecodeOutput, DecodeRequest};
use crate::convert::{self, average_luma};
use crate::error::BitmapError;
use crate::pixel::PixelFormat;
use crate::view::{PixelView, PixelViewMut};

/// An owned 8-bit-per-channel raster image.
///
/// The buffer is `width * height * format.channels()` bytes, row-major, top
/// row first, no row padding. An empty bitmap has [`PixelFormat::Null`], zero
/// dimensions and no buffer. Cloning duplicates the buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bitmap {
    format: PixelFormat,
    width: u32,
    height: u32,
    data: Option<Vec<u8>>,
}

impl Bitmap {
    /// An empty bitmap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a raw buffer.
    ///
    /// Fails with [`BitmapError::BufferSizeMismatch`] unless `data` is exactly
    /// the packed size. A `Null` format must come with 0x0 and no bytes.
    pub fn from_raw(format: PixelFormat, width: u32, height: u32, data: Vec<u8>) -> Result<Self, BitmapError> {
        let expected = format
            .buffer_len(width, height)
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        if data.len() != expected {
            return Err(BitmapError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        if format == PixelFormat::Null {
            if width != 0 || height != 0 {
                return Err(BitmapError::UnsupportedFormat(format));
            }
            return Ok(Self::new());
        }
        Ok(Self {
            format,
            width,
            height,
            data: Some(data),
        })
    }

    /// A bitmap filled with one color; see [`Bitmap::generate`].
    pub fn filled(format: PixelFormat, width: u32, height: u32, rgba: u32) -> Result<Self, BitmapError> {
        let mut bitmap = Self::new();
        bitmap.generate(format, width, height, rgba)?;
        Ok(bitmap)
    }

    /// Decode a PNG held in memory.
    pub fn from_png_bytes(data: &[u8]) -> Result<Self, BitmapError> {
        let mut bitmap = Self::new();
        bitmap.read_from(data)?;
        Ok(bitmap)
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The pixel buffer, or `None` for an empty bitmap.
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }

    /// (x, y, channel) view of the pixels. Empty bitmaps give an empty view.
    pub fn view(&self) -> PixelView<'_> {
        let data = self.data.as_deref().unwrap_or_default();
        PixelView::packed(data, self.width, self.height, self.format)
    }

    pub fn view_mut(&mut self) -> PixelViewMut<'_> {
        let (width, height, format) = (self.width, self.height, self.format);
        let data = self.data.as_deref_mut().unwrap_or_default();
        PixelViewMut::packed(data, width, height, format)
    }

    /// Split into format, dimensions and buffer.
    pub fn into_raw(self) -> (PixelFormat, u32, u32, Option<Vec<u8>>) {
        (self.format, self.width, self.height, self.data)
    }

    /// Drop the buffer and reset to the empty state.
    pub fn release(&mut self) {
        *self = Self::new();
    }

    // Every buffer change funnels through here, so the length invariant holds
    // for `view`/`view_mut`.
    fn install(&mut self, format: PixelFormat, width: u32, height: u32, data: Vec<u8>) {
        *self = Self {
            format,
            width,
            height,
            data: Some(data),
        };
    }

    fn install_decoded(&mut self, decoded: DecodeOutput) {
        let (format, width, height) = (decoded.format, decoded.width, decoded.height);
        self.install(format, width, height, decoded.into_pixels());
    }

    /// Load a PNG file, replacing the current contents.
    ///
    /// On any failure the bitmap is left exactly as it was.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), BitmapError> {
        let path = path.as_ref();
        let file = File::open(path).inspect_err(|e| {
            log::debug!("cannot open {} for reading: {e}", path.display());
        })?;
        self.read_from(BufReader::new(file))
    }

    /// Decode a PNG stream, replacing the current contents on success.
    pub fn read_from<R: Read>(&mut self, reader: R) -> Result<(), BitmapError> {
        let decoded = DecodeRequest::new(reader).decode(Unstoppable)?;
        self.install_decoded(decoded);
        Ok(())
    }

    /// Save as a PNG file.
    ///
    /// An empty bitmap is rejected before the file is opened, so an existing
    /// file at `path` is left intact.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BitmapError> {
        if self.data.is_none() {
            return Err(BitmapError::UnsupportedFormat(self.format));
        }
        let path = path.as_ref();
        let file = File::create(path).inspect_err(|e| {
            log::debug!("cannot open {} for writing: {e}", path.display());
        })?;
        let mut out = BufWriter::new(file);
        self.write_to(&mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Encode as a PNG stream.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), BitmapError> {
        let data = self
            .data
            .as_deref()
            .ok_or(BitmapError::UnsupportedFormat(self.format))?;
        codec::encode_png(writer, data, self.width, self.height, self.format, Unstoppable)
    }

    pub fn to_png_bytes(&self) -> Result<Vec<u8>, BitmapError> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Convert the buffer to `target` in place.
    ///
    /// A no-op when `target` equals the current format or is `Null`.
    /// Converting an empty bitmap fails with
    /// [`BitmapError::UnsupportedConversion`] and changes nothing.
    pub fn convert_format(&mut self, target: PixelFormat) -> Result<(), BitmapError> {
        if target == self.format || target == PixelFormat::Null {
            return Ok(());
        }
        let source = self.data.as_deref().unwrap_or_default();
        let converted = convert::convert(self.format, target, self.width, self.height, source)?.into_owned();
        let (width, height) = (self.width, self.height);
        self.install(target, width, height, converted);
        Ok(())
    }

    /// Copy a region of `source` into this bitmap.
    ///
    /// `region` selects the source rectangle (whole source when `None`); `at`
    /// is the destination origin ((0, 0) when `None`). Both rectangles are
    /// clipped against their bitmaps and kept the same size. Returns the
    /// destination rectangle that was written, and also stores it into
    /// `region` when one was passed. A zero-area result copies nothing and
    /// still succeeds.
    ///
    /// Fails with [`BitmapError::FormatMismatch`], leaving this bitmap
    /// untouched, when the channel counts differ.
    pub fn blit(&mut self, at: Option<Point>, region: Option<&mut Rect>, source: &Bitmap) -> Result<Rect, BitmapError> {
        blit::check_channels(self.format, source.format)?;
        let geometry = blit::resolve(
            (self.width, self.height),
            at,
            region.as_deref().copied(),
            (source.width, source.height),
        );
        blit::copy_region(&mut self.view_mut(), source.view(), geometry);
        if let Some(region) = region {
            *region = geometry.dst;
        }
        Ok(geometry.dst)
    }

    /// Replace the contents with a `width` x `height` bitmap of one color.
    ///
    /// `rgba` packs R, G, B, A from the most to the least significant byte.
    /// Formats with a single color channel get the average `(r + g + b) / 3`.
    pub fn generate(&mut self, format: PixelFormat, width: u32, height: u32, rgba: u32) -> Result<(), BitmapError> {
        if format == PixelFormat::Null {
            return Err(BitmapError::UnsupportedFormat(format));
        }
        let len = format
            .buffer_len(width, height)
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;

        let [r, g, b, a] = rgba.to_be_bytes();
        let mut pixel = [0u8; 4];
        let color = format.color_channels();
        if color < 3 {
            pixel[0] = average_luma(r, g, b);
        } else {
            pixel[..3].copy_from_slice(&[r, g, b]);
        }
        if format.has_alpha() {
            pixel[color] = a;
        }

        let mut data = vec![0u8; len];
        let mut view = PixelViewMut::new(&mut data, width, height, format)
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        for px in view.pixels_mut() {
            px.copy_from_slice(&pixel[..format.channels()]);
        }
        self.install(format, width, height, data);
        Ok(())
    }

    /// Photographic negative: every color channel becomes `255 - value`.
    ///
    /// Alpha is untouched. Only RGB and RGBA bitmaps are supported.
    pub fn black_to_white(&mut self) -> Result<(), BitmapError> {
        if self.format.channels() < 3 {
            return Err(BitmapError::UnsupportedOperation {
                operation: "black_to_white",
                format: self.format,
            });
        }
        for px in self.view_mut().pixels_mut() {
            for c in &mut px[..3] {
                *c = u8::MAX - *c;
            }
        }
        Ok(())
    }

    /// Reinterpret the pixels as a typed slice.
    ///
    /// Returns [`BitmapError::UnsupportedFormat`] if the format doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::BitmapPixel>(&self) -> Result<&[P], BitmapError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if self.format != P::format() {
            return Err(BitmapError::UnsupportedFormat(self.format));
        }
        Ok(self.data.as_deref().unwrap_or_default().as_pixels())
    }

    /// Zero-copy [`imgref::ImgRef`] over typed pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::BitmapPixel>(&self) -> Result<imgref::ImgRef<'_, P>, BitmapError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }
}
