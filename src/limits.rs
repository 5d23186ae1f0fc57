use crate::BitmapError;

/// Resource limits applied to a PNG header before the pixel buffer is allocated.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size of the decoded pixel buffer, in bytes.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Limits that only cap the decoded buffer size.
    pub fn memory(max_bytes: u64) -> Self {
        Self {
            max_memory_bytes: Some(max_bytes),
            ..Self::default()
        }
    }

    pub fn with_max_dimensions(mut self, width: u64, height: u64) -> Self {
        self.max_width = Some(width);
        self.max_height = Some(height);
        self
    }

    pub fn with_max_pixels(mut self, pixels: u64) -> Self {
        self.max_pixels = Some(pixels);
        self
    }

    /// Check a decoded image of `width` x `height` with `buffer_len` output bytes.
    pub(crate) fn check(&self, width: u32, height: u32, buffer_len: usize) -> Result<(), BitmapError> {
        let exceeded = |what: &str, value: u64, limit: u64| -> Result<(), BitmapError> {
            Err(BitmapError::LimitExceeded(format!(
                "{what} {value} exceeds limit {limit}"
            )))
        };
        if let Some(max_w) = self.max_width.filter(|&m| u64::from(width) > m) {
            return exceeded("width", width.into(), max_w);
        }
        if let Some(max_h) = self.max_height.filter(|&m| u64::from(height) > m) {
            return exceeded("height", height.into(), max_h);
        }
        let pixels = u64::from(width) * u64::from(height);
        if let Some(max_px) = self.max_pixels.filter(|&m| pixels > m) {
            return exceeded("pixel count", pixels, max_px);
        }
        if let Some(max_mem) = self.max_memory_bytes.filter(|&m| buffer_len as u64 > m) {
            return exceeded("buffer bytes", buffer_len as u64, max_mem);
        }
        Ok(())
    }
}
