/// Resource ceilings for decode operations.
///
/// Both fields use `0` to mean "unlimited". The defaults are 100 million
/// pixels and 256 MiB of input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Maximum pixel count (width * height) a decoder may materialize.
    pub max_pixels: u64,
    /// Maximum number of input bytes read from a source before decoding.
    pub max_bytes: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_pixels: Self::DEFAULT_MAX_PIXELS,
            max_bytes: Self::DEFAULT_MAX_BYTES,
        }
    }
}

impl Limits {
    pub const DEFAULT_MAX_PIXELS: u64 = 100_000_000;
    pub const DEFAULT_MAX_BYTES: u64 = 268_435_456;

    /// No ceilings at all.
    pub const fn unlimited() -> Self {
        Self {
            max_pixels: 0,
            max_bytes: 0,
        }
    }

    pub const fn with_max_pixels(mut self, max_pixels: u64) -> Self {
        self.max_pixels = max_pixels;
        self
    }

    pub const fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Check a declared width/height against the pixel ceiling.
    pub(crate) fn check_pixels(&self, width: u32, height: u32) -> Result<(), crate::ConvertError> {
        if !crate::image::check_pixel_ceiling(width, height, self.max_pixels) {
            return Err(crate::ConvertError::LimitExceeded(alloc::format!(
                "{width}x{height} exceeds pixel limit {}",
                self.max_pixels
            )));
        }
        Ok(())
    }

    /// Check an input length against the byte ceiling.
    pub(crate) fn check_bytes(&self, len: u64) -> Result<(), crate::ConvertError> {
        if self.max_bytes != 0 && len > self.max_bytes {
            return Err(crate::ConvertError::LimitExceeded(alloc::format!(
                "input of {len} bytes exceeds byte limit {}",
                self.max_bytes
            )));
        }
        Ok(())
    }
}
