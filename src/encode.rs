use alloc::vec::Vec;

use crate::codec::EncodeOptions;
use crate::error::ConvertError;
use crate::image::Image;
use crate::pixel::ImageFormat;

/// Builder for an encode call.
#[derive(Clone, Copy, Debug)]
pub struct EncodeRequest {
    format: ImageFormat,
    options: EncodeOptions,
}

impl EncodeRequest {
    pub fn new(format: ImageFormat) -> Self {
        Self {
            format,
            options: EncodeOptions::default(),
        }
    }

    /// Encode as QOI.
    pub fn qoi() -> Self {
        Self::new(ImageFormat::Qoi)
    }

    /// Encode as 24-bit BMP.
    pub fn bmp() -> Self {
        Self::new(ImageFormat::Bmp)
    }

    /// Quality 1-100; only lossy formats use it.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.options = self.options.with_quality(quality);
        self
    }

    pub fn with_options(mut self, options: EncodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn encode(&self, image: &Image) -> Result<Vec<u8>, ConvertError> {
        self.format.codec().encode(image, &self.options)
    }
}
