//! Shared codec capability and per-format implementations.
//!
//! Every format, built-in or library-backed, exposes the same two
//! operations. [`ImageFormat::codec`] is the single dispatch point.

use alloc::vec::Vec;

use crate::error::ConvertError;
use crate::image::Image;
use crate::limits::Limits;
use crate::pixel::ImageFormat;

/// Encoder settings shared by all formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Quality 1-100 for lossy formats. Lossless formats ignore it.
    pub quality: Option<u8>,
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ConvertError> {
        match self.quality {
            Some(q) if !(1..=100).contains(&q) => Err(ConvertError::InvalidQuality(q)),
            _ => Ok(()),
        }
    }
}

/// Decode/encode capability of one image format.
pub trait Codec: Sync {
    fn format(&self) -> ImageFormat;

    /// Decode a complete byte stream, validating against `limits` before
    /// allocating pixel memory.
    fn decode(&self, data: &[u8], limits: &Limits) -> Result<Image, ConvertError>;

    /// Encode an image to a complete byte stream.
    fn encode(&self, image: &Image, options: &EncodeOptions) -> Result<Vec<u8>, ConvertError>;
}

/// The built-in QOI codec.
#[derive(Clone, Copy, Debug, Default)]
pub struct Qoi;

/// The built-in BMP codec.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bmp;

fn ignore_quality(format: ImageFormat, options: &EncodeOptions) -> Result<(), ConvertError> {
    options.validate()?;
    if let Some(q) = options.quality {
        log::debug!("{format} is lossless, ignoring quality {q}");
    }
    Ok(())
}

impl Codec for Qoi {
    fn format(&self) -> ImageFormat {
        ImageFormat::Qoi
    }

    fn decode(&self, data: &[u8], limits: &Limits) -> Result<Image, ConvertError> {
        crate::qoi::decode(data, limits)
    }

    fn encode(&self, image: &Image, options: &EncodeOptions) -> Result<Vec<u8>, ConvertError> {
        ignore_quality(self.format(), options)?;
        crate::qoi::encode(image)
    }
}

impl Codec for Bmp {
    fn format(&self) -> ImageFormat {
        ImageFormat::Bmp
    }

    fn decode(&self, data: &[u8], limits: &Limits) -> Result<Image, ConvertError> {
        crate::bmp::decode(data, limits)
    }

    fn encode(&self, image: &Image, options: &EncodeOptions) -> Result<Vec<u8>, ConvertError> {
        ignore_quality(self.format(), options)?;
        crate::bmp::encode(image)
    }
}

impl ImageFormat {
    /// The codec implementing this format.
    pub fn codec(self) -> &'static dyn Codec {
        match self {
            ImageFormat::Qoi => &Qoi,
            ImageFormat::Bmp => &Bmp,
        }
    }
}
