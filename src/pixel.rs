use core::fmt;
use core::str::FromStr;

use crate::error::ConvertError;

/// Built-in image formats.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// QOI ("Quite OK Image"), lossless RGB/RGBA.
    Qoi,
    /// BMP (Windows bitmap), uncompressed 24/32-bit.
    Bmp,
}

impl ImageFormat {
    /// All built-in formats, in detection order.
    pub const ALL: [ImageFormat; 2] = [ImageFormat::Qoi, ImageFormat::Bmp];

    /// Detect the format from leading magic bytes.
    pub fn detect(data: &[u8]) -> Option<ImageFormat> {
        if data.starts_with(&crate::qoi::QOI_MAGIC.to_be_bytes()) {
            Some(ImageFormat::Qoi)
        } else if data.starts_with(b"BM") {
            Some(ImageFormat::Bmp)
        } else {
            None
        }
    }

    /// Lowercase short name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            ImageFormat::Qoi => "qoi",
            ImageFormat::Bmp => "bmp",
        }
    }

    /// Whether the encoder preserves an alpha channel.
    ///
    /// BMP output is always 24-bit.
    pub fn supports_alpha(self) -> bool {
        match self {
            ImageFormat::Qoi => true,
            ImageFormat::Bmp => false,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ImageFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageFormat::ALL
            .into_iter()
            .find(|format| s.eq_ignore_ascii_case(format.name()))
            .ok_or_else(|| ConvertError::UnsupportedVariant(alloc::format!("unknown format {s:?}")))
    }
}

/// Pixel memory layout. Always 8 bits per channel, interleaved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// 3 channels, 8-bit RGB.
    Rgb8,
    /// 4 channels, 8-bit RGBA.
    Rgba8,
}

impl PixelLayout {
    /// Layout for a channel count, if it is 3 or 4.
    pub fn from_channels(channels: usize) -> Option<PixelLayout> {
        match channels {
            3 => Some(Self::Rgb8),
            4 => Some(Self::Rgba8),
            _ => None,
        }
    }

    /// Number of channels (also bytes per pixel).
    pub fn channels(&self) -> usize {
        match self {
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, Self::Rgba8)
    }
}

/// Typed pixels that can view an [`crate::Image`] buffer.
#[cfg(feature = "rgb")]
pub trait DecodePixel: Copy + 'static {
    fn layout() -> PixelLayout;
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGB8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgb8
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGBA8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgba8
    }
}
