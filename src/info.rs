use crate::error::ConvertError;
use crate::pixel::{ImageFormat, PixelLayout};

/// Image metadata read from the header alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    /// Layout a full decode will produce.
    pub layout: PixelLayout,
}

impl ImageInfo {
    /// Probe header without decoding pixels or allocating.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ConvertError> {
        let format = ImageFormat::detect(data).ok_or(ConvertError::UnrecognizedFormat)?;
        Self::from_bytes_as(data, format)
    }

    /// Probe header of a known format.
    pub fn from_bytes_as(data: &[u8], format: ImageFormat) -> Result<Self, ConvertError> {
        match format {
            ImageFormat::Qoi => {
                let header = crate::qoi::parse_header(data)?;
                Ok(ImageInfo {
                    width: header.width,
                    height: header.height,
                    format,
                    layout: header.layout(),
                })
            }
            ImageFormat::Bmp => {
                let header = crate::bmp::parse_header(data)?;
                Ok(ImageInfo {
                    width: header.width,
                    height: header.height,
                    format,
                    layout: header.layout(),
                })
            }
        }
    }
}
