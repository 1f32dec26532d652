//! BMP decoder and encoder (internal).
//!
//! Decodes uncompressed 24-bit (RGB) and 32-bit (RGBA) files in either row
//! order. Encodes 24-bit bottom-up files only.

mod decode;
mod encode;

pub(crate) use decode::BmpHeader;

use crate::error::ConvertError;
use crate::image::Image;
use crate::limits::Limits;
use alloc::vec::Vec;

pub(crate) const BMP_FILE_HEADER_SIZE: usize = 14;
pub(crate) const BMP_INFO_HEADER_SIZE: usize = 40;
pub(crate) const BMP_HEADER_SIZE: usize = BMP_FILE_HEADER_SIZE + BMP_INFO_HEADER_SIZE;

/// Parse just the BMP headers.
pub(crate) fn parse_header(data: &[u8]) -> Result<BmpHeader, ConvertError> {
    decode::parse_header(data)
}

/// Decode BMP data (output in RGB/RGBA byte order, top row first).
pub(crate) fn decode(data: &[u8], limits: &Limits) -> Result<Image, ConvertError> {
    let header = decode::parse_header(data)?;
    limits.check_pixels(header.width, header.height)?;
    decode::decode_pixels(data, &header, limits)
}

/// Encode to a 24-bit BMP.
pub(crate) fn encode(image: &Image) -> Result<Vec<u8>, ConvertError> {
    encode::encode_bmp(image)
}
