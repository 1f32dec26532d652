//! QOI ("Quite OK Image") decoder and encoder.
//!
//! Layout: a 14-byte big-endian header (`qoif`, width, height, channels,
//! colorspace), a stream of variable-length ops, then the 8-byte end marker
//! `00 00 00 00 00 00 00 01`.

mod decode;
mod encode;

pub use decode::QoiHeader;

use crate::error::ConvertError;
use crate::image::Image;
use crate::limits::Limits;
use alloc::vec::Vec;

pub(crate) const QOI_MAGIC: u32 = u32::from_be_bytes(*b"qoif");
pub(crate) const QOI_HEADER_SIZE: usize = 14;
pub(crate) const QOI_END_MARKER: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];

pub(crate) const QOI_OP_INDEX: u8 = 0x00;
pub(crate) const QOI_OP_DIFF: u8 = 0x40;
pub(crate) const QOI_OP_LUMA: u8 = 0x80;
pub(crate) const QOI_OP_RUN: u8 = 0xc0;
pub(crate) const QOI_OP_RGB: u8 = 0xfe;
pub(crate) const QOI_OP_RGBA: u8 = 0xff;
pub(crate) const QOI_MASK_2: u8 = 0xc0;

/// Longest run a single RUN op can carry (6-bit bias-1 field, 0x3e/0x3f reserved).
pub(crate) const QOI_MAX_RUN: u8 = 62;

/// Colorspace byte written by the encoder (sRGB).
pub(crate) const QOI_SRGB: u8 = 1;

/// Slot in the 64-entry pixel-history cache.
#[inline]
pub(crate) fn hash(px: [u8; 4]) -> usize {
    let [r, g, b, a] = px.map(usize::from);
    (r * 3 + g * 5 + b * 7 + a * 11) % 64
}

/// Parse just the QOI header.
pub(crate) fn parse_header(data: &[u8]) -> Result<QoiHeader, ConvertError> {
    decode::parse_header(data)
}

/// Decode a complete QOI stream.
pub(crate) fn decode(data: &[u8], limits: &Limits) -> Result<Image, ConvertError> {
    let header = decode::parse_header(data)?;
    limits.check_pixels(header.width, header.height)?;
    decode::decode_pixels(data, &header, limits)
}

/// Encode an image as QOI.
pub(crate) fn encode(image: &Image) -> Result<Vec<u8>, ConvertError> {
    encode::encode_qoi(image)
}
