//! # zenconvert
//!
//! Self-contained QOI and BMP codecs for converting raster images between
//! on-disk encodings, built around an overflow-checked pixel buffer model.
//!
//! ## Safety Model
//!
//! Every decoder parses untrusted bytes. Before any pixel memory is touched,
//! declared dimensions are validated, checked against the caller's
//! [`Limits`], and the buffer size is computed with checked arithmetic
//! ([`checked_multiply`], [`checked_add`]). All of this goes through one choke
//! point, [`allocate`] (via [`PixelBuffer`]). A failed decode never returns a
//! partial [`Image`].
//!
//! ## Supported Formats
//!
//! ### QOI
//! - Decode and encode of 3-channel (RGB) and 4-channel (RGBA) images, byte-exact
//!   with the reference format.
//!
//! ### BMP
//! - Decode of uncompressed 24-bit (RGB) and 32-bit (RGBA) files, top-down or bottom-up
//! - Encode of 24-bit bottom-up files (alpha is dropped, with a `log` warning)
//!
//! ## Non-Goals
//!
//! - Streaming/incremental decode
//! - Bit depths other than 8 bits per channel, palettes, RLE and bitfield BMPs
//! - Animation and color management
//!
//! ## Usage
//!
//! ```no_run
//! use zenconvert::{DecodeRequest, EncodeRequest, ImageInfo, Limits};
//!
//! let data: &[u8] = &[]; // your QOI/BMP bytes
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! println!("{}x{} {:?}", info.width, info.height, info.format);
//!
//! // Decode with explicit ceilings
//! let limits = Limits::default().with_max_pixels(50_000_000);
//! let image = DecodeRequest::new(data).with_limits(&limits).decode()?;
//!
//! // Re-encode as QOI
//! let qoi = EncodeRequest::qoi().encode(&image)?;
//! # Ok::<(), zenconvert::ConvertError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod arith;
mod codec;
mod decode;
mod encode;
mod error;
mod image;
mod info;
mod limits;
mod pixel;

mod bmp;
mod qoi;

#[cfg(feature = "std")]
pub mod io;

use alloc::vec::Vec;

// Re-exports
pub use arith::{checked_add, checked_multiply};
pub use codec::{Bmp, Codec, EncodeOptions, Qoi};
pub use decode::DecodeRequest;
pub use encode::EncodeRequest;
pub use error::{ConvertError, ErrorKind};
pub use image::{Image, PixelBuffer, allocate, check_pixel_ceiling, validate_dimensions};
pub use info::ImageInfo;
pub use limits::Limits;
#[cfg(feature = "rgb")]
pub use pixel::DecodePixel;
pub use pixel::{ImageFormat, PixelLayout};
pub use qoi::QoiHeader;

/// Decode a QOI byte stream.
pub fn decode_qoi(data: &[u8], limits: &Limits) -> Result<Image, ConvertError> {
    Qoi.decode(data, limits)
}

/// Encode an image as QOI.
pub fn encode_qoi(image: &Image) -> Result<Vec<u8>, ConvertError> {
    Qoi.encode(image, &EncodeOptions::default())
}

/// Decode a BMP byte stream.
pub fn decode_bmp(data: &[u8], limits: &Limits) -> Result<Image, ConvertError> {
    Bmp.decode(data, limits)
}

/// Encode an image as a 24-bit BMP.
pub fn encode_bmp(image: &Image) -> Result<Vec<u8>, ConvertError> {
    Bmp.encode(image, &EncodeOptions::default())
}

/// Decode any supported format, detected from magic bytes.
pub fn decode(data: &[u8], limits: &Limits) -> Result<Image, ConvertError> {
    DecodeRequest::new(data).with_limits(limits).decode()
}

/// Decode `data` (format detected from magic bytes) and re-encode it as `to`.
pub fn convert(
    data: &[u8],
    to: ImageFormat,
    limits: &Limits,
    options: &EncodeOptions,
) -> Result<Vec<u8>, ConvertError> {
    let image = decode(data, limits)?;
    EncodeRequest::new(to).with_options(*options).encode(&image)
}
