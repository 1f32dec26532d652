//! The pixel buffer model shared by every codec.
//!
//! Decoders never write into an [`Image`] directly. They obtain a
//! [`PixelBuffer`] through [`PixelBuffer::new`] (which routes through
//! [`allocate`]), fill it, and only then turn it into an `Image`. A decoder
//! that bails out early simply drops the buffer.

use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::arith::{checked_multiply, mul_or_overflow};
use crate::error::ConvertError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;

/// Whether `width`/`height`/`channels` describe a representable image.
///
/// Width and height must be positive and fit in an `i32`; channels must be 3 or 4.
pub fn validate_dimensions(width: u32, height: u32, channels: usize) -> bool {
    width > 0
        && height > 0
        && width <= i32::MAX as u32
        && height <= i32::MAX as u32
        && matches!(channels, 3 | 4)
}

/// Whether `width * height` is computable and within `ceiling` (`0` = unlimited).
pub fn check_pixel_ceiling(width: u32, height: u32, ceiling: u64) -> bool {
    match checked_multiply(width as usize, height as usize) {
        Some(count) => ceiling == 0 || count as u64 <= ceiling,
        None => false,
    }
}

/// Allocate a zeroed buffer of exactly `row_bytes * height` bytes.
///
/// Fails with [`ConvertError::InvalidDimensions`], [`ConvertError::LimitExceeded`],
/// [`ConvertError::Overflow`] or [`ConvertError::AllocationFailed`].
pub fn allocate(
    width: u32,
    height: u32,
    layout: PixelLayout,
    row_bytes: usize,
    max_pixels: u64,
) -> Result<Vec<u8>, ConvertError> {
    if !validate_dimensions(width, height, layout.channels()) || row_bytes == 0 {
        return Err(ConvertError::InvalidDimensions {
            width,
            height,
            channels: layout.channels(),
        });
    }
    let pixel_count = mul_or_overflow(width as usize, height as usize, "pixel count")?;
    if max_pixels != 0 && pixel_count as u64 > max_pixels {
        return Err(ConvertError::LimitExceeded(alloc::format!(
            "{width}x{height} exceeds pixel limit {max_pixels}"
        )));
    }
    let total = mul_or_overflow(row_bytes, height as usize, "pixel buffer size")?;

    let mut buf = Vec::new();
    buf.try_reserve_exact(total)
        .map_err(|_| ConvertError::AllocationFailed(total))?;
    buf.resize(total, 0);
    Ok(buf)
}

/// A decoded (or caller-built) image: tightly packed 8-bit RGB or RGBA rows,
/// top to bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    layout: PixelLayout,
}

impl Image {
    /// Wrap an existing buffer, checking that it holds exactly
    /// `width * height * channels` bytes.
    pub fn new(
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Result<Self, ConvertError> {
        if !validate_dimensions(width, height, layout.channels()) {
            return Err(ConvertError::InvalidDimensions {
                width,
                height,
                channels: layout.channels(),
            });
        }
        let expected = byte_len(width, height, layout)?;
        if pixels.len() != expected {
            return Err(ConvertError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
            layout,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Bytes per row (no padding).
    pub fn row_bytes(&self) -> usize {
        // Cannot overflow: `new` checked `width * height * channels` fits usize.
        self.width as usize * self.layout.channels()
    }

    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Row `y`, or `None` past the bottom.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.row_bytes();
        let start = y as usize * stride;
        self.pixels.get(start..start + stride)
    }

    /// Copy of this image with the alpha channel removed.
    pub fn to_rgb(&self) -> Image {
        match self.layout {
            PixelLayout::Rgb8 => self.clone(),
            PixelLayout::Rgba8 => {
                let mut pixels = Vec::with_capacity(self.pixels.len() / 4 * 3);
                for px in self.pixels.chunks_exact(4) {
                    pixels.extend_from_slice(&px[..3]);
                }
                Image {
                    pixels,
                    width: self.width,
                    height: self.height,
                    layout: PixelLayout::Rgb8,
                }
            }
        }
    }

    /// Reinterpret pixel data as typed pixel slice.
    ///
    /// Returns [`ConvertError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::DecodePixel>(&self) -> Result<&[P], ConvertError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if self.layout != P::layout() {
            return Err(ConvertError::LayoutMismatch {
                expected: P::layout(),
                actual: self.layout,
            });
        }
        Ok(self.pixels().as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::DecodePixel>(&self) -> Result<imgref::ImgRef<'_, P>, ConvertError>
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

    /// Convert to an [`imgref::ImgVec`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::DecodePixel>(&self) -> Result<imgref::ImgVec<P>, ConvertError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgVec::new(
            pixels.to_vec(),
            self.width as usize,
            self.height as usize,
        ))
    }
}

/// `width * height * channels`, overflow-checked.
pub(crate) fn byte_len(width: u32, height: u32, layout: PixelLayout) -> Result<usize, ConvertError> {
    let count = mul_or_overflow(width as usize, height as usize, "pixel count")?;
    mul_or_overflow(count, layout.channels(), "pixel buffer size")
}

/// Write-side builder for an [`Image`]: owns a fully allocated, zeroed
/// buffer until [`PixelBuffer::finish`] hands it over.
#[derive(Debug)]
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    layout: PixelLayout,
}

impl PixelBuffer {
    /// Validate and allocate the buffer for a `width x height` image.
    pub fn new(
        width: u32,
        height: u32,
        layout: PixelLayout,
        limits: &Limits,
    ) -> Result<Self, ConvertError> {
        if !validate_dimensions(width, height, layout.channels()) {
            return Err(ConvertError::InvalidDimensions {
                width,
                height,
                channels: layout.channels(),
            });
        }
        let row_bytes = mul_or_overflow(width as usize, layout.channels(), "row size")?;
        let pixels = allocate(width, height, layout, row_bytes, limits.max_pixels)?;
        Ok(Self {
            pixels,
            width,
            height,
            layout,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Bytes per row (no padding).
    pub fn row_bytes(&self) -> usize {
        // Cannot overflow: `new` computed this product with checks and
        // allocated `row_bytes * height` bytes.
        self.width as usize * self.layout.channels()
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Mutable row `y`. Panics if `y >= height`.
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let stride = self.row_bytes();
        &mut self.pixels[y * stride..(y + 1) * stride]
    }

    pub fn finish(self) -> Image {
        Image {
            pixels: self.pixels,
            width: self.width,
            height: self.height,
            layout: self.layout,
        }
    }
}
