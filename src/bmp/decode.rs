//! BMP decoder for uncompressed 24-bit and 32-bit files.

use super::{BMP_FILE_HEADER_SIZE, BMP_HEADER_SIZE, BMP_INFO_HEADER_SIZE};
use crate::arith::{add_or_overflow, align4, mul_or_overflow};
use crate::error::ConvertError;
use crate::image::{Image, PixelBuffer};
use crate::limits::Limits;
use crate::pixel::PixelLayout;

/// Fields of `BITMAPFILEHEADER` + `BITMAPINFOHEADER` the decoder uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BmpHeader {
    pub width: u32,
    pub height: u32,
    pub top_down: bool,
    pub bit_count: u16,
    pub data_offset: u32,
}

impl BmpHeader {
    pub fn layout(&self) -> PixelLayout {
        if self.bit_count == 32 {
            PixelLayout::Rgba8
        } else {
            PixelLayout::Rgb8
        }
    }
}

fn u16_at(data: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([data[at], data[at + 1]])
}

fn u32_at(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

fn i32_at(data: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

pub(crate) fn parse_header(data: &[u8]) -> Result<BmpHeader, ConvertError> {
    if data.len() >= 2 && &data[..2] != b"BM" {
        return Err(ConvertError::UnrecognizedFormat);
    }
    let header = data
        .get(..BMP_HEADER_SIZE)
        .ok_or(ConvertError::UnexpectedEof)?;

    // File header: magic, file size, 2 reserved u16, pixel data offset.
    let data_offset = u32_at(header, 10);

    // Info header.
    let info = &header[BMP_FILE_HEADER_SIZE..];
    let info_size = u32_at(info, 0);
    let width = i32_at(info, 4);
    let height = i32_at(info, 8);
    let bit_count = u16_at(info, 14);
    let compression = u32_at(info, 16);

    if (info_size as usize) < BMP_INFO_HEADER_SIZE {
        return Err(ConvertError::UnsupportedVariant(alloc::format!(
            "BMP info header of {info_size} bytes (need BITMAPINFOHEADER or later)"
        )));
    }
    if compression != 0 {
        return Err(ConvertError::UnsupportedVariant(alloc::format!(
            "BMP compression {compression} (only uncompressed is supported)"
        )));
    }
    if bit_count != 24 && bit_count != 32 {
        return Err(ConvertError::UnsupportedVariant(alloc::format!(
            "BMP bit depth {bit_count} (only 24 and 32 are supported)"
        )));
    }
    if width <= 0 {
        return Err(ConvertError::InvalidHeader(alloc::format!(
            "BMP width {width} is not positive"
        )));
    }
    // i32::MIN has no positive counterpart.
    if height == 0 || height == i32::MIN {
        return Err(ConvertError::InvalidHeader(alloc::format!(
            "BMP height {height} is invalid"
        )));
    }

    let top_down = height < 0;
    let header = BmpHeader {
        width: width as u32,
        height: height.unsigned_abs(),
        top_down,
        bit_count,
        data_offset,
    };
    log::debug!(
        "bmp header: {}x{}, {} bpp, {}",
        header.width,
        header.height,
        bit_count,
        if top_down { "top-down" } else { "bottom-up" }
    );
    Ok(header)
}

/// Read padded BGR(A) rows starting at the declared offset into an RGB(A) image.
pub(crate) fn decode_pixels(
    data: &[u8],
    header: &BmpHeader,
    limits: &Limits,
) -> Result<Image, ConvertError> {
    let layout = header.layout();
    let bmp_channels = usize::from(header.bit_count / 8);
    let height = header.height as usize;

    let raw_row_bytes = mul_or_overflow(header.width as usize, bmp_channels, "BMP row size")?;
    let bmp_row_bytes = align4(raw_row_bytes, "BMP row size")?;
    let data_bytes = mul_or_overflow(bmp_row_bytes, height, "BMP pixel data size")?;
    let data_end = add_or_overflow(header.data_offset as usize, data_bytes, "BMP file size")?;
    // Short input is rejected before the pixel buffer is allocated.
    let pixel_data = data
        .get(header.data_offset as usize..data_end)
        .ok_or(ConvertError::UnexpectedEof)?;

    let mut buf = PixelBuffer::new(header.width, header.height, layout, limits)?;
    for (y, row) in pixel_data.chunks_exact(bmp_row_bytes).enumerate() {
        let dst_y = if header.top_down { y } else { height - 1 - y };
        let dst = buf.row_mut(dst_y);
        for (out, src) in dst
            .chunks_exact_mut(bmp_channels)
            .zip(row[..raw_row_bytes].chunks_exact(bmp_channels))
        {
            out[0] = src[2];
            out[1] = src[1];
            out[2] = src[0];
            if bmp_channels == 4 {
                out[3] = src[3];
            }
        }
    }

    Ok(buf.finish())
}
