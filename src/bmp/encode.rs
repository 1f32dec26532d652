//! BMP encoder: always uncompressed, 24-bit, bottom-up.

use alloc::vec::Vec;

use super::{BMP_FILE_HEADER_SIZE, BMP_HEADER_SIZE, BMP_INFO_HEADER_SIZE};
use crate::arith::{align4, mul_or_overflow};
use crate::error::ConvertError;
use crate::image::Image;

/// Encode an image to a 24-bit BMP. Alpha, if present, is dropped.
pub(crate) fn encode_bmp(image: &Image) -> Result<Vec<u8>, ConvertError> {
    let w = image.width() as usize;
    let h = image.height() as usize;
    let channels = image.channels();

    if image.layout().has_alpha() {
        log::warn!(
            "BMP output is 24-bit: dropping alpha channel of {}x{} RGBA image",
            image.width(),
            image.height()
        );
    }

    let raw_row_bytes = mul_or_overflow(w, 3, "BMP row size")?;
    let row_stride = align4(raw_row_bytes, "BMP row size")?;
    let pixel_data_size = mul_or_overflow(row_stride, h, "BMP image size")?;
    let file_size = u32::try_from(pixel_data_size)
        .ok()
        .and_then(|size| size.checked_add(BMP_HEADER_SIZE as u32))
        .ok_or(ConvertError::Overflow("BMP file size exceeds 4 GiB"))?;

    let mut out = Vec::new();
    out.try_reserve_exact(file_size as usize)
        .map_err(|_| ConvertError::AllocationFailed(file_size as usize))?;
    write_bmp_header(
        &mut out,
        file_size,
        pixel_data_size as u32,
        image.width(),
        image.height(),
    );

    let pad_bytes = row_stride - raw_row_bytes;
    for y in (0..image.height()).rev() {
        let Some(row) = image.row(y) else {
            return Err(ConvertError::InvalidData(alloc::format!("missing row {y}")));
        };
        for px in row.chunks_exact(channels) {
            out.extend_from_slice(&[px[2], px[1], px[0]]);
        }
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }

    Ok(out)
}

fn write_bmp_header(out: &mut Vec<u8>, file_size: u32, pixel_data_size: u32, width: u32, height: u32) {
    // File header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&(BMP_HEADER_SIZE as u32).to_le_bytes()); // data offset

    // DIB header (BITMAPINFOHEADER, 40 bytes)
    out.extend_from_slice(&(BMP_INFO_HEADER_SIZE as u32).to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes()); // positive = bottom-up
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // compression
    out.extend_from_slice(&pixel_data_size.to_le_bytes());
    out.extend_from_slice(&0i32.to_le_bytes()); // h resolution
    out.extend_from_slice(&0i32.to_le_bytes()); // v resolution
    out.extend_from_slice(&0u32.to_le_bytes()); // colors used
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors

    debug_assert_eq!(out.len(), BMP_FILE_HEADER_SIZE + BMP_INFO_HEADER_SIZE);
}
