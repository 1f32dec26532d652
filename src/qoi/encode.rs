//! QOI encoder: single forward pass, greedy op selection.

use alloc::vec::Vec;

use super::{
    QOI_END_MARKER, QOI_HEADER_SIZE, QOI_MAGIC, QOI_MAX_RUN, QOI_OP_DIFF, QOI_OP_INDEX,
    QOI_OP_LUMA, QOI_OP_RGB, QOI_OP_RGBA, QOI_OP_RUN, QOI_SRGB, hash,
};
use crate::arith::{add_or_overflow, mul_or_overflow};
use crate::error::ConvertError;
use crate::image::Image;

/// Encode an image to a complete QOI byte stream.
pub(crate) fn encode_qoi(image: &Image) -> Result<Vec<u8>, ConvertError> {
    let channels = image.channels();
    let pixel_count = mul_or_overflow(
        image.width() as usize,
        image.height() as usize,
        "pixel count",
    )?;
    // Worst case is one RGBA op (channels + 1 bytes) per pixel.
    let data_bytes = mul_or_overflow(pixel_count, channels + 1, "QOI output size")?;
    let max_size = add_or_overflow(QOI_HEADER_SIZE, data_bytes, "QOI output size")?;
    let max_size = add_or_overflow(max_size, QOI_END_MARKER.len(), "QOI output size")?;

    let mut out = Vec::new();
    out.try_reserve_exact(max_size)
        .map_err(|_| ConvertError::AllocationFailed(max_size))?;

    out.extend_from_slice(&QOI_MAGIC.to_be_bytes());
    out.extend_from_slice(&image.width().to_be_bytes());
    out.extend_from_slice(&image.height().to_be_bytes());
    out.push(channels as u8);
    out.push(QOI_SRGB);

    let mut index = [[0u8; 4]; 64];
    let mut prev = [0u8, 0, 0, 255];
    let mut run = 0u8;

    for (i, chunk) in image.pixels().chunks_exact(channels).enumerate() {
        let px = if channels == 4 {
            [chunk[0], chunk[1], chunk[2], chunk[3]]
        } else {
            [chunk[0], chunk[1], chunk[2], 255]
        };

        if px == prev {
            run += 1;
            if run == QOI_MAX_RUN || i == pixel_count - 1 {
                out.push(QOI_OP_RUN | (run - 1));
                run = 0;
            }
            continue;
        }

        if run > 0 {
            out.push(QOI_OP_RUN | (run - 1));
            run = 0;
        }

        let slot = hash(px);
        if index[slot] == px {
            out.push(QOI_OP_INDEX | slot as u8);
        } else {
            index[slot] = px;
            if px[3] == prev[3] {
                push_color_delta(&mut out, px, prev);
            } else {
                out.push(QOI_OP_RGBA);
                out.extend_from_slice(&px);
            }
        }
        prev = px;
    }

    out.extend_from_slice(&QOI_END_MARKER);
    log::trace!(
        "qoi encode: {}x{} -> {} bytes",
        image.width(),
        image.height(),
        out.len()
    );
    Ok(out)
}

/// DIFF, LUMA or RGB for a pixel whose alpha matches `prev`.
///
/// Deltas are plain signed differences: a channel stepping across 0/255
/// never qualifies for DIFF or LUMA, even though the decoder's wrapping
/// adds would reproduce it.
fn push_color_delta(out: &mut Vec<u8>, px: [u8; 4], prev: [u8; 4]) {
    let vr = i16::from(px[0]) - i16::from(prev[0]);
    let vg = i16::from(px[1]) - i16::from(prev[1]);
    let vb = i16::from(px[2]) - i16::from(prev[2]);
    let vg_r = vr - vg;
    let vg_b = vb - vg;

    let small = |v: i16| (-2..=1).contains(&v);
    if small(vr) && small(vg) && small(vb) {
        out.push(
            QOI_OP_DIFF | ((vr + 2) as u8) << 4 | ((vg + 2) as u8) << 2 | (vb + 2) as u8,
        );
    } else if (-8..=7).contains(&vg_r) && (-32..=31).contains(&vg) && (-8..=7).contains(&vg_b) {
        out.push(QOI_OP_LUMA | (vg + 32) as u8);
        out.push(((vg_r + 8) as u8) << 4 | (vg_b + 8) as u8);
    } else {
        out.push(QOI_OP_RGB);
        out.extend_from_slice(&px[..3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::PixelLayout;
    use crate::qoi::QOI_HEADER_SIZE;
    use alloc::vec;

    fn body(encoded: &[u8]) -> &[u8] {
        assert_eq!(&encoded[encoded.len() - 8..], &QOI_END_MARKER);
        &encoded[QOI_HEADER_SIZE..encoded.len() - 8]
    }

    #[test]
    fn header_bytes() {
        let img = Image::new(vec![0; 2 * 3 * 4], 2, 3, PixelLayout::Rgba8).unwrap();
        let out = encode_qoi(&img).unwrap();
        assert_eq!(
            &out[..QOI_HEADER_SIZE],
            &[b'q', b'o', b'i', b'f', 0, 0, 0, 2, 0, 0, 0, 3, 4, 1]
        );
    }

    #[test]
    fn seventy_pixel_run_splits_at_62() {
        let pixels = [0u8, 0, 0, 255].repeat(70);
        let img = Image::new(pixels, 70, 1, PixelLayout::Rgba8).unwrap();
        let out = encode_qoi(&img).unwrap();
        assert_eq!(body(&out), &[QOI_OP_RUN | 61, QOI_OP_RUN | 7]);
    }

    #[test]
    fn run_of_other_color_splits_too() {
        let pixels = [9u8, 9, 9].repeat(70);
        let img = Image::new(pixels, 10, 7, PixelLayout::Rgb8).unwrap();
        let out = encode_qoi(&img).unwrap();
        // First pixel as LUMA (vg=9, dr=db=0), then 69 repeats = 62 + 7.
        assert_eq!(
            body(&out),
            &[QOI_OP_LUMA | (9 + 32), 0x88, QOI_OP_RUN | 61, QOI_OP_RUN | 6]
        );
    }

    #[test]
    fn repeated_pixel_after_other_hits_index() {
        let pixels = vec![10, 20, 30, 200, 100, 50, 10, 20, 30];
        let img = Image::new(pixels, 3, 1, PixelLayout::Rgb8).unwrap();
        let out = encode_qoi(&img).unwrap();
        let slot = hash([10, 20, 30, 255]) as u8;
        assert_eq!(
            body(&out),
            &[
                QOI_OP_RGB, 10, 20, 30, //
                QOI_OP_RGB, 200, 100, 50, //
                QOI_OP_INDEX | slot,
            ]
        );
    }

    #[test]
    fn small_delta_is_diff() {
        let pixels = vec![5, 5, 5, 255, 6, 4, 5, 255];
        let img = Image::new(pixels, 2, 1, PixelLayout::Rgba8).unwrap();
        let out = encode_qoi(&img).unwrap();
        // First pixel: LUMA vg=5, dr=db=0. Second: dr=+1, dg=-1, db=0.
        assert_eq!(
            body(&out),
            &[
                QOI_OP_LUMA | (5 + 32),
                0x88,
                QOI_OP_DIFF | (3 << 4) | (1 << 2) | 2
            ]
        );
    }

    #[test]
    fn channel_crossing_zero_is_rgb() {
        // (0,0,0) -> (1,255,0): green steps by +255, not -1.
        let pixels = vec![0, 0, 0, 1, 255, 0];
        let img = Image::new(pixels, 2, 1, PixelLayout::Rgb8).unwrap();
        let out = encode_qoi(&img).unwrap();
        assert_eq!(body(&out), &[QOI_OP_RUN, QOI_OP_RGB, 1, 255, 0]);
        let decoded = crate::qoi::decode(&out, &crate::Limits::default()).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn luma_uses_unwrapped_green() {
        // vg = -32 fits LUMA; from (0,0,0) a step to 224 is +224 and must be RGB.
        let pixels = vec![40, 40, 40, 8, 8, 8, 0, 0, 0, 224, 224, 224];
        let img = Image::new(pixels, 4, 1, PixelLayout::Rgb8).unwrap();
        let out = encode_qoi(&img).unwrap();
        assert_eq!(
            body(&out),
            &[
                QOI_OP_RGB, 40, 40, 40, //
                QOI_OP_LUMA, 0x88, // vg = -32
                QOI_OP_LUMA | (32 - 8), 0x88, // vg = -8
                QOI_OP_RGB, 224, 224, 224,
            ]
        );
    }

    #[test]
    fn alpha_change_is_rgba() {
        let pixels = vec![5, 6, 7, 128];
        let img = Image::new(pixels, 1, 1, PixelLayout::Rgba8).unwrap();
        let out = encode_qoi(&img).unwrap();
        assert_eq!(body(&out), &[QOI_OP_RGBA, 5, 6, 7, 128]);
    }
}
