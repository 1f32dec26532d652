//! QOI decoder.

use super::{
    QOI_HEADER_SIZE, QOI_MAGIC, QOI_MASK_2, QOI_OP_DIFF, QOI_OP_INDEX, QOI_OP_LUMA, QOI_OP_RGB,
    QOI_OP_RGBA, hash,
};
use crate::error::ConvertError;
use crate::image::{Image, PixelBuffer};
use crate::limits::Limits;
use crate::pixel::PixelLayout;

/// Parsed QOI header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QoiHeader {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    /// Colorspace byte as stored. The encoder writes 1 (sRGB); the decoder
    /// does not interpret it.
    pub colorspace: u8,
}

impl QoiHeader {
    /// Parse the 14-byte header at the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self, ConvertError> {
        parse_header(data)
    }

    pub fn layout(&self) -> PixelLayout {
        if self.channels == 4 {
            PixelLayout::Rgba8
        } else {
            PixelLayout::Rgb8
        }
    }
}

pub(crate) fn parse_header(data: &[u8]) -> Result<QoiHeader, ConvertError> {
    let header: &[u8; QOI_HEADER_SIZE] = data
        .get(..QOI_HEADER_SIZE)
        .and_then(|h| h.try_into().ok())
        .ok_or(ConvertError::UnexpectedEof)?;
    if read_u32_be(header, 0) != QOI_MAGIC {
        return Err(ConvertError::UnrecognizedFormat);
    }
    let width = read_u32_be(header, 4);
    let height = read_u32_be(header, 8);
    let channels = header[12];
    let colorspace = header[13];

    if width == 0 || height == 0 {
        return Err(ConvertError::InvalidHeader(alloc::format!(
            "QOI dimensions {width}x{height} contain a zero"
        )));
    }
    if width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(ConvertError::InvalidHeader(alloc::format!(
            "QOI dimensions {width}x{height} out of range"
        )));
    }
    if channels != 3 && channels != 4 {
        return Err(ConvertError::InvalidHeader(alloc::format!(
            "QOI channel count {channels}, expected 3 or 4"
        )));
    }

    log::debug!("qoi header: {width}x{height}, {channels} channels, colorspace {colorspace}");
    Ok(QoiHeader {
        width,
        height,
        channels,
        colorspace,
    })
}

fn read_u32_be(bytes: &[u8; QOI_HEADER_SIZE], at: usize) -> u32 {
    u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Byte reader over the op stream. Every read past the end is `UnexpectedEof`.
struct Ops<'a> {
    data: &'a [u8],
    pos: usize,
}

impl Ops<'_> {
    fn next_u8(&mut self) -> Result<u8, ConvertError> {
        let b = *self.data.get(self.pos).ok_or(ConvertError::UnexpectedEof)?;
        self.pos += 1;
        Ok(b)
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], ConvertError> {
        let end = self.pos.checked_add(N).ok_or(ConvertError::UnexpectedEof)?;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(ConvertError::UnexpectedEof)?;
        self.pos = end;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }
}

/// Run the op-stream state machine until every pixel has been produced.
pub(crate) fn decode_pixels(
    data: &[u8],
    header: &QoiHeader,
    limits: &Limits,
) -> Result<Image, ConvertError> {
    let layout = header.layout();
    let channels = layout.channels();
    let mut buf = PixelBuffer::new(header.width, header.height, layout, limits)?;
    let out = buf.as_mut_slice();
    let end = out.len();

    let mut ops = Ops {
        data,
        pos: QOI_HEADER_SIZE,
    };
    let mut index = [[0u8; 4]; 64];
    let mut px = [0u8, 0, 0, 255];
    let mut pos = 0usize;

    while pos < end {
        let b1 = ops.next_u8()?;
        match b1 {
            QOI_OP_RGB => {
                let [r, g, b] = ops.take::<3>()?;
                px = [r, g, b, px[3]];
            }
            QOI_OP_RGBA => {
                px = ops.take::<4>()?;
            }
            _ => match b1 & QOI_MASK_2 {
                QOI_OP_INDEX => {
                    px = index[usize::from(b1)];
                }
                QOI_OP_DIFF => {
                    px[0] = px[0].wrapping_add((b1 >> 4) & 0x03).wrapping_sub(2);
                    px[1] = px[1].wrapping_add((b1 >> 2) & 0x03).wrapping_sub(2);
                    px[2] = px[2].wrapping_add(b1 & 0x03).wrapping_sub(2);
                }
                QOI_OP_LUMA => {
                    let b2 = ops.next_u8()?;
                    let vg = (b1 & 0x3f).wrapping_sub(32);
                    px[0] = px[0].wrapping_add(vg.wrapping_sub(8).wrapping_add(b2 >> 4));
                    px[1] = px[1].wrapping_add(vg);
                    px[2] = px[2].wrapping_add(vg.wrapping_sub(8).wrapping_add(b2 & 0x0f));
                }
                _ => {
                    // QOI_OP_RUN: the cache already holds px.
                    let run = usize::from(b1 & 0x3f) + 1;
                    let remaining = (end - pos) / channels;
                    for _ in 0..run.min(remaining) {
                        out[pos..pos + channels].copy_from_slice(&px[..channels]);
                        pos += channels;
                    }
                    continue;
                }
            },
        }

        index[hash(px)] = px;
        out[pos..pos + channels].copy_from_slice(&px[..channels]);
        pos += channels;
    }

    Ok(buf.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qoi::QOI_END_MARKER;
    use alloc::vec::Vec;

    fn stream(width: u32, height: u32, channels: u8, ops: &[u8]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"qoif");
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data.push(channels);
        data.push(1);
        data.extend_from_slice(ops);
        data.extend_from_slice(&QOI_END_MARKER);
        data
    }

    fn decode(data: &[u8]) -> Result<Image, ConvertError> {
        crate::qoi::decode(data, &Limits::default())
    }

    #[test]
    fn header_fields() {
        let data = stream(7, 5, 4, &[]);
        let header = parse_header(&data).unwrap();
        assert_eq!(
            header,
            QoiHeader {
                width: 7,
                height: 5,
                channels: 4,
                colorspace: 1
            }
        );
        assert_eq!(header.layout(), PixelLayout::Rgba8);
    }

    #[test]
    fn rejects_bad_magic() {
        let mut data = stream(1, 1, 3, &[0xfe, 1, 2, 3]);
        data[0] = b'Q';
        assert!(matches!(decode(&data), Err(ConvertError::UnrecognizedFormat)));
    }

    #[test]
    fn rejects_bad_header_fields() {
        for (w, h, c) in [(0, 1, 3), (1, 0, 3), (1, 1, 2), (1, 1, 5), (0x8000_0000, 1, 3)] {
            let data = stream(w, h, c, &[]);
            let err = decode(&data).unwrap_err();
            assert!(
                matches!(err, ConvertError::InvalidHeader(_)),
                "{w}x{h}x{c}: {err:?}"
            );
        }
    }

    #[test]
    fn short_header_is_eof() {
        assert!(matches!(decode(b"qoif\0\0"), Err(ConvertError::UnexpectedEof)));
    }

    #[test]
    fn decodes_every_op() {
        let ops = [
            0xfe, 100, 150, 200, // RGB
            0x40 | (3 << 4) | (1 << 2) | 2, // DIFF +1, -1, 0
            0x80 | (32 + 10), (8 + 3) << 4 | (8 - 4), // LUMA vg=10, dr=13, db=6
            0xff, 1, 2, 3, 4, // RGBA
            0xc0 | 1, // RUN x2
        ];
        // Index of the RGB pixel (100,150,200,255).
        let slot = hash([100, 150, 200, 255]) as u8;
        let mut all = ops.to_vec();
        all.push(slot);
        let img = decode(&stream(7, 1, 4, &all)).unwrap();
        assert_eq!(
            img.pixels(),
            &[
                100, 150, 200, 255, //
                101, 149, 200, 255, //
                114, 159, 206, 255, //
                1, 2, 3, 4, //
                1, 2, 3, 4, //
                1, 2, 3, 4, //
                100, 150, 200, 255,
            ]
        );
    }

    #[test]
    fn index_refreshes_cache_slot_of_its_pixel() {
        // Slot 0 starts as (0,0,0,0); RGBA overwrites it with another pixel
        // hashing to 0. INDEX 5 yields the untouched (0,0,0,0) and stores it
        // back at slot 0, so the following INDEX 0 yields (0,0,0,0) too.
        assert_eq!(hash([0, 0, 64, 0]), 0);
        let ops = [0xff, 0, 0, 64, 0, 5, 0];
        let img = decode(&stream(3, 1, 4, &ops)).unwrap();
        assert_eq!(img.pixels(), &[0, 0, 64, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn diff_wraps_around() {
        // DIFF -2,-2,-2 from (0,0,0) wraps to 254.
        let img = decode(&stream(1, 1, 3, &[0x40])).unwrap();
        assert_eq!(img.pixels(), &[254, 254, 254]);
    }

    #[test]
    fn run_clamped_to_image() {
        // 62-pixel run into a 3-pixel image.
        let img = decode(&stream(3, 1, 3, &[0xc0 | 61])).unwrap();
        assert_eq!(img.pixels(), &[0; 9]);
    }

    #[test]
    fn truncated_stream_is_eof() {
        let mut data = stream(2, 1, 3, &[0xfe, 1, 2]);
        data.truncate(QOI_HEADER_SIZE + 3);
        assert!(matches!(decode(&data), Err(ConvertError::UnexpectedEof)));

        let data = stream(4, 4, 3, &[0xc0]);
        let data = &data[..QOI_HEADER_SIZE + 1];
        assert!(matches!(decode(data), Err(ConvertError::UnexpectedEof)));
    }

    #[test]
    fn pixel_ceiling() {
        let data = stream(101, 1, 3, &[0xc0 | 61, 0xc0 | 38]);
        let strict = Limits::unlimited().with_max_pixels(100);
        assert!(matches!(
            crate::qoi::decode(&data, &strict),
            Err(ConvertError::LimitExceeded(_))
        ));
        let open = Limits::unlimited();
        let img = crate::qoi::decode(&data, &open).unwrap();
        assert_eq!(img.width(), 101);
    }
}
