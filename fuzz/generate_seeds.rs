#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // QOI 2x1 RGBA: RGBA op, RUN x1, end marker
    let mut qoi = b"qoif\0\0\0\x02\0\0\0\x01\x04\x01".to_vec();
    qoi.extend_from_slice(&[0xff, 0x10, 0x20, 0x30, 0x80]); // RGBA
    qoi.push(0xc0); // RUN x1
    qoi.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 1]);
    fs::write(format!("{dir}/qoi_rgba_2x1.qoi"), qoi).unwrap();

    // QOI 3x1 RGB: RGB, DIFF, LUMA
    let mut qoi = b"qoif\0\0\0\x03\0\0\0\x01\x03\x01".to_vec();
    qoi.extend_from_slice(&[0xfe, 0x40, 0x80, 0xc0]); // RGB
    qoi.push(0x40 | 0x2a); // DIFF
    qoi.extend_from_slice(&[0x80 | 0x28, 0x88]); // LUMA
    qoi.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 1]);
    fs::write(format!("{dir}/qoi_rgb_3x1.qoi"), qoi).unwrap();

    // Minimal BMP 1x1 24-bit
    let mut bmp = vec![0u8; 58]; // 54 header + 4 pixel (3 + 1 padding)
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&58u32.to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&1i32.to_le_bytes()); // width
    bmp[22..26].copy_from_slice(&1i32.to_le_bytes()); // height
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    bmp[54] = 0xff; bmp[55] = 0x00; bmp[56] = 0x00; // BGR
    fs::write(format!("{dir}/bmp_1x1.bmp"), bmp).unwrap();

    // Top-down 32-bit BMP 1x1
    let mut bmp = vec![0u8; 58];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&58u32.to_le_bytes());
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes());
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes());
    bmp[18..22].copy_from_slice(&1i32.to_le_bytes());
    bmp[22..26].copy_from_slice(&(-1i32).to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes());
    bmp[28..30].copy_from_slice(&32u16.to_le_bytes());
    bmp[54..58].copy_from_slice(&[0x10, 0x20, 0x30, 0x80]); // BGRA
    fs::write(format!("{dir}/bmp_topdown_32.bmp"), bmp).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_qoif.bin"), b"qoif").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/qoi_no_ops.bin"), b"qoif\0\0\0\x01\0\0\0\x01\x03\x01").unwrap();

    println!("Generated seed corpus in {dir}/");
}
