#![no_main]
use libfuzzer_sys::fuzz_target;
use zenconvert::Limits;

fuzz_target!(|data: &[u8]| {
    let limits = Limits::default().with_max_pixels(1 << 22);

    // Auto-detect decode (QOI, BMP) must never panic
    let _ = zenconvert::decode(data, &limits);

    // Each format explicitly, ignoring magic mismatches
    let _ = zenconvert::decode_qoi(data, &limits);
    let _ = zenconvert::decode_bmp(data, &limits);
    let _ = zenconvert::ImageInfo::from_bytes(data);
});
