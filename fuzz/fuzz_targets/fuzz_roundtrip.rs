#![no_main]
use libfuzzer_sys::fuzz_target;
use zenconvert::*;

fuzz_target!(|data: &[u8]| {
    let limits = Limits::default().with_max_pixels(1 << 22);

    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let Ok(decoded) = decode(data, &limits) else {
        return;
    };

    let reencoded = encode_qoi(&decoded).expect("QOI encode of a decoded image failed");
    let decoded2 = decode(&reencoded, &limits).expect("re-encoded QOI failed to decode");
    assert_eq!(decoded, decoded2, "QOI roundtrip mismatch");

    // BMP keeps RGB only
    let bmp = encode_bmp(&decoded).expect("BMP encode of a decoded image failed");
    let decoded3 = decode(&bmp, &limits).expect("re-encoded BMP failed to decode");
    assert_eq!(decoded.to_rgb(), decoded3, "BMP roundtrip mismatch");
});
