use zenconvert::*;

#[test]
fn qoi_roundtrip_rgb8() {
    let w = 4;
    let h = 3;
    let mut pixels = vec![0u8; w * h * 3];
    for y in 0..h {
        for x in 0..w {
            let off = (y * w + x) * 3;
            if (x + y) % 2 == 0 {
                pixels[off] = 255;
                pixels[off + 1] = 0;
                pixels[off + 2] = 128;
            } else {
                pixels[off] = 0;
                pixels[off + 1] = 200;
                pixels[off + 2] = 50;
            }
        }
    }
    let image = Image::new(pixels.clone(), w as u32, h as u32, PixelLayout::Rgb8).unwrap();

    let encoded = EncodeRequest::qoi().encode(&image).unwrap();
    assert_eq!(&encoded[0..4], b"qoif");

    let decoded = DecodeRequest::new(&encoded).decode().unwrap();
    assert_eq!(decoded.width(), w as u32);
    assert_eq!(decoded.height(), h as u32);
    assert_eq!(decoded.layout(), PixelLayout::Rgb8);
    assert_eq!(decoded.pixels(), &pixels[..]);
}

#[test]
fn qoi_roundtrip_rgba8() {
    let pixels = vec![
        255, 0, 0, 255, // red
        0, 255, 0, 128, // green semi-transparent
        0, 0, 255, 0, // blue transparent
        128, 128, 128, 255, // gray
    ];
    let image = Image::new(pixels.clone(), 2, 2, PixelLayout::Rgba8).unwrap();

    let encoded = encode_qoi(&image).unwrap();
    let decoded = decode_qoi(&encoded, &Limits::default()).unwrap();
    assert_eq!(decoded.layout(), PixelLayout::Rgba8);
    assert_eq!(decoded, image);
}

#[test]
fn bmp_roundtrip_rgb8() {
    let pixels = vec![
        255, 0, 0, 0, 255, 0, 0, 0, 255, // row 0: R G B
        128, 128, 128, 64, 64, 64, 0, 0, 0, // row 1: gray dark black
    ];
    let image = Image::new(pixels.clone(), 3, 2, PixelLayout::Rgb8).unwrap();

    let encoded = EncodeRequest::bmp().encode(&image).unwrap();
    assert_eq!(&encoded[0..2], b"BM");

    let decoded = DecodeRequest::new(&encoded).decode().unwrap();
    assert_eq!(decoded.width(), 3);
    assert_eq!(decoded.height(), 2);
    assert_eq!(decoded.layout(), PixelLayout::Rgb8);
    assert_eq!(decoded.pixels(), &pixels[..]);
}

#[test]
fn bmp_roundtrip_drops_alpha() {
    let pixels = vec![
        255, 0, 0, 255, 0, 255, 0, 128, // row 0
        0, 0, 255, 64, 128, 128, 128, 0, // row 1
    ];
    let image = Image::new(pixels, 2, 2, PixelLayout::Rgba8).unwrap();

    let encoded = encode_bmp(&image).unwrap();
    let decoded = decode_bmp(&encoded, &Limits::default()).unwrap();
    assert_eq!(decoded.layout(), PixelLayout::Rgb8);
    assert_eq!(decoded.channels(), 3);
    assert_eq!(
        decoded.pixels(),
        &[255, 0, 0, 0, 255, 0, 0, 0, 255, 128, 128, 128]
    );
    assert_eq!(decoded, image.to_rgb());
}

#[test]
fn image_info_probe() {
    let image = Image::new(vec![255u8; 8], 1, 2, PixelLayout::Rgba8).unwrap();

    let qoi = encode_qoi(&image).unwrap();
    let info = ImageInfo::from_bytes(&qoi).unwrap();
    assert_eq!(info.width, 1);
    assert_eq!(info.height, 2);
    assert_eq!(info.format, ImageFormat::Qoi);
    assert_eq!(info.layout, PixelLayout::Rgba8);

    let bmp = encode_bmp(&image).unwrap();
    let info = ImageInfo::from_bytes(&bmp).unwrap();
    assert_eq!(info.format, ImageFormat::Bmp);
    assert_eq!(info.layout, PixelLayout::Rgb8);

    assert!(matches!(
        ImageInfo::from_bytes(b"GIF89a"),
        Err(ConvertError::UnrecognizedFormat)
    ));
}

#[test]
fn limits_reject_large() {
    let image = Image::new(vec![7u8; 101 * 3], 101, 1, PixelLayout::Rgb8).unwrap();
    let strict = Limits::default().with_max_pixels(100);

    for format in ImageFormat::ALL {
        let encoded = EncodeRequest::new(format).encode(&image).unwrap();
        let err = DecodeRequest::new(&encoded)
            .with_limits(&strict)
            .decode()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LimitExceeded, "{format}");

        let unlimited = Limits::default().with_max_pixels(0);
        let decoded = DecodeRequest::new(&encoded)
            .with_limits(&unlimited)
            .decode()
            .unwrap();
        assert_eq!(decoded.pixels(), image.pixels());
    }
}

#[test]
fn byte_limit_rejects_before_decode() {
    let image = Image::new(vec![1u8; 300], 10, 10, PixelLayout::Rgb8).unwrap();
    let encoded = encode_bmp(&image).unwrap();
    let limits = Limits::default().with_max_bytes(encoded.len() as u64 - 1);
    let err = decode(&encoded, &limits).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LimitExceeded);
}

#[test]
fn malformed_qoi_magic_is_format_error() {
    let err = decode_qoi(b"qoiX\0\0\0\x01\0\0\0\x01\x03\x01", &Limits::default()).unwrap_err();
    assert!(matches!(err, ConvertError::UnrecognizedFormat));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn explicit_format_overrides_detection() {
    let image = Image::new(vec![1, 2, 3], 1, 1, PixelLayout::Rgb8).unwrap();
    let bmp = encode_bmp(&image).unwrap();
    let err = DecodeRequest::new(&bmp)
        .with_format(ImageFormat::Qoi)
        .decode()
        .unwrap_err();
    assert!(matches!(err, ConvertError::UnrecognizedFormat));
}

#[test]
fn convert_between_formats() {
    let pixels: Vec<u8> = (0..5 * 4 * 4).map(|i| (i * 7) as u8).collect();
    let image = Image::new(pixels, 5, 4, PixelLayout::Rgba8).unwrap();
    let qoi = encode_qoi(&image).unwrap();

    let bmp = convert(&qoi, ImageFormat::Bmp, &Limits::default(), &EncodeOptions::new()).unwrap();
    let back = convert(&bmp, ImageFormat::Qoi, &Limits::default(), &EncodeOptions::new()).unwrap();
    let decoded = decode(&back, &Limits::default()).unwrap();
    assert_eq!(decoded, image.to_rgb());
}

#[test]
fn codec_trait_objects() {
    let image = Image::new(vec![9, 8, 7, 6, 5, 4], 2, 1, PixelLayout::Rgb8).unwrap();
    let codecs: [&dyn Codec; 2] = [&Qoi, &Bmp];
    for codec in codecs {
        let bytes = codec.encode(&image, &EncodeOptions::default()).unwrap();
        assert_eq!(ImageFormat::detect(&bytes), Some(codec.format()));
        let decoded = codec.decode(&bytes, &Limits::default()).unwrap();
        assert_eq!(decoded, image);
    }
}
