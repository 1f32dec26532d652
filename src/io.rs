//! File and reader helpers (requires `std`).
//!
//! Input is read fully into memory, bounded by [`Limits::max_bytes`], before
//! any decoding starts. Output is encoded fully in memory before the file is
//! created, and a file left behind by a failed write is removed.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::vec::Vec;

use crate::codec::EncodeOptions;
use crate::error::ConvertError;
use crate::image::Image;
use crate::limits::Limits;
use crate::pixel::ImageFormat;
use crate::DecodeRequest;

/// Read all of `reader`, failing with [`ConvertError::LimitExceeded`] once
/// more than `limits.max_bytes` bytes are available.
pub fn read_limited<R: Read>(reader: R, limits: &Limits) -> Result<Vec<u8>, ConvertError> {
    let mut data = Vec::new();
    if limits.max_bytes == 0 {
        let mut reader = reader;
        reader.read_to_end(&mut data)?;
        return Ok(data);
    }
    // One byte past the ceiling is enough to know it was exceeded.
    reader
        .take(limits.max_bytes.saturating_add(1))
        .read_to_end(&mut data)?;
    limits.check_bytes(data.len() as u64)?;
    Ok(data)
}

/// Read a file, checking its size against the byte ceiling before reading.
pub fn read_file(path: impl AsRef<Path>, limits: &Limits) -> Result<Vec<u8>, ConvertError> {
    let file = File::open(path.as_ref())?;
    let metadata = file.metadata()?;
    if metadata.is_file() {
        limits.check_bytes(metadata.len())?;
    }
    read_limited(file, limits)
}

/// Write `bytes` to `path`. On failure the partial file is removed.
pub fn write_file(path: impl AsRef<Path>, bytes: &[u8]) -> Result<(), ConvertError> {
    let path = path.as_ref();
    let result = File::create(path).and_then(|mut file| {
        file.write_all(bytes)?;
        file.flush()
    });
    if let Err(err) = result {
        if path.exists() {
            if let Err(remove_err) = std::fs::remove_file(path) {
                log::warn!(
                    "failed to remove partial output {}: {remove_err}",
                    path.display()
                );
            }
        }
        return Err(err.into());
    }
    Ok(())
}

/// Read and decode a file. `format` of `None` detects it from magic bytes.
pub fn decode_file(
    path: impl AsRef<Path>,
    format: Option<ImageFormat>,
    limits: &Limits,
) -> Result<Image, ConvertError> {
    let data = read_file(path, limits)?;
    let request = DecodeRequest::new(&data).with_limits(limits);
    match format {
        Some(format) => request.with_format(format).decode(),
        None => request.decode(),
    }
}

/// Encode an image and write it to a file.
pub fn encode_file(
    path: impl AsRef<Path>,
    image: &Image,
    format: ImageFormat,
    options: &EncodeOptions,
) -> Result<(), ConvertError> {
    let bytes = format.codec().encode(image, options)?;
    write_file(path, &bytes)
}

/// Decode `input` (format detected from magic bytes) and write it to
/// `output` as `to`.
pub fn convert_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    to: ImageFormat,
    limits: &Limits,
    options: &EncodeOptions,
) -> Result<(), ConvertError> {
    let image = decode_file(input.as_ref(), None, limits)?;
    log::debug!(
        "converting {} ({}x{}, {:?}) to {to}",
        input.as_ref().display(),
        image.width(),
        image.height(),
        image.layout()
    );
    encode_file(output, &image, to, options)
}
