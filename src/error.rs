use alloc::string::String;

/// Errors from QOI/BMP decoding, encoding and conversion.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConvertError {
    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("invalid pixel data: {0}")]
    InvalidData(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("invalid dimensions: {width}x{height} with {channels} channels")]
    InvalidDimensions {
        width: u32,
        height: u32,
        channels: usize,
    },

    #[error("pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("pixel layout mismatch: expected {expected:?}, got {actual:?}")]
    LayoutMismatch {
        expected: crate::PixelLayout,
        actual: crate::PixelLayout,
    },

    #[error("invalid quality {0}, expected 1-100")]
    InvalidQuality(u8),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("size computation overflowed: {0}")]
    Overflow(&'static str),

    #[error("failed to allocate {0} bytes")]
    AllocationFailed(usize),

    #[cfg(feature = "std")]
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`ConvertError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Open, read or write failure at the byte-stream boundary.
    Io,
    /// Bad magic, unsupported variant, malformed or truncated data.
    Format,
    /// Pixel-count or byte-size ceiling violated.
    LimitExceeded,
    /// A size computation would exceed the addressable range.
    Overflow,
    /// The allocator refused the pixel buffer.
    Allocation,
    /// Caller-supplied image or options are invalid.
    InvalidInput,
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnrecognizedFormat
            | Self::InvalidHeader(_)
            | Self::UnsupportedVariant(_)
            | Self::InvalidData(_)
            | Self::UnexpectedEof => ErrorKind::Format,
            Self::InvalidDimensions { .. }
            | Self::BufferSizeMismatch { .. }
            | Self::LayoutMismatch { .. }
            | Self::InvalidQuality(_) => ErrorKind::InvalidInput,
            Self::LimitExceeded(_) => ErrorKind::LimitExceeded,
            Self::Overflow(_) => ErrorKind::Overflow,
            Self::AllocationFailed(_) => ErrorKind::Allocation,
            #[cfg(feature = "std")]
            Self::Io(_) => ErrorKind::Io,
        }
    }
}
