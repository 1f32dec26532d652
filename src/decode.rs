use crate::error::ConvertError;
use crate::image::Image;
use crate::limits::Limits;
use crate::pixel::ImageFormat;

/// Builder for a decode call.
///
/// Without [`with_format`](Self::with_format) the format is detected from
/// magic bytes. Without [`with_limits`](Self::with_limits) the
/// [`Limits::default`] ceilings apply.
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    format: Option<ImageFormat>,
    limits: Limits,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            format: None,
            limits: Limits::default(),
        }
    }

    pub fn with_limits(mut self, limits: &Limits) -> Self {
        self.limits = *limits;
        self
    }

    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Decode into a freshly allocated [`Image`].
    pub fn decode(self) -> Result<Image, ConvertError> {
        self.limits.check_bytes(self.data.len() as u64)?;
        let format = match self.format {
            Some(format) => format,
            None => ImageFormat::detect(self.data).ok_or(ConvertError::UnrecognizedFormat)?,
        };
        format.codec().decode(self.data, &self.limits)
    }
}
