//! Format detection.
//!
//! Looks at the leading signature and then reads only as much of the header as
//! the decoder needs to report dimensions. Pixel data is never decoded here.

use std::io::Cursor;

use image::ImageReader;

use super::error::PipelineError;
use super::types::{ImageFormat, RawImage};

/// Identify the encoded format of `raw` among the supported set.
pub fn detect(raw: &RawImage) -> Result<ImageFormat, PipelineError> {
    let sniffed = image::guess_format(&raw.bytes).map_err(PipelineError::unrecognized_format)?;

    let format = ImageFormat::from_codec(sniffed).ok_or_else(|| {
        PipelineError::unrecognized_format(format!("unsupported format {:?}", sniffed))
    })?;

    // A valid signature followed by a truncated or corrupt header still
    // cannot be classified.
    ImageReader::with_format(Cursor::new(&raw.bytes[..]), format.codec())
        .into_dimensions()
        .map_err(PipelineError::unrecognized_format)?;

    Ok(format)
}
