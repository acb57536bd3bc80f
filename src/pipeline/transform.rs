//! Decode → resize → encode.
//!
//! The [`Transformer`] trait is the seam between the pipeline and the image
//! engine. [`RasterTransformer`] is the production implementation on top of
//! the `image` crate:
//!
//! | Step | Failure prefix | `image` API |
//! |---|---|---|
//! | Materialize handle | `init failed` | `load_from_memory_with_format` |
//! | Resize | `resize failed` | `DynamicImage::resize_exact` (Lanczos3) |
//! | Encode | `encoding failed` | `DynamicImage::write_to` |
//!
//! Every step is all-or-nothing. Nothing of a failed request is returned.
//!
//! GIF sources are decoded as a single frame; animated GIFs come back as a
//! still image of their first frame.
//!
//! Target dimensions are checked against [`ResizeLimits`] before any pixel
//! buffer is allocated.

use std::io::Cursor;

use image::imageops::FilterType;
use image::DynamicImage;

use super::error::PipelineError;
use super::size::SizeSpec;
use super::types::{ImageFormat, RawImage};
use crate::config::TransformConfig;

/// Produces resized bytes in the same format as the input.
pub trait Transformer: Send + Sync {
    fn transform(
        &self,
        raw: &RawImage,
        format: ImageFormat,
        size: &SizeSpec,
    ) -> Result<Vec<u8>, PipelineError>;
}

/// Upper bounds on the output of a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeLimits {
    pub max_width: u32,
    pub max_height: u32,
    pub max_pixels: u64,
}

impl Default for ResizeLimits {
    fn default() -> Self {
        Self::from(&TransformConfig::default())
    }
}

impl From<&TransformConfig> for ResizeLimits {
    fn from(config: &TransformConfig) -> Self {
        Self {
            max_width: config.max_width,
            max_height: config.max_height,
            max_pixels: config.max_pixels,
        }
    }
}

impl ResizeLimits {
    /// Reject a `width`×`height` target that exceeds any bound.
    pub fn check(&self, width: u32, height: u32) -> Result<(), PipelineError> {
        if width > self.max_width || height > self.max_height {
            return Err(PipelineError::resize_failed(format!(
                "target {}x{} exceeds limit of {}x{}",
                width, height, self.max_width, self.max_height
            )));
        }
        let pixels = width as u64 * height as u64;
        if pixels > self.max_pixels {
            return Err(PipelineError::resize_failed(format!(
                "target {}x{} has {} pixels, limit is {}",
                width, height, pixels, self.max_pixels
            )));
        }
        Ok(())
    }
}

/// Decoded image owned by a single request.
///
/// Dropping the handle releases the pixel buffer; ownership guarantees this
/// happens exactly once whichever step returns first.
pub struct ImageHandle {
    image: DynamicImage,
    format: ImageFormat,
}

impl ImageHandle {
    /// Decode `bytes` with the declared `format`.
    pub fn from_blob(bytes: &[u8], format: ImageFormat) -> Result<Self, PipelineError> {
        let image = image::load_from_memory_with_format(bytes, format.codec())
            .map_err(PipelineError::init_failed)?;
        tracing::trace!(
            format = %format,
            width = image.width(),
            height = image.height(),
            "Image handle acquired"
        );
        Ok(Self { image, format })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    /// Apply the size spec in place, refusing targets beyond `limits`.
    pub fn resize(&mut self, size: &SizeSpec, limits: &ResizeLimits) -> Result<(), PipelineError> {
        let geometry = size.geometry().map_err(PipelineError::resize_failed)?;
        let (src_w, src_h) = self.dimensions();
        if src_w == 0 || src_h == 0 {
            return Err(PipelineError::resize_failed("source image has no pixels"));
        }

        let (dst_w, dst_h) = geometry.target_dimensions(src_w, src_h);
        limits.check(dst_w, dst_h)?;
        if (dst_w, dst_h) != (src_w, src_h) {
            self.image = self.image.resize_exact(dst_w, dst_h, FilterType::Lanczos3);
        }
        Ok(())
    }

    /// Encode into the format the handle was created with.
    pub fn to_blob(&self) -> Result<Vec<u8>, PipelineError> {
        let mut out = Cursor::new(Vec::new());
        self.image
            .write_to(&mut out, self.format.codec())
            .map_err(PipelineError::encode_failed)?;
        Ok(out.into_inner())
    }
}

impl Drop for ImageHandle {
    fn drop(&mut self) {
        tracing::trace!(format = %self.format, "Image handle released");
    }
}

/// [`Transformer`] backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterTransformer {
    limits: ResizeLimits,
}

impl RasterTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: ResizeLimits) -> Self {
        Self { limits }
    }
}

impl Transformer for RasterTransformer {
    fn transform(
        &self,
        raw: &RawImage,
        format: ImageFormat,
        size: &SizeSpec,
    ) -> Result<Vec<u8>, PipelineError> {
        let mut handle = ImageHandle::from_blob(&raw.bytes, format)?;
        handle.resize(size, &self.limits)?;
        handle.to_blob()
    }
}
