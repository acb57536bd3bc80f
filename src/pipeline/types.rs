//! Values flowing through the pipeline.

use bytes::Bytes;

use super::size::SizeSpec;
use super::timing::StageTimings;

/// One inbound transformation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub source_url: String,
    pub size_spec: SizeSpec,
}

impl ImageRequest {
    pub fn new(source_url: impl Into<String>, size_spec: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            size_spec: SizeSpec::new(size_spec),
        }
    }
}

/// Bytes retrieved from the source, exactly as served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    pub bytes: Bytes,
}

impl RawImage {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Encoded formats the gateway can decode and re-encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Gif,
    Jpeg,
    Png,
}

impl ImageFormat {
    /// Maps a sniffed `image` crate format onto the supported set.
    pub fn from_codec(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Gif => Some(ImageFormat::Gif),
            image::ImageFormat::Jpeg => Some(ImageFormat::Jpeg),
            image::ImageFormat::Png => Some(ImageFormat::Png),
            _ => None,
        }
    }

    pub fn codec(self) -> image::ImageFormat {
        match self {
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ImageFormat::Gif => "gif",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ImageFormat::Gif => "image/gif",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Successful outcome of one request.
#[derive(Debug, Clone)]
pub struct ImageResult {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    pub timings: StageTimings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types() {
        assert_eq!(ImageFormat::Gif.content_type(), "image/gif");
        assert_eq!(ImageFormat::Jpeg.content_type(), "image/jpeg");
        assert_eq!(ImageFormat::Png.content_type(), "image/png");
    }

    #[test]
    fn test_codec_mapping() {
        for format in [ImageFormat::Gif, ImageFormat::Jpeg, ImageFormat::Png] {
            assert_eq!(ImageFormat::from_codec(format.codec()), Some(format));
        }
        assert_eq!(ImageFormat::from_codec(image::ImageFormat::Bmp), None);
        assert_eq!(ImageFormat::from_codec(image::ImageFormat::WebP), None);
    }

    #[test]
    fn test_request_wraps_size_spec() {
        let req = ImageRequest::new("http://example.com/a.png", "100x100");
        assert_eq!(req.size_spec.as_str(), "100x100");
    }
}
