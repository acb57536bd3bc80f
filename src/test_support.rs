//! Fixtures shared by unit tests.

use std::io::Cursor;

use image::{DynamicImage, ImageBuffer, Rgb, Rgba};

use crate::pipeline::ImageFormat;

/// A `width`×`height` gradient in the color type the format's encoder accepts.
pub fn sample_image(format: ImageFormat, width: u32, height: u32) -> DynamicImage {
    match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x * 255 / width.max(1)) as u8, (y * 255 / height.max(1)) as u8, 128])
        })),
        ImageFormat::Gif | ImageFormat::Png => {
            DynamicImage::ImageRgba8(ImageBuffer::from_fn(width, height, |x, y| {
                Rgba([(x * 255 / width.max(1)) as u8, (y * 255 / height.max(1)) as u8, 64, 255])
            }))
        }
    }
}

/// Encoded bytes of [`sample_image`].
pub fn encode_sample(format: ImageFormat, width: u32, height: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    sample_image(format, width, height)
        .write_to(&mut out, format.codec())
        .expect("encode sample image");
    out.into_inner()
}
