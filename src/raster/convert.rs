//! Conversions between [`Frame`] and `image` crate buffers.

use image::{DynamicImage, RgbImage, RgbaImage};

use super::types::{Frame, PixelFormat};
use crate::error::{LevelsError, Result};

/// An owned `image` buffer matching a frame's pixel format.
///
/// Converting a frame into a buffer moves the pixel data; no copy is made.
pub enum PixelBuffer {
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

/// Convert a decoded image of any color type to an RGB frame.
///
/// Alpha is dropped and grayscale is expanded to three channels.
pub fn from_dynamic(image: DynamicImage) -> Frame {
    Frame::from(image.into_rgb8())
}

impl From<RgbImage> for Frame {
    fn from(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Frame {
            data: image.into_raw(),
            width,
            height,
            format: PixelFormat::Rgb,
        }
    }
}

impl From<RgbaImage> for Frame {
    fn from(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Frame {
            data: image.into_raw(),
            width,
            height,
            format: PixelFormat::Rgba,
        }
    }
}

impl From<PixelBuffer> for Frame {
    fn from(buffer: PixelBuffer) -> Self {
        match buffer {
            PixelBuffer::Rgb(image) => Frame::from(image),
            PixelBuffer::Rgba(image) => Frame::from(image),
        }
    }
}

/// Move a frame's pixels into an `image` buffer of the same format.
///
/// # Errors
/// `InvalidGeometry` if the frame is empty or its buffer length is wrong.
pub fn into_buffer(frame: Frame) -> Result<PixelBuffer> {
    frame.ensure_drawable()?;
    let Frame {
        data,
        width,
        height,
        format,
    } = frame;
    let mismatch = || LevelsError::geometry(width, height, "buffer does not match dimensions");
    match format {
        PixelFormat::Rgb => RgbImage::from_raw(width, height, data)
            .map(PixelBuffer::Rgb)
            .ok_or_else(mismatch),
        PixelFormat::Rgba => RgbaImage::from_raw(width, height, data)
            .map(PixelBuffer::Rgba)
            .ok_or_else(mismatch),
    }
}

/// Move a frame into a `DynamicImage` for encoding.
pub fn into_dynamic(frame: Frame) -> Result<DynamicImage> {
    Ok(match into_buffer(frame)? {
        PixelBuffer::Rgb(image) => DynamicImage::ImageRgb8(image),
        PixelBuffer::Rgba(image) => DynamicImage::ImageRgba8(image),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgba};

    #[test]
    fn test_from_dynamic_expands_gray() {
        let gray = GrayImage::from_pixel(2, 1, Luma([77]));
        let frame = from_dynamic(DynamicImage::ImageLuma8(gray));
        assert_eq!(frame.format, PixelFormat::Rgb);
        assert_eq!(frame.data, vec![77, 77, 77, 77, 77, 77]);
    }

    #[test]
    fn test_from_dynamic_drops_alpha() {
        let rgba = RgbaImage::from_pixel(1, 1, Rgba([10, 20, 30, 40]));
        let frame = from_dynamic(DynamicImage::ImageRgba8(rgba));
        assert_eq!(frame.format, PixelFormat::Rgb);
        assert_eq!(frame.data, vec![10, 20, 30]);
    }

    #[test]
    fn test_into_buffer_round_trip() {
        let frame = Frame::filled(3, 2, PixelFormat::Rgba, &[1, 2, 3, 4]).unwrap();
        let back = Frame::from(into_buffer(frame.clone()).unwrap());
        assert_eq!(back, frame);
    }

    #[test]
    fn test_into_buffer_rejects_empty() {
        let frame = Frame {
            data: Vec::new(),
            width: 0,
            height: 0,
            format: PixelFormat::Rgb,
        };
        assert!(matches!(
            into_buffer(frame),
            Err(LevelsError::InvalidGeometry { .. })
        ));
    }
}
