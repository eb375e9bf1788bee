//! Frame types and data structures.

use std::fmt;

use crate::error::{LevelsError, Result};

/// Pixel layout of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// RGB format (3 bytes per pixel)
    Rgb,
    /// RGB with alpha (4 bytes per pixel), used for compositing canvases
    Rgba,
}

impl PixelFormat {
    /// Number of bytes per pixel.
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }

    /// Whether the last channel of each pixel is alpha.
    pub fn has_alpha(self) -> bool {
        matches!(self, PixelFormat::Rgba)
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelFormat::Rgb => write!(f, "rgb"),
            PixelFormat::Rgba => write!(f, "rgba"),
        }
    }
}

/// A rendered image.
///
/// Pixels are stored row-major with no padding between rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Raw pixel data, `width * height * format.channels()` bytes
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Pixel format
    pub format: PixelFormat,
}

impl Frame {
    /// Create a frame, checking that the buffer matches the dimensions.
    ///
    /// # Errors
    /// `InvalidGeometry` if either dimension is zero or the buffer length does
    /// not equal `width * height * channels`.
    pub fn new(data: Vec<u8>, width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let frame = Frame {
            data,
            width,
            height,
            format,
        };
        frame.ensure_drawable()?;
        Ok(frame)
    }

    /// Create a frame with every pixel set to `pixel`.
    ///
    /// `pixel` must hold exactly `format.channels()` bytes.
    pub fn filled(width: u32, height: u32, format: PixelFormat, pixel: &[u8]) -> Result<Self> {
        if pixel.len() != format.channels() {
            return Err(LevelsError::InvalidParameter(format!(
                "fill pixel has {} channels, {} format needs {}",
                pixel.len(),
                format,
                format.channels()
            )));
        }
        let data = pixel.repeat(width as usize * height as usize);
        Frame::new(data, width, height, format)
    }

    /// Get the number of bytes per pixel.
    pub fn bytes_per_pixel(&self) -> usize {
        self.format.channels()
    }

    /// Number of pixels in the frame.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Fail fast on frames no renderer can draw into.
    pub fn ensure_drawable(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LevelsError::geometry(
                self.width,
                self.height,
                "frame has no pixels",
            ));
        }
        let expected = self.pixel_count() * self.bytes_per_pixel();
        if self.data.len() != expected {
            return Err(LevelsError::geometry(
                self.width,
                self.height,
                format!(
                    "buffer holds {} bytes, expected {}",
                    self.data.len(),
                    expected
                ),
            ));
        }
        Ok(())
    }

    /// Channel values of the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.bytes_per_pixel();
        let start = (y as usize * self.width as usize + x as usize) * bpp;
        self.data.get(start..start + bpp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_format_channels() {
        assert_eq!(PixelFormat::Rgb.channels(), 3);
        assert_eq!(PixelFormat::Rgba.channels(), 4);
        assert!(!PixelFormat::Rgb.has_alpha());
        assert!(PixelFormat::Rgba.has_alpha());
    }

    #[test]
    fn test_frame_new_valid() {
        let frame = Frame::new(vec![0; 12], 2, 2, PixelFormat::Rgb).unwrap();
        assert_eq!(frame.bytes_per_pixel(), 3);
        assert_eq!(frame.pixel_count(), 4);
    }

    #[test]
    fn test_frame_new_zero_size() {
        let err = Frame::new(Vec::new(), 0, 5, PixelFormat::Rgb).unwrap_err();
        assert!(matches!(err, LevelsError::InvalidGeometry { width: 0, height: 5, .. }));
    }

    #[test]
    fn test_frame_new_length_mismatch() {
        let err = Frame::new(vec![0; 10], 2, 2, PixelFormat::Rgb).unwrap_err();
        assert!(err.to_string().contains("expected 12"));
    }

    #[test]
    fn test_frame_filled() {
        let frame = Frame::filled(3, 2, PixelFormat::Rgba, &[1, 2, 3, 4]).unwrap();
        assert_eq!(frame.data.len(), 24);
        assert_eq!(frame.pixel(2, 1), Some(&[1, 2, 3, 4][..]));
    }

    #[test]
    fn test_frame_filled_wrong_channel_count() {
        assert!(Frame::filled(1, 1, PixelFormat::Rgb, &[1, 2]).is_err());
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let frame = Frame::filled(2, 2, PixelFormat::Rgb, &[9, 9, 9]).unwrap();
        assert!(frame.pixel(2, 0).is_none());
        assert!(frame.pixel(0, 2).is_none());
    }
}
