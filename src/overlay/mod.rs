//! Heliographic-style grid overlay.
//!
//! The overlay treats the image as a flat disk centered in the frame and
//! draws, in order:
//! 1. neutral latitude circles at 30° and 60° and longitude diameters every 30°
//! 2. highlighted compass rays to N, E, S, W
//! 3. highlighted N, E, S, W letters just past the ray ends
//!
//! Later layers paint over earlier ones where they cross.

mod draw;
pub mod geometry;
mod glyphs;

pub use draw::{draw_compass, draw_grid, draw_limb};
pub use geometry::{Cardinal, GridGeometry};

use image::{Rgb, Rgba};

use crate::error::Result;
use crate::raster::convert::{into_buffer, PixelBuffer};
use crate::raster::Frame;

/// Gold used for the compass.
pub const DEFAULT_HIGHLIGHT: [u8; 3] = [255, 215, 0];

/// Gray used for the latitude/longitude grid.
pub const DEFAULT_NEUTRAL: [u8; 3] = [160, 160, 160];

/// Distance past the disk edge at which compass letters are centered.
pub const DEFAULT_LABEL_OFFSET: f32 = 20.0;

/// Colors and label placement for the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    pub highlight: [u8; 3],
    pub neutral: [u8; 3],
    pub label_offset: f32,
    /// Integer upscale of the 5x7 letter glyphs
    pub label_scale: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            highlight: DEFAULT_HIGHLIGHT,
            neutral: DEFAULT_NEUTRAL,
            label_offset: DEFAULT_LABEL_OFFSET,
            label_scale: 2,
        }
    }
}

/// Draws the grid overlay onto frames.
#[derive(Debug, Clone, Default)]
pub struct GridOverlayRenderer {
    style: OverlayStyle,
}

impl GridOverlayRenderer {
    pub fn new(style: OverlayStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Draw the overlay onto `frame`, returning it with the same dimensions
    /// and pixel format.
    ///
    /// # Errors
    /// `InvalidGeometry` if the frame has a zero dimension.
    pub fn draw_overlay(&self, frame: Frame) -> Result<Frame> {
        let geometry =
            GridGeometry::for_dimensions(frame.width, frame.height, self.style.label_offset)?;
        let style = &self.style;

        let buffer = match into_buffer(frame)? {
            PixelBuffer::Rgb(mut image) => {
                draw_grid(&mut image, &geometry, Rgb(style.neutral));
                draw_compass(&mut image, &geometry, style.label_scale, Rgb(style.highlight));
                PixelBuffer::Rgb(image)
            }
            PixelBuffer::Rgba(mut image) => {
                draw_grid(&mut image, &geometry, opaque(style.neutral));
                draw_compass(&mut image, &geometry, style.label_scale, opaque(style.highlight));
                PixelBuffer::Rgba(image)
            }
        };

        Ok(Frame::from(buffer))
    }
}

fn opaque([r, g, b]: [u8; 3]) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LevelsError;
    use crate::raster::PixelFormat;

    fn black(width: u32, height: u32, format: PixelFormat) -> Frame {
        let fill: &[u8] = match format {
            PixelFormat::Rgb => &[0, 0, 0],
            PixelFormat::Rgba => &[0, 0, 0, 255],
        };
        Frame::filled(width, height, format, fill).unwrap()
    }

    #[test]
    fn test_overlay_preserves_shape() {
        let renderer = GridOverlayRenderer::default();
        for format in [PixelFormat::Rgb, PixelFormat::Rgba] {
            let out = renderer.draw_overlay(black(64, 48, format)).unwrap();
            assert_eq!((out.width, out.height, out.format), (64, 48, format));
            assert_eq!(out.data.len(), 64 * 48 * format.channels());
        }
    }

    #[test]
    fn test_compass_drawn_over_grid() {
        let renderer = GridOverlayRenderer::default();
        let out = renderer.draw_overlay(black(100, 100, PixelFormat::Rgb)).unwrap();
        // north ray shares its path with the 0° longitude line
        assert_eq!(out.pixel(50, 20).unwrap(), &DEFAULT_HIGHLIGHT);
        assert_eq!(out.pixel(80, 50).unwrap(), &DEFAULT_HIGHLIGHT);
    }

    #[test]
    fn test_rgba_overlay_is_opaque() {
        let renderer = GridOverlayRenderer::default();
        let out = renderer.draw_overlay(black(100, 100, PixelFormat::Rgba)).unwrap();
        assert_eq!(out.pixel(50, 20).unwrap(), &[255, 215, 0, 255]);
    }

    #[test]
    fn test_custom_style_colors() {
        let renderer = GridOverlayRenderer::new(OverlayStyle {
            highlight: [1, 2, 3],
            ..OverlayStyle::default()
        });
        let out = renderer.draw_overlay(black(100, 100, PixelFormat::Rgb)).unwrap();
        assert_eq!(out.pixel(50, 80).unwrap(), &[1, 2, 3]);
    }

    #[test]
    fn test_zero_size_fails() {
        let frame = Frame {
            data: Vec::new(),
            width: 0,
            height: 0,
            format: PixelFormat::Rgb,
        };
        assert!(matches!(
            GridOverlayRenderer::default().draw_overlay(frame),
            Err(LevelsError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn test_one_pixel_frame_does_not_panic() {
        let out = GridOverlayRenderer::default()
            .draw_overlay(black(1, 1, PixelFormat::Rgb))
            .unwrap();
        assert_eq!(out.data.len(), 3);
    }
}
