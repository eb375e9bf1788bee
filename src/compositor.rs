//! Side-by-side layout of rendered images.

use image::imageops;
use image::{Rgba, RgbaImage};

use crate::error::{LevelsError, Result};
use crate::raster::convert::into_dynamic;
use crate::raster::Frame;

/// Where each member of a composite lands on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeLayout {
    pub width: u32,
    pub height: u32,
    /// Top-left corner of each member, in input order
    pub offsets: Vec<(u32, u32)>,
}

impl CompositeLayout {
    /// Left-to-right layout, each member vertically centered.
    ///
    /// Canvas width is the sum of member widths and height is the tallest
    /// member; a member of height `h` sits at `y = (height - h) / 2`, rounded down.
    pub fn side_by_side(sizes: &[(u32, u32)]) -> Result<Self> {
        if let Some(&(w, h)) = sizes.iter().find(|(w, h)| *w == 0 || *h == 0) {
            return Err(LevelsError::geometry(w, h, "cannot composite an empty image"));
        }

        let height = sizes.iter().map(|&(_, h)| h).max().unwrap_or(0);
        let mut offsets = Vec::with_capacity(sizes.len());
        let mut x = 0u32;
        for &(w, h) in sizes {
            offsets.push((x, (height - h) / 2));
            x = x.checked_add(w).ok_or_else(|| {
                LevelsError::geometry(w, h, "combined width overflows the canvas")
            })?;
        }

        Ok(Self {
            width: x,
            height,
            offsets,
        })
    }
}

/// Combine rendered images into one.
///
/// - no images: `Ok(None)`, nothing to render
/// - one image: returned as-is, without copying
/// - several: pasted left to right onto an RGBA canvas; pixels no image
///   covers stay fully transparent
///
/// Images are never scaled.
///
/// # Errors
/// `InvalidGeometry` if any image has a zero dimension.
pub fn compose(mut frames: Vec<Frame>) -> Result<Option<Frame>> {
    if frames.len() <= 1 {
        return match frames.pop() {
            Some(frame) => {
                frame.ensure_drawable()?;
                Ok(Some(frame))
            }
            None => Ok(None),
        };
    }

    for frame in &frames {
        frame.ensure_drawable()?;
    }
    let sizes: Vec<(u32, u32)> = frames.iter().map(|f| (f.width, f.height)).collect();
    let layout = CompositeLayout::side_by_side(&sizes)?;

    let mut canvas = RgbaImage::from_pixel(layout.width, layout.height, Rgba([0, 0, 0, 0]));
    for (frame, &(x, y)) in frames.into_iter().zip(&layout.offsets) {
        let member = into_dynamic(frame)?.into_rgba8();
        imageops::replace(&mut canvas, &member, i64::from(x), i64::from(y));
    }

    Ok(Some(Frame::from(canvas)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::PixelFormat;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Frame {
        Frame::filled(width, height, PixelFormat::Rgb, &rgb).unwrap()
    }

    #[test]
    fn test_empty_is_nothing_to_render() {
        assert_eq!(compose(Vec::new()).unwrap(), None);
    }

    #[test]
    fn test_single_passthrough() {
        let frame = solid(5, 4, [1, 2, 3]);
        let out = compose(vec![frame.clone()]).unwrap().unwrap();
        assert_eq!(out, frame);
        assert_eq!(out.format, PixelFormat::Rgb);
    }

    #[test]
    fn test_layout_offsets() {
        let layout = CompositeLayout::side_by_side(&[(200, 100), (150, 300)]).unwrap();
        assert_eq!((layout.width, layout.height), (350, 300));
        assert_eq!(layout.offsets, vec![(0, 100), (200, 0)]);
    }

    #[test]
    fn test_layout_floors_odd_gap() {
        let layout = CompositeLayout::side_by_side(&[(10, 10), (10, 13)]).unwrap();
        assert_eq!(layout.offsets[0], (0, 1));
    }

    #[test]
    fn test_two_frames_transparent_padding() {
        let out = compose(vec![solid(2, 2, [255, 0, 0]), solid(3, 4, [0, 0, 255])])
            .unwrap()
            .unwrap();
        assert_eq!((out.width, out.height, out.format), (5, 4, PixelFormat::Rgba));
        // left image occupies rows 1..3
        assert_eq!(out.pixel(0, 0).unwrap(), &[0, 0, 0, 0]);
        assert_eq!(out.pixel(1, 1).unwrap(), &[255, 0, 0, 255]);
        assert_eq!(out.pixel(1, 3).unwrap(), &[0, 0, 0, 0]);
        assert_eq!(out.pixel(4, 0).unwrap(), &[0, 0, 255, 255]);
    }

    #[test]
    fn test_zero_size_member_fails() {
        let empty = Frame {
            data: Vec::new(),
            width: 0,
            height: 3,
            format: PixelFormat::Rgb,
        };
        assert!(matches!(
            compose(vec![solid(2, 2, [0, 0, 0]), empty]),
            Err(LevelsError::InvalidGeometry { .. })
        ));
    }
}
