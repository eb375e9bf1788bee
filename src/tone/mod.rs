//! Tone mapping: black point, white point, and gamma remapping.
//!
//! A [`ToneLut`] is built once per [`LevelParams`] change and then applied to
//! every channel of every pixel with [`apply`].

mod lut;
mod params;

pub use lut::{ToneLut, LUT_SIZE};
pub use params::{LevelParams, GAMMA_MAX, GAMMA_MIN, GAMMA_STEP};

use crate::error::Result;
use crate::raster::Frame;

/// Map every color channel of `frame` through `lut`, producing a new frame.
///
/// Alpha passes through unchanged. The output has the same dimensions and
/// pixel format as the input.
///
/// # Errors
/// `InvalidGeometry` if the frame is empty or its buffer is the wrong size.
pub fn apply(frame: &Frame, lut: &ToneLut) -> Result<Frame> {
    frame.ensure_drawable()?;

    let bpp = frame.bytes_per_pixel();
    let color_channels = if frame.format.has_alpha() { bpp - 1 } else { bpp };

    let mut data = Vec::with_capacity(frame.data.len());
    for pixel in frame.data.chunks_exact(bpp) {
        for (c, &value) in pixel.iter().enumerate() {
            data.push(if c < color_channels { lut.map(value) } else { value });
        }
    }

    Ok(Frame {
        data,
        width: frame.width,
        height: frame.height,
        format: frame.format,
    })
}
