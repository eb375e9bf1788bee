//! Raster buffers passed between pipeline stages.
//!
//! - [`Frame`] holds packed 8-bit RGB or RGBA pixels
//! - [`convert`] moves frames in and out of `image` crate buffers

pub mod convert;
mod types;

pub use types::{Frame, PixelFormat};
