//! sunspot-levels library crate.
//!
//! Tone mapping, grid overlay, and side-by-side compositing for solar images.
//! The binary wraps these in a CLI; the modules are public for integration
//! testing.

pub mod cli;
pub mod compositor;
pub mod config;
pub mod error;
pub mod export;
pub mod overlay;
pub mod raster;
pub mod session;
pub mod solar;
pub mod source;
pub mod tone;

pub use error::{LevelsError, Result};
pub use raster::{Frame, PixelFormat};
