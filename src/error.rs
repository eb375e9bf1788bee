//! Error types shared by the rendering pipeline.

use std::path::PathBuf;

/// Errors that can occur while loading, rendering, or exporting images.
///
/// A degenerate black/white range is not an error: the tone mapper resolves
/// it with a step function.
#[derive(Debug, thiserror::Error)]
pub enum LevelsError {
    #[error("Invalid image geometry {width}x{height}: {reason}")]
    InvalidGeometry {
        width: u32,
        height: u32,
        reason: String,
    },

    #[error("Unsupported source '{}': {reason}", path.display())]
    UnsupportedSource {
        /// Path of the raster or metadata file that could not be used
        path: PathBuf,
        /// Human-readable explanation from the decoder
        reason: String,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Failed to parse solar map metadata '{}': {source}", path.display())]
    MetaParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LevelsError {
    /// Build an `InvalidGeometry` error for the given dimensions.
    pub fn geometry(width: u32, height: u32, reason: impl Into<String>) -> Self {
        LevelsError::InvalidGeometry {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Build an `UnsupportedSource` error for the given path.
    pub fn unsupported(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        LevelsError::UnsupportedSource {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LevelsError>;
