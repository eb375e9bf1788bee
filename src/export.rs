//! PNG encoding and file output.

use chrono::{DateTime, Local};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::raster::{Frame, PixelFormat};

/// What a rendered image contains, for naming the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// A single adjusted image
    Adjusted,
    /// A side-by-side composite
    View,
}

impl ExportKind {
    pub fn prefix(self) -> &'static str {
        match self {
            ExportKind::Adjusted => "adjusted",
            ExportKind::View => "view",
        }
    }
}

/// Default export file name, e.g. `adjusted_20240408_181502.png`.
pub fn default_filename(kind: ExportKind, at: DateTime<Local>) -> String {
    format!("{}_{}.png", kind.prefix(), at.format("%Y%m%d_%H%M%S"))
}

/// Default export path in `directory` for an image rendered now.
pub fn default_path(directory: &Path, kind: ExportKind) -> PathBuf {
    directory.join(default_filename(kind, Local::now()))
}

/// Encode a frame as PNG.
///
/// # Errors
/// `InvalidGeometry` for an empty frame, `Encode` if the encoder fails.
pub fn encode_png(frame: &Frame) -> Result<Vec<u8>> {
    frame.ensure_drawable()?;
    let color = match frame.format {
        PixelFormat::Rgb => ExtendedColorType::Rgb8,
        PixelFormat::Rgba => ExtendedColorType::Rgba8,
    };
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(&frame.data, frame.width, frame.height, color)?;
    Ok(bytes)
}

/// Write encoded bytes to `path`, replacing any existing file.
pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes)?;
    log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Encode `frame` as PNG and write it to `path`.
pub fn export_png(frame: &Frame, path: &Path) -> Result<()> {
    let bytes = encode_png(frame)?;
    write_bytes(path, &bytes)
}
