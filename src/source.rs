//! Loading source images from disk.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{LevelsError, Result};
use crate::raster::convert::from_dynamic;
use crate::raster::Frame;
use crate::solar::{SolarMap, SolarMapMeta, SolarMapRasterizer};

/// Decode a photo from disk, converting it to RGB.
///
/// # Errors
/// `UnsupportedSource` if the file can't be opened or decoded.
pub fn load_photo(path: &Path) -> Result<Frame> {
    let image = image::open(path).map_err(|e| LevelsError::unsupported(path, e.to_string()))?;
    let frame = from_dynamic(image);
    frame
        .ensure_drawable()
        .map_err(|e| LevelsError::unsupported(path, e.to_string()))?;
    log::info!(
        "Loaded {} ({}x{})",
        path.display(),
        frame.width,
        frame.height
    );
    Ok(frame)
}

/// Decode a solar map raster and its TOML metadata sidecar.
pub fn load_solar_map(raster: &Path, meta: &Path) -> Result<SolarMap> {
    let meta = SolarMapMeta::load(meta)?;
    let raster = load_photo(raster)?;
    Ok(SolarMap { raster, meta })
}

/// An image loaded into a session slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceImage {
    Photo(Frame),
    SolarMap(SolarMap),
}

impl SourceImage {
    /// Load a photo, or a solar map when a metadata path is given.
    pub fn load(path: &Path, meta: Option<&Path>) -> Result<Self> {
        match meta {
            Some(meta) => load_solar_map(path, meta).map(SourceImage::SolarMap),
            None => load_photo(path).map(SourceImage::Photo),
        }
    }

    /// The flat raster a render pass starts from.
    ///
    /// Photos are cloned; solar maps go through `rasterizer`. The source is
    /// never modified.
    pub fn to_raster(&self, rasterizer: &dyn SolarMapRasterizer) -> Result<Frame> {
        match self {
            SourceImage::Photo(frame) => Ok(frame.clone()),
            SourceImage::SolarMap(map) => rasterizer.rasterize(map),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        let frame = match self {
            SourceImage::Photo(frame) => frame,
            SourceImage::SolarMap(map) => &map.raster,
        };
        (frame.width, frame.height)
    }
}

/// A loaded source together with the paths it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSource {
    pub path: PathBuf,
    pub meta_path: Option<PathBuf>,
    pub image: SourceImage,
}

impl LoadedSource {
    pub fn load(path: &Path, meta: Option<&Path>) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            meta_path: meta.map(Path::to_path_buf),
            image: SourceImage::load(path, meta)?,
        })
    }
}

impl fmt::Display for LoadedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.image.dimensions();
        let kind = match self.image {
            SourceImage::Photo(_) => "photo",
            SourceImage::SolarMap(_) => "solar map",
        };
        write!(f, "{} ({}, {}x{})", self.path.display(), kind, width, height)
    }
}
