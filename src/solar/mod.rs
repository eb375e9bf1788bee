//! Calibrated solar maps: raster plus disk metadata.

mod meta;
mod rasterizer;

pub use meta::{SolarMapMeta, MAX_DISK_EXTENT};
pub use rasterizer::{LimbRasterizer, SolarMap, SolarMapRasterizer};
