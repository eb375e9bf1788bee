//! Turning a solar map into a flat annotated raster.

use image::{Rgb, Rgba};

use super::meta::SolarMapMeta;
use crate::error::Result;
use crate::overlay::{draw_grid, draw_limb, GridGeometry};
use crate::raster::convert::{into_buffer, PixelBuffer};
use crate::raster::Frame;

/// A decoded solar map raster together with its disk metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarMap {
    pub raster: Frame,
    pub meta: SolarMapMeta,
}

/// Renders a [`SolarMap`] into a plain raster with the limb and grid baked in.
///
/// Implementations must not modify the map, so every render pass can start
/// from the same source.
pub trait SolarMapRasterizer {
    fn rasterize(&self, map: &SolarMap) -> Result<Frame>;
}

/// Draws the limb circle and a latitude/longitude grid scaled by the map's
/// own center and radius.
#[derive(Debug, Clone, PartialEq)]
pub struct LimbRasterizer {
    pub limb_color: [u8; 3],
    pub grid_color: [u8; 3],
}

impl Default for LimbRasterizer {
    fn default() -> Self {
        Self {
            limb_color: [255, 255, 255],
            grid_color: [96, 96, 96],
        }
    }
}

impl SolarMapRasterizer for LimbRasterizer {
    fn rasterize(&self, map: &SolarMap) -> Result<Frame> {
        map.raster.ensure_drawable()?;
        // label offset is irrelevant: the limb pass draws no compass
        let geometry = GridGeometry::for_disk(map.meta.center(), map.meta.radius, 0.0);

        let buffer = match into_buffer(map.raster.clone())? {
            PixelBuffer::Rgb(mut image) => {
                draw_grid(&mut image, &geometry, Rgb(self.grid_color));
                draw_limb(&mut image, &geometry, Rgb(self.limb_color));
                PixelBuffer::Rgb(image)
            }
            PixelBuffer::Rgba(mut image) => {
                let [r, g, b] = self.grid_color;
                draw_grid(&mut image, &geometry, Rgba([r, g, b, 255]));
                let [r, g, b] = self.limb_color;
                draw_limb(&mut image, &geometry, Rgba([r, g, b, 255]));
                PixelBuffer::Rgba(image)
            }
        };

        Ok(Frame::from(buffer))
    }
}
