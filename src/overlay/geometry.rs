//! Flat-disk grid geometry.
//!
//! Angles are in degrees, measured clockwise from image-up, so 0° points
//! north (towards row 0) and 90° points east (towards the last column).

use crate::error::{LevelsError, Result};

/// Fraction of the half-size used as the disk radius.
pub const DISK_RADIUS_FRACTION: f32 = 0.95;

/// Latitudes drawn as foreshortened circles.
pub const LATITUDES_DEG: [f32; 2] = [30.0, 60.0];

/// Spacing between longitude lines; 12 lines cover 0°..330°.
pub const LONGITUDE_STEP_DEG: f32 = 30.0;

/// A compass direction with its bearing and label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinal {
    North,
    East,
    South,
    West,
}

impl Cardinal {
    pub const ALL: [Cardinal; 4] = [
        Cardinal::North,
        Cardinal::East,
        Cardinal::South,
        Cardinal::West,
    ];

    /// Bearing in degrees, clockwise from up.
    pub fn bearing_deg(self) -> f32 {
        match self {
            Cardinal::North => 0.0,
            Cardinal::East => 90.0,
            Cardinal::South => 180.0,
            Cardinal::West => 270.0,
        }
    }

    /// Single-letter label drawn past the end of the ray.
    pub fn label(self) -> char {
        match self {
            Cardinal::North => 'N',
            Cardinal::East => 'E',
            Cardinal::South => 'S',
            Cardinal::West => 'W',
        }
    }
}

/// One compass ray from the disk center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompassRay {
    pub cardinal: Cardinal,
    /// Point at the disk radius along the bearing
    pub end: (f32, f32),
    /// Point `label_offset` pixels past `end` along the same bearing
    pub label_anchor: (f32, f32),
}

/// A straight segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: (f32, f32),
    pub end: (f32, f32),
}

impl Segment {
    /// The part of the segment inside a `width` x `height` raster, or `None`
    /// if it misses the raster entirely.
    ///
    /// Liang-Barsky clipping against pixel centers `0..=width-1`, computed in
    /// `f64` so very long segments keep sub-pixel accuracy.
    pub fn clipped(&self, width: u32, height: u32) -> Option<Segment> {
        if width == 0 || height == 0 {
            return None;
        }
        let (x0, y0) = (self.start.0 as f64, self.start.1 as f64);
        let (dx, dy) = (self.end.0 as f64 - x0, self.end.1 as f64 - y0);
        let max_x = (width - 1) as f64;
        let max_y = (height - 1) as f64;

        let mut t0 = 0.0f64;
        let mut t1 = 1.0f64;
        for (p, q) in [(-dx, x0), (dx, max_x - x0), (-dy, y0), (dy, max_y - y0)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
            if t0 > t1 {
                return None;
            }
        }

        Some(Segment {
            start: ((x0 + t0 * dx) as f32, (y0 + t0 * dy) as f32),
            end: ((x0 + t1 * dx) as f32, (y0 + t1 * dy) as f32),
        })
    }
}

/// Whether a circle outline can touch any pixel of a `width` x `height` raster.
///
/// False when the raster lies wholly inside the circle or wholly outside it,
/// with one pixel of slack for rasterization.
pub fn circle_touches_raster(center: (f32, f32), radius: f32, width: u32, height: u32) -> bool {
    if width == 0 || height == 0 {
        return false;
    }
    let (cx, cy) = (center.0 as f64, center.1 as f64);
    let max_x = (width - 1) as f64;
    let max_y = (height - 1) as f64;

    let near_dx = cx - cx.clamp(0.0, max_x);
    let near_dy = cy - cy.clamp(0.0, max_y);
    let nearest = near_dx.hypot(near_dy);
    let far_dx = cx.abs().max((cx - max_x).abs());
    let far_dy = cy.abs().max((cy - max_y).abs());
    let farthest = far_dx.hypot(far_dy);

    let radius = radius as f64;
    radius + 1.0 >= nearest && radius - 1.0 <= farthest
}

/// Everything the overlay draws, in pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    pub center: (f32, f32),
    pub radius: f32,
    pub compass: Vec<CompassRay>,
    /// Radii of the latitude circles, `radius * cos(latitude)`
    pub latitude_radii: Vec<f32>,
    /// Full diameters through the center, one per longitude step
    pub longitude_lines: Vec<Segment>,
}

impl GridGeometry {
    /// Geometry for a disk inscribed in a `width` x `height` raster.
    ///
    /// The center is `(width / 2, height / 2)` and the radius is
    /// [`DISK_RADIUS_FRACTION`] of the smaller half-dimension.
    ///
    /// # Errors
    /// `InvalidGeometry` if either dimension is zero.
    pub fn for_dimensions(width: u32, height: u32, label_offset: f32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(LevelsError::geometry(width, height, "cannot place a disk"));
        }
        let cx = width as f32 / 2.0;
        let cy = height as f32 / 2.0;
        let radius = DISK_RADIUS_FRACTION * cx.min(cy);
        Ok(Self::for_disk((cx, cy), radius, label_offset))
    }

    /// Geometry for an explicit disk center and radius.
    pub fn for_disk(center: (f32, f32), radius: f32, label_offset: f32) -> Self {
        let compass = Cardinal::ALL
            .iter()
            .map(|&cardinal| {
                let bearing = cardinal.bearing_deg();
                CompassRay {
                    cardinal,
                    end: point_on_ray(center, radius, bearing),
                    label_anchor: point_on_ray(center, radius + label_offset, bearing),
                }
            })
            .collect();

        let latitude_radii = LATITUDES_DEG
            .iter()
            .map(|lat| radius * lat.to_radians().cos())
            .collect();

        let steps = (360.0 / LONGITUDE_STEP_DEG) as usize;
        let longitude_lines = (0..steps)
            .map(|i| {
                let bearing = i as f32 * LONGITUDE_STEP_DEG;
                Segment {
                    start: point_on_ray(center, radius, bearing + 180.0),
                    end: point_on_ray(center, radius, bearing),
                }
            })
            .collect();

        Self {
            center,
            radius,
            compass,
            latitude_radii,
            longitude_lines,
        }
    }
}

/// Point at `radius` from `center` along a bearing, clockwise from up.
pub fn point_on_ray(center: (f32, f32), radius: f32, bearing_deg: f32) -> (f32, f32) {
    let angle = bearing_deg.to_radians();
    (
        center.0 + radius * angle.sin(),
        center.1 - radius * angle.cos(),
    )
}
