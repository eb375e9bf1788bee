//! Rasterize [`GridGeometry`] onto any `imageproc` canvas.

use imageproc::drawing::{draw_hollow_circle_mut, draw_line_segment_mut, Canvas};

use super::geometry::{circle_touches_raster, GridGeometry, Segment};
use super::glyphs::draw_letter;

fn center_px(center: (f32, f32)) -> (i32, i32) {
    (center.0.round() as i32, center.1.round() as i32)
}

// Circles that can't reach the canvas are skipped so an oversized disk never
// walks its whole outline.
fn draw_circle<C: Canvas>(canvas: &mut C, center: (f32, f32), radius: f32, color: C::Pixel) {
    let (width, height) = canvas.dimensions();
    if circle_touches_raster(center, radius, width, height) {
        draw_hollow_circle_mut(canvas, center_px(center), radius.round() as i32, color);
    }
}

fn draw_segment<C: Canvas>(canvas: &mut C, segment: &Segment, color: C::Pixel) {
    let (width, height) = canvas.dimensions();
    if let Some(visible) = segment.clipped(width, height) {
        draw_line_segment_mut(canvas, visible.start, visible.end, color);
    }
}

/// Latitude circles and longitude diameters.
pub fn draw_grid<C: Canvas>(canvas: &mut C, geometry: &GridGeometry, color: C::Pixel) {
    for &radius in &geometry.latitude_radii {
        draw_circle(canvas, geometry.center, radius, color);
    }
    for line in &geometry.longitude_lines {
        draw_segment(canvas, line, color);
    }
}

/// The outer limb circle at the full disk radius.
pub fn draw_limb<C: Canvas>(canvas: &mut C, geometry: &GridGeometry, color: C::Pixel) {
    draw_circle(canvas, geometry.center, geometry.radius, color);
}

/// The four compass rays and their letters.
pub fn draw_compass<C: Canvas>(
    canvas: &mut C,
    geometry: &GridGeometry,
    label_scale: u32,
    color: C::Pixel,
) {
    for ray in &geometry.compass {
        let segment = Segment {
            start: geometry.center,
            end: ray.end,
        };
        draw_segment(canvas, &segment, color);
    }
    for ray in &geometry.compass {
        draw_letter(
            canvas,
            ray.cardinal.label(),
            ray.label_anchor,
            label_scale,
            color,
        );
    }
}
