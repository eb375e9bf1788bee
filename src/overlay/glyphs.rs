//! Bitmap glyphs for the compass labels.
//!
//! Only the four cardinal letters are needed, so a 5x7 bitmap per letter is
//! drawn directly instead of loading a font.

use imageproc::drawing::Canvas;

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;

/// Rows of a 5x7 glyph, most significant of the low 5 bits is the leftmost column.
fn glyph_rows(letter: char) -> Option<[u8; 7]> {
    let rows = match letter {
        'N' => [
            0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001,
        ],
        'E' => [
            0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111,
        ],
        'S' => [
            0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110,
        ],
        'W' => [
            0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010,
        ],
        _ => return None,
    };
    Some(rows)
}

/// Top-left corner of a `box_w` x `box_h` box centered on `anchor`, shifted
/// so the box stays inside a `width` x `height` canvas.
///
/// When the canvas is smaller than the box the box is pinned at the origin
/// and clipped on draw.
pub fn label_origin(
    anchor: (f32, f32),
    box_w: u32,
    box_h: u32,
    width: u32,
    height: u32,
) -> (i64, i64) {
    let place = |center: f32, size: u32, limit: u32| -> i64 {
        let start = (center - size as f32 / 2.0).round() as i64;
        let max_start = (limit as i64 - size as i64).max(0);
        start.clamp(0, max_start)
    };
    (place(anchor.0, box_w, width), place(anchor.1, box_h, height))
}

/// Draw one letter scaled by `scale`, centered on `anchor`.
///
/// Unknown letters are skipped. Pixels outside the canvas are clipped.
pub fn draw_letter<C: Canvas>(
    canvas: &mut C,
    letter: char,
    anchor: (f32, f32),
    scale: u32,
    color: C::Pixel,
) {
    let Some(rows) = glyph_rows(letter) else {
        return;
    };
    let scale = scale.max(1);
    let (width, height) = canvas.dimensions();
    let (x0, y0) = label_origin(
        anchor,
        GLYPH_WIDTH * scale,
        GLYPH_HEIGHT * scale,
        width,
        height,
    );

    for (row, bits) in rows.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                continue;
            }
            for dy in 0..scale {
                for dx in 0..scale {
                    let px = x0 + (col * scale + dx) as i64;
                    let py = y0 + (row as u32 * scale + dy) as i64;
                    if px >= 0 && py >= 0 && px < width as i64 && py < height as i64 {
                        canvas.draw_pixel(px as u32, py as u32, color);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_known_letters() {
        for letter in ['N', 'E', 'S', 'W'] {
            assert!(glyph_rows(letter).is_some());
        }
        assert!(glyph_rows('X').is_none());
    }

    #[test]
    fn test_origin_centered_when_room() {
        assert_eq!(label_origin((50.0, 50.0), 10, 14, 100, 100), (45, 43));
    }

    #[test]
    fn test_origin_clamped_inside() {
        assert_eq!(label_origin((-10.0, 120.0), 10, 14, 100, 100), (0, 86));
    }

    #[test]
    fn test_origin_pinned_on_tiny_canvas() {
        assert_eq!(label_origin((3.0, 3.0), 10, 14, 4, 4), (0, 0));
    }

    #[test]
    fn test_draw_letter_e_top_bar() {
        let mut img = RgbImage::new(20, 20);
        let red = Rgb([255, 0, 0]);
        draw_letter(&mut img, 'E', (10.0, 10.0), 1, red);
        let (x0, y0) = label_origin((10.0, 10.0), 5, 7, 20, 20);
        for col in 0..5 {
            assert_eq!(*img.get_pixel(x0 as u32 + col, y0 as u32), red);
        }
        assert_eq!(*img.get_pixel(x0 as u32 + 1, y0 as u32 + 1), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_draw_letter_clips_on_tiny_canvas() {
        let mut img = RgbImage::new(3, 3);
        draw_letter(&mut img, 'W', (1.0, 1.0), 2, Rgb([1, 2, 3]));
        // W's first row has its left column set
        assert_eq!(*img.get_pixel(0, 0), Rgb([1, 2, 3]));
    }
}
