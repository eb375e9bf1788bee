//! Unit tests for side-by-side compositing.

use sunspot_levels::compositor::{compose, CompositeLayout};
use sunspot_levels::raster::{Frame, PixelFormat};
use sunspot_levels::LevelsError;

fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Frame {
    Frame::filled(width, height, PixelFormat::Rgb, &rgb).unwrap()
}

// ==================== Layout Tests ====================

#[test]
fn test_layout_short_then_tall() {
    let layout = CompositeLayout::side_by_side(&[(200, 100), (150, 300)]).unwrap();
    assert_eq!(layout.width, 350);
    assert_eq!(layout.height, 300);
    assert_eq!(layout.offsets, vec![(0, 100), (200, 0)]);
}

#[test]
fn test_layout_rejects_zero_member() {
    assert!(matches!(
        CompositeLayout::side_by_side(&[(10, 10), (0, 5)]),
        Err(LevelsError::InvalidGeometry { .. })
    ));
}

// ==================== Compose Tests ====================

#[test]
fn test_compose_placement_and_transparency() {
    let red = [200, 10, 10];
    let blue = [10, 10, 200];
    let out = compose(vec![solid(200, 100, red), solid(150, 300, blue)])
        .unwrap()
        .expect("two frames produce an image");

    assert_eq!((out.width, out.height), (350, 300));
    assert_eq!(out.format, PixelFormat::Rgba);

    // first frame spans rows 100..200 in columns 0..200
    assert_eq!(out.pixel(0, 99).unwrap(), &[0, 0, 0, 0]);
    assert_eq!(out.pixel(0, 100).unwrap(), &[200, 10, 10, 255]);
    assert_eq!(out.pixel(199, 199).unwrap(), &[200, 10, 10, 255]);
    assert_eq!(out.pixel(199, 200).unwrap(), &[0, 0, 0, 0]);

    // second frame fills the full height from column 200
    assert_eq!(out.pixel(200, 0).unwrap(), &[10, 10, 200, 255]);
    assert_eq!(out.pixel(349, 299).unwrap(), &[10, 10, 200, 255]);
}

#[test]
fn test_compose_no_scaling() {
    let out = compose(vec![solid(3, 3, [1, 1, 1]), solid(5, 5, [2, 2, 2])])
        .unwrap()
        .unwrap();
    let opaque = out
        .data
        .chunks_exact(4)
        .filter(|px| px[3] == 255)
        .count();
    assert_eq!(opaque, 9 + 25);
}

#[test]
fn test_compose_empty_and_single() {
    assert!(compose(Vec::new()).unwrap().is_none());

    let frame = solid(4, 2, [9, 8, 7]);
    assert_eq!(compose(vec![frame.clone()]).unwrap(), Some(frame));
}
