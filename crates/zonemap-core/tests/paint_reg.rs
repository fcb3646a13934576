//! Paint regression test
//!
//! Stamps shapes at point lists and paints positioned masks onto RGB
//! rasters of both depths, checking every written pixel.
//!
//! Run with:
//! ```
//! cargo test -p zonemap-core --test paint_reg
//! ```

use zonemap_core::{Error, ImageKind, PaintOptions, Pix, PixMut, Shape, ShapeKind};
use zonemap_test::RegParams;

fn blank(width: u32, height: u32, kind: ImageKind) -> PixMut {
    Pix::new_with_kind(width, height, kind).unwrap().to_mut()
}

/// Count pixels whose first channel is non-zero.
fn count_painted(pix: &Pix) -> usize {
    let mut n = 0;
    for y in 0..pix.height() {
        for x in 0..pix.width() {
            if pix.get_value(x, y, 0).unwrap_or(0) != 0 {
                n += 1;
            }
        }
    }
    n
}

#[test]
fn paint_reg() {
    let mut rp = RegParams::new("paint");

    // --- Test 1: points from a mask, default red ---
    eprintln!("=== Points from a mask ===");
    let mask = Pix::from_packed_bits(4, 4, &[0b1001_0000, 0b0000_0110]).unwrap();
    let points = mask.set_points().unwrap();
    // Column order: x outer, y inner
    rp.compare_values(4.0, points.len() as f64, 0.0);
    rp.compare_values(1.0, (points[1] == (1, 3)) as u8 as f64, 0.0);

    let mut target = blank(4, 4, ImageKind::Rgb);
    target.paint_pixels(&points, &PaintOptions::new()).unwrap();
    let target: Pix = target.into();
    rp.compare_values(4.0, count_painted(&target) as f64, 0.0);
    rp.compare_values(255.0, target.get_value(3, 0, 0).unwrap() as f64, 0.0);
    rp.compare_values(0.0, target.get_value(3, 0, 1).unwrap() as f64, 0.0);
    rp.compare_values(255.0, target.get_value(1, 3, 0).unwrap() as f64, 0.0);

    // --- Test 2: 16-bit target uses the 16-bit maximum ---
    eprintln!("=== 16-bit default color ===");
    let mut target16 = blank(2, 2, ImageKind::Rgb16);
    target16.paint_pixels(&[(1, 1)], &PaintOptions::new()).unwrap();
    rp.compare_values(65535.0, target16.get_value(1, 1, 0).unwrap() as f64, 0.0);

    // --- Test 3: colors beyond the depth maximum saturate ---
    eprintln!("=== Saturated color ===");
    let loud = PaintOptions::new().with_color(&[256, 300, 1000]);
    let mut target8 = blank(2, 1, ImageKind::Rgb);
    target8.paint_pixels(&[(0, 0)], &loud).unwrap();
    for channel in 0..3 {
        rp.compare_values(255.0, target8.get_value(0, 0, channel).unwrap() as f64, 0.0);
    }
    let dot = Pix::from_packed_bits(1, 1, &[0x80]).unwrap();
    target8.paint_masks(&[dot], &loud).unwrap();
    rp.compare_values(255.0, target8.get_value(0, 0, 1).unwrap() as f64, 0.0);
    let mut target16 = blank(1, 1, ImageKind::Rgb16);
    target16
        .paint_pixels(&[(0, 0)], &PaintOptions::new().with_color(&[70000, 1000, 0]))
        .unwrap();
    rp.compare_values(65535.0, target16.get_value(0, 0, 0).unwrap() as f64, 0.0);
    rp.compare_values(1000.0, target16.get_value(0, 0, 1).unwrap() as f64, 0.0);

    // --- Test 4: cross stamp near the corner is clipped ---
    eprintln!("=== Clipped cross ===");
    let options = PaintOptions::new()
        .with_color(&[10, 20, 30])
        .with_shape(Shape::new(ShapeKind::Cross, 3, true));
    let mut target = blank(5, 5, ImageKind::Rgba);
    target.paint_pixels(&[(0, 0), (4, 4)], &options).unwrap();
    let target: Pix = target.into();
    // Each cross keeps 3 of its 5 pixels
    rp.compare_values(6.0, count_painted(&target) as f64, 0.0);
    rp.compare_values(30.0, target.get_value(1, 0, 2).unwrap() as f64, 0.0);
    // Alpha is not in the color, so it stays opaque
    rp.compare_values(255.0, target.get_value(1, 0, 3).unwrap() as f64, 0.0);

    // --- Test 5: painting a mask equals painting its points ---
    eprintln!("=== Masks versus points ===");
    let mut positioned = mask.to_mut();
    positioned.set_position(3, 2);
    let positioned: Pix = positioned.into();

    let mut by_mask = blank(8, 8, ImageKind::Rgb);
    by_mask
        .paint_masks(std::slice::from_ref(&positioned), &PaintOptions::new())
        .unwrap();
    let shifted: Vec<(i32, i32)> = points.iter().map(|&(x, y)| (x + 3, y + 2)).collect();
    let mut by_points = blank(8, 8, ImageKind::Rgb);
    by_points
        .paint_pixels(&shifted, &PaintOptions::new())
        .unwrap();
    rp.compare_pix(&by_mask.into(), &by_points.into());

    // --- Test 6: preconditions ---
    eprintln!("=== Preconditions ===");
    let mut grey = blank(4, 4, ImageKind::Grey);
    let err = grey.paint_pixels(&points, &PaintOptions::new());
    rp.compare_values(
        1.0,
        matches!(err, Err(Error::InvalidRasterKind { .. })) as u8 as f64,
        0.0,
    );

    let mut target = blank(4, 4, ImageKind::Rgb);
    let not_binary = Pix::new_with_kind(2, 2, ImageKind::Grey).unwrap();
    let err = target.paint_masks(&[not_binary], &PaintOptions::new());
    rp.compare_values(
        1.0,
        matches!(err, Err(Error::InvalidRasterKind { .. })) as u8 as f64,
        0.0,
    );

    let err = target.paint_masks(std::slice::from_ref(&positioned), &PaintOptions::new());
    rp.compare_values(
        1.0,
        matches!(err, Err(Error::OutOfBounds { .. })) as u8 as f64,
        0.0,
    );
    rp.compare_values(0.0, count_painted(&target.into()) as f64, 0.0);

    assert!(rp.cleanup(), "paint regression test failed");
}
