#![allow(dead_code)]

use lib_grid::{Color, Raster};

pub const RED: Color = Color::rgb(255, 0, 0);
pub const GREEN: Color = Color::rgb(0, 255, 0);
pub const HALF_GREEN: Color = Color::rgba(0, 255, 0, 128);

/// 4x2 raster where every pixel differs:
///
/// ```text
/// (0,0) (1,0) (2,0) (3,0)
/// (0,1) (1,1) (2,1) (3,1)
/// ```
/// encoded as rgb(x * 10, y * 10, 0).
pub fn gradient_4x2() -> Raster {
    let pixels = (0..2u8)
        .flat_map(|y| (0..4u8).map(move |x| Color::rgb(x * 10, y * 10, 0)))
        .collect();
    Raster::from_pixels(4, 2, pixels).unwrap()
}
