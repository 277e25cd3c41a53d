//! Minimal raster drawing for diagnostic overlays.
//!
//! Shapes are clipped to the canvas; nothing here can panic on coordinates
//! outside the frame.
use crate::contours::Point;
use crate::image::RgbFrame;

pub const GREEN: [u8; 3] = [0, 255, 0];
pub const RED: [u8; 3] = [255, 0, 0];
pub const YELLOW: [u8; 3] = [255, 255, 0];

#[inline]
fn put_clipped(canvas: &mut RgbFrame, x: i32, y: i32, color: [u8; 3]) {
    if x >= 0 && y >= 0 && (x as usize) < canvas.w && (y as usize) < canvas.h {
        canvas.put_rgb(x as usize, y as usize, color);
    }
}

/// Square brush of side `thickness` (at least one pixel).
fn stamp(canvas: &mut RgbFrame, x: i32, y: i32, color: [u8; 3], thickness: usize) {
    let t = thickness.max(1) as i32;
    let lo = -(t - 1) / 2;
    for dy in lo..lo + t {
        for dx in lo..lo + t {
            put_clipped(canvas, x + dx, y + dy, color);
        }
    }
}

/// Bresenham line between two points.
pub fn draw_line(canvas: &mut RgbFrame, a: Point, b: Point, color: [u8; 3], thickness: usize) {
    let (mut x, mut y) = (a.x, a.y);
    let dx = (b.x - a.x).abs();
    let dy = -(b.y - a.y).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        stamp(canvas, x, y, color, thickness);
        if x == b.x && y == b.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

pub fn draw_polyline(
    canvas: &mut RgbFrame,
    points: &[Point],
    closed: bool,
    color: [u8; 3],
    thickness: usize,
) {
    match points {
        [] => {}
        [only] => stamp(canvas, only.x, only.y, color, thickness),
        _ => {
            for pair in points.windows(2) {
                draw_line(canvas, pair[0], pair[1], color, thickness);
            }
            if closed {
                draw_line(canvas, points[points.len() - 1], points[0], color, thickness);
            }
        }
    }
}

pub fn fill_circle(canvas: &mut RgbFrame, cx: i32, cy: i32, radius: i32, color: [u8; 3]) {
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                put_clipped(canvas, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Hollow circle outline, used for keypoint markers.
pub fn draw_circle(canvas: &mut RgbFrame, cx: i32, cy: i32, radius: i32, color: [u8; 3]) {
    let inner = (radius - 1).max(0).pow(2);
    let outer = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let d2 = dx * dx + dy * dy;
            if d2 <= outer && d2 > inner {
                put_clipped(canvas, cx + dx, cy + dy, color);
            }
        }
    }
}
