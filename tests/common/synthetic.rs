use scene_grid::image::{ChannelOrder, RgbFrame};
use scene_grid::segment::ColorMask;

pub const RED: [u8; 3] = [255, 0, 0];
pub const BLUE: [u8; 3] = [0, 0, 255];
pub const GREEN: [u8; 3] = [0, 255, 0];
pub const WHITE: [u8; 3] = [255, 255, 255];
/// Hue 30 with full saturation: outside every default class.
pub const GROUND: [u8; 3] = [255, 255, 0];

/// Frame filled with one color, stored in `order`.
pub fn solid_frame(w: usize, h: usize, rgb: [u8; 3], order: ChannelOrder) -> RgbFrame {
    let mut frame = RgbFrame::new(w, h, order);
    fill_rect(&mut frame, 0, 0, w, h, rgb);
    frame
}

/// Paint `[x0, x1) × [y0, y1)`, clipped to the frame.
pub fn fill_rect(frame: &mut RgbFrame, x0: usize, y0: usize, x1: usize, y1: usize, rgb: [u8; 3]) {
    for y in y0..y1.min(frame.h) {
        for x in x0..x1.min(frame.w) {
            frame.put_rgb(x, y, rgb);
        }
    }
}

/// 64×64 arena: red start pad, blue goal pad, green obstacle, white wall
/// along the bottom edge.
pub fn arena(order: ChannelOrder) -> RgbFrame {
    let mut frame = solid_frame(64, 64, GROUND, order);
    fill_rect(&mut frame, 10, 20, 16, 26, RED);
    fill_rect(&mut frame, 40, 40, 48, 48, BLUE);
    fill_rect(&mut frame, 30, 5, 40, 15, GREEN);
    fill_rect(&mut frame, 0, 58, 64, 64, WHITE);
    frame
}

/// Mask from ASCII rows: `#` is foreground, anything else background.
pub fn mask_from_rows(class: &str, rows: &[&str]) -> ColorMask {
    let h = rows.len();
    let w = rows.first().map_or(0, |r| r.len());
    ColorMask::from_fn(class, w, h, |x, y| rows[y].as_bytes()[x] == b'#')
}

/// Deterministic xorshift generator for property-style sweeps.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        (x >> 32) as u32
    }

    pub fn below(&mut self, n: usize) -> usize {
        self.next_u32() as usize % n.max(1)
    }
}

/// Frame with random colored rectangles over a random background.
pub fn random_frame(rng: &mut Lcg, w: usize, h: usize) -> RgbFrame {
    let bg = [rng.below(256) as u8, rng.below(256) as u8, rng.below(256) as u8];
    let mut frame = solid_frame(w, h, bg, ChannelOrder::Rgb);
    for _ in 0..6 {
        let x0 = rng.below(w);
        let y0 = rng.below(h);
        let x1 = x0 + 1 + rng.below(w / 2);
        let y1 = y0 + 1 + rng.below(h / 2);
        let rgb = [rng.below(256) as u8, rng.below(256) as u8, rng.below(256) as u8];
        fill_rect(&mut frame, x0, y0, x1, y1, rgb);
    }
    frame
}

/// Random sparse binary mask.
pub fn random_mask(rng: &mut Lcg, class: &str, w: usize, h: usize, density_pct: usize) -> ColorMask {
    ColorMask::from_fn(class, w, h, |_, _| rng.below(100) < density_pct)
}
