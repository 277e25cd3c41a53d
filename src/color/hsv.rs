use crate::image::RgbFrame;

/// Exclusive upper end of the 8-bit hue scale (degrees halved).
pub const HUE_MAX: u8 = 180;

/// Convert one RGB sample to 8-bit HSV.
///
/// `V = max(r, g, b)`, `S = 255 · (V − min) / V`, hue in degrees from the
/// dominant channel, halved and rounded. A grey pixel has hue and saturation
/// 0. A hue that rounds up to 180 wraps to 0.
pub fn rgb_to_hsv(rgb: [u8; 3]) -> [u8; 3] {
    let [r, g, b] = rgb.map(|c| c as f32);
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = v - min;

    let s = if v > 0.0 { 255.0 * diff / v } else { 0.0 };

    let h_deg = if diff == 0.0 {
        0.0
    } else if v == r {
        60.0 * (g - b) / diff
    } else if v == g {
        120.0 + 60.0 * (b - r) / diff
    } else {
        240.0 + 60.0 * (r - g) / diff
    };
    let h_deg = if h_deg < 0.0 { h_deg + 360.0 } else { h_deg };

    let mut h = (h_deg / 2.0).round() as u32;
    if h >= HUE_MAX as u32 {
        h -= HUE_MAX as u32;
    }
    [h as u8, s.round() as u8, v as u8]
}

/// Interleaved HSV samples with the frame's dimensions.
#[derive(Clone, Debug)]
pub struct HsvImage {
    pub w: usize,
    pub h: usize,
    pub data: Vec<[u8; 3]>,
}

/// Convert a whole frame, honouring its channel order.
pub fn frame_to_hsv(frame: &RgbFrame) -> HsvImage {
    let mut data = Vec::with_capacity(frame.w * frame.h);
    for y in 0..frame.h {
        for x in 0..frame.w {
            data.push(rgb_to_hsv(frame.rgb_at(x, y)));
        }
    }
    HsvImage {
        w: frame.w,
        h: frame.h,
        data,
    }
}
