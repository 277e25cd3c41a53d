//! Bilateral filter for 8-bit single-channel images.
//!
//! - Circular window of radius `diameter / 2`.
//! - Spatial weight `exp(-r² / 2σs²)`, range weight `exp(-Δ² / 2σc²)`.
//! - Borders reflect without repeating the edge sample (`dcb|abcd|cba`).
//! - Output is the weighted mean rounded to the nearest integer.
//!
//! Complexity: O(W·H·d²); the weights are tabulated once per call.
use crate::error::ConfigError;
use crate::image::{GrayImage, ImageView};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BilateralParams {
    /// Window diameter in pixels (odd, >= 1).
    pub diameter: usize,
    /// Range sigma in intensity units.
    pub sigma_color: f32,
    /// Spatial sigma in pixels.
    pub sigma_space: f32,
}

impl Default for BilateralParams {
    fn default() -> Self {
        Self {
            diameter: 9,
            sigma_color: 110.0,
            sigma_space: 110.0,
        }
    }
}

impl BilateralParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.diameter == 0 || self.diameter % 2 == 0 {
            return Err(ConfigError::invalid(
                "bilateral.diameter",
                format!("must be odd and positive, got {}", self.diameter),
            ));
        }
        for (name, sigma) in [
            ("bilateral.sigma_color", self.sigma_color),
            ("bilateral.sigma_space", self.sigma_space),
        ] {
            if !(sigma.is_finite() && sigma > 0.0) {
                return Err(ConfigError::invalid(name, format!("must be positive, got {sigma}")));
            }
        }
        Ok(())
    }
}

/// Reflect-101 border index for coordinate `i` on an axis of length `n`.
#[inline]
fn reflect101(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let period = 2 * (n as isize - 1);
    let m = i.rem_euclid(period);
    if m >= n as isize {
        (period - m) as usize
    } else {
        m as usize
    }
}

struct Tap {
    dx: isize,
    dy: isize,
    weight: f32,
}

pub fn bilateral_filter(src: &GrayImage, params: &BilateralParams) -> GrayImage {
    let (w, h) = (src.w, src.h);
    let mut out = GrayImage::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    let radius = (params.diameter / 2).max(1) as isize;
    let space_coeff = -0.5 / (params.sigma_space * params.sigma_space);
    let color_coeff = -0.5 / (params.sigma_color * params.sigma_color);

    let mut color_weight = [0.0f32; 256];
    for (i, cw) in color_weight.iter_mut().enumerate() {
        let d = i as f32;
        *cw = (d * d * color_coeff).exp();
    }

    let mut taps = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let r2 = (dx * dx + dy * dy) as f32;
            if r2.sqrt() > radius as f32 {
                continue;
            }
            taps.push(Tap {
                dx,
                dy,
                weight: (r2 * space_coeff).exp(),
            });
        }
    }

    for y in 0..h {
        let dst = &mut out.data[y * w..(y + 1) * w];
        let center_row = src.row(y);
        for (x, dst_px) in dst.iter_mut().enumerate() {
            let center = center_row[x];
            let mut sum = 0.0f32;
            let mut wsum = 0.0f32;
            for tap in &taps {
                let sx = reflect101(x as isize + tap.dx, w);
                let sy = reflect101(y as isize + tap.dy, h);
                let v = src.get(sx, sy);
                let weight = tap.weight * color_weight[center.abs_diff(v) as usize];
                sum += weight * v as f32;
                wsum += weight;
            }
            *dst_px = (sum / wsum).round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflect101_mirrors_without_repeating_edges() {
        assert_eq!(reflect101(-1, 5), 1);
        assert_eq!(reflect101(-2, 5), 2);
        assert_eq!(reflect101(5, 5), 3);
        assert_eq!(reflect101(6, 5), 2);
        assert_eq!(reflect101(2, 5), 2);
        assert_eq!(reflect101(-7, 3), 1);
        assert_eq!(reflect101(4, 1), 0);
    }

    #[test]
    fn constant_images_are_unchanged() {
        let src = GrayImage::from_raw(5, 4, vec![77; 20]).unwrap();
        let out = bilateral_filter(&src, &BilateralParams::default());
        assert_eq!(out, src);
    }

    #[test]
    fn isolated_spike_is_attenuated() {
        let mut src = GrayImage::new(15, 15);
        src.set(7, 7, 255);
        let out = bilateral_filter(&src, &BilateralParams::default());
        assert!(out.get(7, 7) < 128, "spike survived as {}", out.get(7, 7));
    }

    #[test]
    fn even_diameter_is_rejected() {
        let params = BilateralParams {
            diameter: 8,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
