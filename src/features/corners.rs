//! Corner detection on binary masks (Harris or Shi–Tomasi).
//!
//! Steps
//! 1. Sobel gradients of the mask scaled to `[0, 1]`.
//! 2. Structure tensor `M = Σ [gx², gxgy; gxgy, gy²]` over a square
//!    `block_size` window (taps outside the image are skipped).
//! 3. Response: `det(M) − k·trace(M)²` (Harris) or the smaller eigenvalue of
//!    `M` (Shi–Tomasi).
//! 4. Keep pixels with response `>= quality_level × max` that are 3×3 local
//!    maxima, then accept them strongest first while they are at least
//!    `min_distance` from every accepted corner, up to `max_corners`.
//!
//! Ordering is total: response descending, then `(y, x)` ascending.
use super::gradient::sobel_gradients;
use crate::error::ConfigError;
use crate::image::{GrayImage, ImageF32};
use nalgebra::{Matrix2, SymmetricEigen};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerMethod {
    Harris,
    #[default]
    ShiTomasi,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CornerParams {
    pub method: CornerMethod,
    /// Upper bound on returned corners; 0 means unlimited.
    pub max_corners: usize,
    /// Fraction of the strongest response a corner must reach, in `(0, 1]`.
    pub quality_level: f32,
    /// Minimum Euclidean spacing between accepted corners, in pixels.
    pub min_distance: f32,
    /// Side of the structure-tensor window (odd).
    pub block_size: usize,
    /// Harris trace weight.
    pub harris_k: f32,
}

impl Default for CornerParams {
    fn default() -> Self {
        Self {
            method: CornerMethod::default(),
            max_corners: 100,
            quality_level: 0.01,
            min_distance: 10.0,
            block_size: 3,
            harris_k: 0.04,
        }
    }
}

impl CornerParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.quality_level > 0.0 && self.quality_level <= 1.0) {
            return Err(ConfigError::invalid(
                "corners.quality_level",
                format!("must lie in (0, 1], got {}", self.quality_level),
            ));
        }
        if !(self.min_distance.is_finite() && self.min_distance >= 0.0) {
            return Err(ConfigError::invalid(
                "corners.min_distance",
                format!("must be non-negative, got {}", self.min_distance),
            ));
        }
        if self.block_size == 0 || self.block_size % 2 == 0 {
            return Err(ConfigError::invalid(
                "corners.block_size",
                format!("must be odd and positive, got {}", self.block_size),
            ));
        }
        if !self.harris_k.is_finite() {
            return Err(ConfigError::invalid("corners.harris_k", "must be finite"));
        }
        Ok(())
    }
}

/// A detected corner at integer pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Corner {
    pub x: usize,
    pub y: usize,
    pub response: f32,
}

/// Per-pixel corner response of `mask` under `params`.
pub fn corner_response(mask: &GrayImage, params: &CornerParams) -> ImageF32 {
    let (w, h) = (mask.w, mask.h);
    let mut unit = ImageF32::from_gray(mask);
    for v in unit.data.iter_mut() {
        *v /= 255.0;
    }
    let grads = sobel_gradients(&unit);

    let mut sxx = ImageF32::new(w, h);
    let mut syy = ImageF32::new(w, h);
    let mut sxy = ImageF32::new(w, h);
    for i in 0..w * h {
        let (gx, gy) = (grads.gx.data[i], grads.gy.data[i]);
        sxx.data[i] = gx * gx;
        syy.data[i] = gy * gy;
        sxy.data[i] = gx * gy;
    }
    let r = params.block_size / 2;
    let sxx = box_sum(&sxx, r);
    let syy = box_sum(&syy, r);
    let sxy = box_sum(&sxy, r);

    let mut response = ImageF32::new(w, h);
    for i in 0..w * h {
        let (a, b, c) = (sxx.data[i], syy.data[i], sxy.data[i]);
        response.data[i] = match params.method {
            CornerMethod::Harris => {
                let trace = a + b;
                a * b - c * c - params.harris_k * trace * trace
            }
            CornerMethod::ShiTomasi => {
                let eig = SymmetricEigen::new(Matrix2::new(a, c, c, b)).eigenvalues;
                eig[0].min(eig[1])
            }
        };
    }
    response
}

/// Detect corners on a binary mask image.
pub fn detect_corners(mask: &GrayImage, params: &CornerParams) -> Vec<Corner> {
    let response = corner_response(mask, params);
    let max = response.max_value();
    if max <= 0.0 {
        return Vec::new();
    }
    let cutoff = params.quality_level * max;

    let mut candidates = Vec::new();
    for y in 0..response.h {
        for x in 0..response.w {
            let v = response.get(x, y);
            if v >= cutoff && is_local_max(&response, x, y) {
                candidates.push(Corner { x, y, response: v });
            }
        }
    }
    candidates.sort_by(corner_order);

    let min_d2 = params.min_distance * params.min_distance;
    let mut accepted: Vec<Corner> = Vec::new();
    for c in candidates {
        if params.max_corners > 0 && accepted.len() >= params.max_corners {
            break;
        }
        let far_enough = accepted.iter().all(|a| {
            let dx = a.x as f32 - c.x as f32;
            let dy = a.y as f32 - c.y as f32;
            dx * dx + dy * dy >= min_d2
        });
        if far_enough {
            accepted.push(c);
        }
    }
    accepted
}

fn corner_order(a: &Corner, b: &Corner) -> Ordering {
    b.response
        .total_cmp(&a.response)
        .then(a.y.cmp(&b.y))
        .then(a.x.cmp(&b.x))
}

fn is_local_max(img: &ImageF32, x: usize, y: usize) -> bool {
    let v = img.get(x, y);
    for yy in y.saturating_sub(1)..=(y + 1).min(img.h - 1) {
        for xx in x.saturating_sub(1)..=(x + 1).min(img.w - 1) {
            if img.get(xx, yy) > v {
                return false;
            }
        }
    }
    true
}

/// Sum over a `(2r+1)²` window, skipping taps outside the image.
fn box_sum(src: &ImageF32, r: usize) -> ImageF32 {
    let (w, h) = (src.w, src.h);
    let mut horiz = ImageF32::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let lo = x.saturating_sub(r);
            let hi = (x + r).min(w - 1);
            let s: f32 = (lo..=hi).map(|xx| src.get(xx, y)).sum();
            horiz.set(x, y, s);
        }
    }
    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        let lo = y.saturating_sub(r);
        let hi = (y + r).min(h - 1);
        for x in 0..w {
            let s: f32 = (lo..=hi).map(|yy| horiz.get(x, yy)).sum();
            out.set(x, y, s);
        }
    }
    out
}
