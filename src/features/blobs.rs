//! Multi-threshold blob keypoints on a gray image.
//!
//! Overview
//! - The image is binarized at `min_threshold, min_threshold + step, …`
//!   (strictly below `max_threshold`). At each level the outer contours of
//!   regions matching `blob_color` become candidate blobs, subject to the
//!   optional area, circularity, convexity and inertia filters.
//! - Candidates from successive levels that sit within
//!   `min_dist_between_blobs` (and inside each other's radius) are grouped.
//! - A group seen at `min_repeatability` levels or more becomes a keypoint at
//!   the mean of its centers, with the diameter of its median-radius member.
use crate::contours::geometry::{arc_length, convex_hull, polygon_area};
use crate::contours::{find_external_contours, Point};
use crate::error::ConfigError;
use crate::image::GrayImage;
use crate::segment::ColorMask;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlobParams {
    pub min_threshold: u8,
    pub max_threshold: u8,
    pub threshold_step: u8,
    /// Levels a blob must appear in to be reported.
    pub min_repeatability: usize,
    pub min_dist_between_blobs: f64,
    /// 255 finds bright blobs, 0 dark ones.
    pub blob_color: u8,
    /// Area bounds in pixels; `None` disables that side.
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    /// `4π·area / perimeter²`.
    pub min_circularity: Option<f64>,
    /// Area over convex hull area.
    pub min_convexity: Option<f64>,
    /// Minor over major principal inertia.
    pub min_inertia_ratio: Option<f64>,
}

impl Default for BlobParams {
    fn default() -> Self {
        Self {
            min_threshold: 10,
            max_threshold: 200,
            threshold_step: 10,
            min_repeatability: 2,
            min_dist_between_blobs: 10.0,
            blob_color: 255,
            min_area: Some(10.0),
            max_area: Some(5000.0),
            min_circularity: Some(0.1),
            min_convexity: Some(0.87),
            min_inertia_ratio: Some(0.01),
        }
    }
}

impl BlobParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threshold_step == 0 {
            return Err(ConfigError::invalid("blobs.threshold_step", "must be positive"));
        }
        if self.min_threshold >= self.max_threshold {
            return Err(ConfigError::invalid(
                "blobs.min_threshold",
                format!(
                    "must be below max_threshold ({} >= {})",
                    self.min_threshold, self.max_threshold
                ),
            ));
        }
        if self.min_repeatability == 0 {
            return Err(ConfigError::invalid("blobs.min_repeatability", "must be at least 1"));
        }
        if !(self.min_dist_between_blobs.is_finite() && self.min_dist_between_blobs >= 0.0) {
            return Err(ConfigError::invalid(
                "blobs.min_dist_between_blobs",
                "must be non-negative",
            ));
        }
        if self.blob_color != 0 && self.blob_color != 255 {
            return Err(ConfigError::invalid(
                "blobs.blob_color",
                format!("must be 0 or 255, got {}", self.blob_color),
            ));
        }
        Ok(())
    }

    fn levels(&self) -> impl Iterator<Item = u8> + '_ {
        (self.min_threshold..self.max_threshold).step_by(self.threshold_step as usize)
    }
}

/// A repeatable blob: sub-pixel center and diameter in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BlobKeypoint {
    pub x: f64,
    pub y: f64,
    pub diameter: f64,
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    center: Vector2<f64>,
    radius: f64,
}

/// Detect blob keypoints in `image`, ordered by first appearance.
pub fn detect_blobs(image: &GrayImage, params: &BlobParams) -> Vec<BlobKeypoint> {
    let mut groups: Vec<Vec<Candidate>> = Vec::new();
    for level in params.levels() {
        let bright = params.blob_color == 255;
        let binary = ColorMask::from_fn("level", image.w, image.h, |x, y| {
            (image.get(x, y) > level) == bright
        });
        for cand in level_candidates(&binary, params) {
            merge_candidate(&mut groups, cand, params.min_dist_between_blobs);
        }
    }

    groups
        .iter()
        .filter(|g| g.len() >= params.min_repeatability)
        .map(|g| {
            let sum: Vector2<f64> = g.iter().map(|c| c.center).sum();
            let mean = sum / g.len() as f64;
            BlobKeypoint {
                x: mean.x,
                y: mean.y,
                diameter: 2.0 * g[g.len() / 2].radius,
            }
        })
        .collect()
}

fn merge_candidate(groups: &mut Vec<Vec<Candidate>>, cand: Candidate, min_dist: f64) {
    for group in groups.iter_mut() {
        let rep = group[group.len() / 2];
        let dist = (rep.center - cand.center).norm();
        if dist < min_dist || dist < rep.radius || dist < cand.radius {
            let pos = group
                .iter()
                .position(|c| c.radius > cand.radius)
                .unwrap_or(group.len());
            group.insert(pos, cand);
            return;
        }
    }
    groups.push(vec![cand]);
}

fn level_candidates(binary: &ColorMask, params: &BlobParams) -> Vec<Candidate> {
    let mut out = Vec::new();
    for contour in find_external_contours(binary.view()) {
        let m = contour.moments();
        let Some((cx, cy)) = m.centroid() else {
            continue;
        };
        let area = m.m00;
        if params.min_area.is_some_and(|min| area < min)
            || params.max_area.is_some_and(|max| area >= max)
        {
            continue;
        }
        if let Some(min) = params.min_circularity {
            let perimeter = arc_length(&contour.points, true);
            if 4.0 * std::f64::consts::PI * area / (perimeter * perimeter) < min {
                continue;
            }
        }
        if let Some(min) = params.min_convexity {
            let hull_area = polygon_area(&convex_hull(&contour.points));
            if hull_area <= 0.0 || area / hull_area < min {
                continue;
            }
        }
        if params.min_inertia_ratio.is_some_and(|min| m.inertia_ratio() < min) {
            continue;
        }
        let (px, py) = (cx.round() as usize, cy.round() as usize);
        if px >= binary.image.w || py >= binary.image.h || !binary.is_on(px, py) {
            continue;
        }
        let center = Vector2::new(cx, cy);
        out.push(Candidate {
            center,
            radius: median_distance(&contour.points, center),
        });
    }
    out
}

fn median_distance(points: &[Point], center: Vector2<f64>) -> f64 {
    let mut dists: Vec<f64> = points
        .iter()
        .map(|p| (Vector2::new(p.x as f64, p.y as f64) - center).norm())
        .collect();
    dists.sort_by(f64::total_cmp);
    let n = dists.len();
    if n % 2 == 0 {
        0.5 * (dists[n / 2 - 1] + dists[n / 2])
    } else {
        dists[n / 2]
    }
}
