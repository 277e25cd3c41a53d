//! Connected-component boundaries of binary masks and their shape statistics.
//!
//! Overview
//! - [`find_external_contours`] labels 8-connected foreground components in
//!   raster order and traces the outer boundary of each with Moore-neighbour
//!   following (Jacob's stopping criterion). Runs of collinear boundary
//!   points are compressed so only direction changes remain.
//! - [`Moments`] computes spatial moments of a contour polygon via Green's
//!   theorem. Components whose boundary encloses no area (single pixels,
//!   one-pixel-wide lines) have `m00 == 0`.
//! - [`geometry`] adds perimeter, convex hull and Douglas–Peucker
//!   simplification for the feature extractor.
//!
//! Determinism: contours come out in the order their first pixel appears in
//! a row-major scan, and each trace starts at that pixel, so identical masks
//! always yield identical contour lists.

pub mod geometry;
mod moments;
mod trace;

pub use moments::Moments;
pub use trace::{find_external_contours, Contour};

use serde::{Deserialize, Serialize};

/// Integer pixel coordinate on a contour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}
