//! Occupancy grid construction from blocking-class masks.
//!
//! Steps
//! 1. OR every blocking mask (obstacles, boundary lines) into one mask.
//! 2. Smooth it with a bilateral filter. Weights fall off with both spatial
//!    distance and intensity difference, so isolated speckles are pulled
//!    towards their background while solid regions keep sharp borders.
//! 3. Threshold the smoothed image at a fixed cutoff (default 128): samples
//!    at or above it become 1 (blocked), the rest 0 (free).
//!
//! The grid has the frame's resolution; there is no down-sampling. A planner
//! consuming it works on full-resolution pixels.

pub mod bilateral;
mod builder;

pub use bilateral::{bilateral_filter, BilateralParams};
pub use builder::{GridBuildParams, GridBuilder, GridOutput, OccupancyGrid};
