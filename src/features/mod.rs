//! Geometric descriptors of a boundary mask.
//!
//! - [`corners`]: Harris / Shi–Tomasi corners over Sobel gradients.
//! - Contour polygons from [`crate::contours`], optionally simplified.
//! - [`blobs`]: multi-threshold blob keypoints on the smoothed obstacle image.
//!
//! Everything here is derived from a single frame; outputs are used for
//! display and diagnostics only.

pub mod blobs;
pub mod corners;
mod extractor;
pub mod gradient;

pub use blobs::{BlobKeypoint, BlobParams};
pub use corners::{Corner, CornerMethod, CornerParams};
pub use extractor::{FeatureExtractor, FeatureParams, FeatureSet};
