//! Color-space conversion and per-pixel range tests.
//!
//! - [`hsv`]: RGB → 8-bit HSV with hue stored as degrees / 2 (`0..180`).
//! - [`range`]: inclusive three-channel bounds used by the segmenter.
//!
//! Hue is cyclic. A class that straddles red (hue ≈ 0 and ≈ 179) is written as
//! two ranges and the segmenter ORs them; a single range never wraps.

pub mod hsv;
pub mod range;

pub use hsv::{frame_to_hsv, rgb_to_hsv, HsvImage, HUE_MAX};
pub use range::HsvRange;
