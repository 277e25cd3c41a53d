//! Landmark localization from a single binary mask.
//!
//! The localizer reduces a mask to one pixel coordinate:
//! - outer contours of 8-connected components are traced
//!   ([`crate::contours`]) and their polygon moments computed;
//! - the contour with the largest enclosed area wins, ties going to the one
//!   discovered first in a row-major scan;
//! - the winner's centroid `(m10/m00, m01/m00)` is truncated to integer
//!   pixels.
//!
//! When no contour encloses any area (empty mask, isolated pixels, one-pixel
//! lines) the landmark falls back to the frame centre `(w/2, h/2)`. That is a
//! regular outcome tagged [`LandmarkSource::Fallback`], not an error: a
//! planner downstream always receives an in-bounds coordinate.
//!
//! A diagnostic overlay (mask in gray, contours in green, landmark as a red
//! disc) can be rendered for display layers; the pipeline never reads it.

mod localizer;
pub mod overlay;

pub use localizer::{
    fallback_landmark, BlobLocalizer, Landmark, LandmarkRole, LandmarkSource, Localization,
    LocalizerParams,
};
