//! Color segmentation: frame → HSV → one binary mask per semantic class.
//!
//! Overview
//! - The frame is converted to 8-bit HSV once per call.
//! - Each [`ColorClass`] owns one or more inclusive [`HsvRange`]s. Every range
//!   yields its own in-range mask and the masks of one class are merged with
//!   a bitwise OR, so a pixel matched by two ranges is still just 255.
//! - [`CompositeClass`]es OR together masks that were already produced
//!   (plain classes or composites declared earlier).
//!
//! Output masks only ever hold 0 or 255 and have the frame's dimensions.
//!
//! [`HsvRange`]: crate::color::HsvRange

mod mask;
mod params;
mod segmenter;

pub use mask::{union_masks, ColorMask, MASK_ON};
pub use params::{ColorClass, CompositeClass, SegmenterParams};
pub use segmenter::{ColorSegmenter, SegmentedMasks};
