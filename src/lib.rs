#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod pipeline;

// Stage modules, usable on their own.
pub mod blob;
pub mod color;
pub mod contours;
pub mod features;
pub mod occupancy;
pub mod segment;

// --- High-level re-exports -------------------------------------------------

// Main entry points: pipeline + loop driver.
pub use crate::pipeline::{
    run_loop, FramePoll, FrameSource, RunStats, SceneFrame, SceneParams, ScenePipeline, SceneSink,
};

// Per-frame value types.
pub use crate::blob::{Landmark, LandmarkRole, LandmarkSource};
pub use crate::error::{ConfigError, FrameError};
pub use crate::features::FeatureSet;
pub use crate::image::{ChannelOrder, RgbFrame};
pub use crate::occupancy::OccupancyGrid;
pub use crate::segment::ColorMask;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use scene_grid::prelude::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let pipeline = ScenePipeline::new(SceneParams::default())?;
/// let frame = RgbFrame::new(256, 256, ChannelOrder::Rgb);
/// let scene = pipeline.process(&frame)?;
/// println!("blocked={}", scene.grid.blocked_count());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ChannelOrder, RgbFrame};
    pub use crate::{LandmarkRole, SceneFrame, SceneParams, ScenePipeline};
}
