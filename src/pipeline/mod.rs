//! Per-frame orchestration and the polling loop around it.
//!
//! Overview
//! - [`ScenePipeline`] validates a [`SceneParams`] once and then turns each
//!   [`RgbFrame`](crate::image::RgbFrame) into a [`SceneFrame`]: masks,
//!   start/goal landmarks, occupancy grid, features and a timing trace.
//! - [`FrameSource`] and [`SceneSink`] are the only collaborators outside
//!   the core. [`run_loop`] polls the source once per iteration, skips
//!   `NotReady` polls, logs errors and stops on disconnection or when the
//!   cancellation flag is raised.
//!
//! Everything runs on the caller's thread; nothing is carried between frames.

mod params;
mod runner;
mod scene;
mod sink;
mod source;

pub use params::{GridConfig, LandmarkClasses, SceneParams};
pub use runner::{run_loop, RunStats};
pub use scene::{SceneFrame, ScenePipeline};
pub use sink::{SceneSink, SummarySink};
pub use source::{DirectorySource, FramePoll, FrameSource, MemorySource};
