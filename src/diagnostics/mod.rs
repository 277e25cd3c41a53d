//! Serializable per-frame diagnostics.
//!
//! [`SceneTrace`] travels with every processed frame (input descriptor,
//! stage timings, mask coverage). [`SceneSummary`] condenses a whole scene
//! into a compact JSON-friendly record for sinks and CLI reports.

pub mod scene;
pub mod timing;

pub use scene::{InputDescriptor, MaskCoverage, SceneSummary, SceneTrace};
pub use timing::{StageTiming, TimingBreakdown};
