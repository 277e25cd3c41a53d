//! JSON configuration files for the command-line tools.
//!
//! - [`scene`]: the `scene-grid` loop (frame directory in, artifacts out).
//! - [`frame`]: the `segment_frame` single-image tool.
//!
//! Both embed a [`SceneParams`](crate::pipeline::SceneParams) section; any
//! field left out takes its default.

pub mod frame;
pub mod scene;
