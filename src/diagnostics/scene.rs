use super::TimingBreakdown;
use crate::blob::Landmark;
use crate::image::ChannelOrder;
use crate::pipeline::SceneFrame;
use crate::segment::ColorMask;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub channel_order: ChannelOrder,
}

/// Foreground share of one mask.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskCoverage {
    pub class: String,
    pub pixels_on: usize,
    pub fraction: f64,
}

impl MaskCoverage {
    pub fn of(mask: &ColorMask) -> Self {
        let (w, h) = mask.dims();
        let pixels_on = mask.count_on();
        let total = w * h;
        Self {
            class: mask.class.clone(),
            pixels_on,
            fraction: if total == 0 {
                0.0
            } else {
                pixels_on as f64 / total as f64
            },
        }
    }
}

/// Execution trace attached to every [`SceneFrame`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    /// Sorted by class name.
    pub masks: Vec<MaskCoverage>,
}

/// Compact record of one processed frame.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneSummary {
    pub index: u64,
    pub input: InputDescriptor,
    pub landmarks: Vec<Landmark>,
    pub blocked_cells: usize,
    pub blocked_fraction: f64,
    pub corners: usize,
    pub polygons: usize,
    pub blobs: usize,
    pub masks: Vec<MaskCoverage>,
    pub timings: TimingBreakdown,
}

impl SceneSummary {
    pub fn from_scene(index: u64, scene: &SceneFrame) -> Self {
        let cells = scene.grid.width() * scene.grid.height();
        let blocked = scene.grid.blocked_count();
        Self {
            index,
            input: scene.trace.input.clone(),
            landmarks: scene.landmarks.values().copied().collect(),
            blocked_cells: blocked,
            blocked_fraction: if cells == 0 {
                0.0
            } else {
                blocked as f64 / cells as f64
            },
            corners: scene.features.corners.len(),
            polygons: scene.features.polygons.len(),
            blobs: scene.features.blobs.len(),
            masks: scene.trace.masks.clone(),
            timings: scene.trace.timings.clone(),
        }
    }
}
