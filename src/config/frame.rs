use crate::image::ChannelOrder;
use crate::pipeline::SceneParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
pub struct FrameToolConfig {
    /// Single image to process.
    pub input: PathBuf,
    #[serde(default)]
    pub channel_order: ChannelOrder,
    #[serde(default)]
    pub flip_vertical: bool,
    /// Adopt the image size instead of `scene.width/height`.
    #[serde(default = "default_true")]
    pub fit_scene_to_input: bool,
    pub output: FrameOutputConfig,
    #[serde(default)]
    pub scene: SceneParams,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FrameOutputConfig {
    /// Directory receiving masks, overlays, grid and smoothed image.
    pub directory: PathBuf,
    /// JSON report path.
    pub report_json: PathBuf,
}

fn default_true() -> bool {
    true
}

pub fn load_config(path: &Path) -> Result<FrameToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
