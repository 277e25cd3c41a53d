use crate::image::ChannelOrder;
use crate::pipeline::SceneParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
pub struct InputConfig {
    /// Directory of PNG/JPEG frames, processed in file-name order.
    pub directory: PathBuf,
    #[serde(default)]
    pub channel_order: ChannelOrder,
    /// Flip frames bottom-up before processing.
    #[serde(default)]
    pub flip_vertical: bool,
    /// Stop after this many frames.
    #[serde(default)]
    pub max_frames: Option<u64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
    /// Write every class mask as PNG.
    #[serde(default = "default_true")]
    pub write_masks: bool,
    /// Write landmark overlays as PNG.
    #[serde(default = "default_true")]
    pub write_overlays: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub scene: SceneParams,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: RuntimeConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_runtime_config_parses() {
        let json = r#"{
            "input": { "directory": "frames", "channel_order": "bgr" },
            "output": { "directory": "out", "write_masks": false },
            "scene": { "width": 128, "height": 96 }
        }"#;
        let cfg: RuntimeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.input.channel_order, ChannelOrder::Bgr);
        assert!(!cfg.input.flip_vertical);
        assert!(!cfg.output.write_masks);
        assert!(cfg.output.write_overlays);
        assert_eq!((cfg.scene.width, cfg.scene.height), (128, 96));
        assert_eq!(cfg.scene.boundary_class, "white");
    }

    #[test]
    fn missing_file_mentions_path() {
        let err = load_config(Path::new("/nonexistent/scene.json")).unwrap_err();
        assert!(err.contains("/nonexistent/scene.json"));
    }
}
