use crate::blob::{LandmarkRole, LocalizerParams};
use crate::error::ConfigError;
use crate::features::FeatureParams;
use crate::occupancy::GridBuildParams;
use crate::segment::SegmenterParams;
use serde::{Deserialize, Serialize};

/// Which mask each landmark role is localized on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandmarkClasses {
    pub start: String,
    pub goal: String,
}

impl Default for LandmarkClasses {
    fn default() -> Self {
        Self {
            start: "red".to_string(),
            goal: "blue".to_string(),
        }
    }
}

impl LandmarkClasses {
    pub fn class_for(&self, role: LandmarkRole) -> &str {
        match role {
            LandmarkRole::Start => &self.start,
            LandmarkRole::Goal => &self.goal,
        }
    }
}

/// Occupancy grid inputs and smoothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Masks whose foreground is impassable.
    pub blocking: Vec<String>,
    /// Also block the boundary class.
    pub include_boundary: bool,
    pub build: GridBuildParams,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            blocking: vec!["obstacle".to_string()],
            include_boundary: true,
            build: GridBuildParams::default(),
        }
    }
}

/// Full per-frame configuration, validated once before the first frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneParams {
    /// Expected frame width in pixels.
    pub width: usize,
    /// Expected frame height in pixels.
    pub height: usize,
    pub segmenter: SegmenterParams,
    pub landmarks: LandmarkClasses,
    /// Mask fed to the feature extractor.
    pub boundary_class: String,
    pub grid: GridConfig,
    pub localizer: LocalizerParams,
    pub features: FeatureParams,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            segmenter: SegmenterParams::default(),
            landmarks: LandmarkClasses::default(),
            boundary_class: "white".to_string(),
            grid: GridConfig::default(),
            localizer: LocalizerParams::default(),
            features: FeatureParams::default(),
        }
    }
}

impl SceneParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimensions {
                width: self.width,
                height: self.height,
            });
        }
        self.segmenter.validate()?;

        for role in LandmarkRole::ALL {
            let class = self.landmarks.class_for(role);
            if !self.segmenter.has_mask(class) {
                return Err(ConfigError::unknown_class(
                    format!("landmark `{}`", role.as_str()),
                    class,
                ));
            }
        }
        if !self.segmenter.has_mask(&self.boundary_class) {
            return Err(ConfigError::unknown_class("boundary_class", &self.boundary_class));
        }
        for name in &self.grid.blocking {
            if !self.segmenter.has_mask(name) {
                return Err(ConfigError::unknown_class("grid.blocking", name));
            }
        }
        if self.grid.blocking.is_empty() && !self.grid.include_boundary {
            return Err(ConfigError::invalid(
                "grid.blocking",
                "no blocking classes and boundary excluded",
            ));
        }
        self.grid.build.validate()?;
        self.features.validate()
    }

    /// Blocking mask names in OR order, boundary last when included.
    pub fn blocking_classes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.grid.blocking.iter().map(String::as_str).collect();
        if self.grid.include_boundary && !names.contains(&self.boundary_class.as_str()) {
            names.push(&self.boundary_class);
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        SceneParams::default().validate().unwrap();
    }

    #[test]
    fn unknown_landmark_class_is_reported() {
        let params = SceneParams {
            landmarks: LandmarkClasses {
                start: "purple".into(),
                goal: "blue".into(),
            },
            ..SceneParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(ConfigError::unknown_class("landmark `start`", "purple"))
        );
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let params = SceneParams {
            width: 0,
            ..SceneParams::default()
        };
        assert!(matches!(params.validate(), Err(ConfigError::ZeroDimensions { .. })));
    }

    #[test]
    fn boundary_is_appended_once() {
        let params = SceneParams::default();
        assert_eq!(params.blocking_classes(), vec!["obstacle", "white"]);
        let mut dup = SceneParams::default();
        dup.grid.blocking.push("white".into());
        assert_eq!(dup.blocking_classes(), vec!["obstacle", "white"]);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let params: SceneParams = serde_json::from_str(r#"{"width": 64, "height": 48}"#).unwrap();
        assert_eq!(params.width, 64);
        assert_eq!(params.landmarks, LandmarkClasses::default());
        assert_eq!(params.segmenter.classes.len(), 4);
    }
}
