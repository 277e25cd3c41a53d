use super::blobs::{detect_blobs, BlobKeypoint, BlobParams};
use super::corners::{detect_corners, Corner, CornerParams};
use crate::contours::geometry::simplify_closed;
use crate::contours::{find_external_contours, Point};
use crate::error::ConfigError;
use crate::image::GrayImage;
use crate::segment::ColorMask;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureParams {
    /// Douglas–Peucker tolerance for contour polygons; 0 keeps every vertex.
    pub polygon_epsilon: f64,
    pub corners: CornerParams,
    /// Run the keypoint detector on the smoothed obstacle image.
    pub detect_blobs: bool,
    pub blobs: BlobParams,
}

impl Default for FeatureParams {
    fn default() -> Self {
        Self {
            polygon_epsilon: 0.0,
            corners: CornerParams::default(),
            detect_blobs: true,
            blobs: BlobParams::default(),
        }
    }
}

impl FeatureParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.polygon_epsilon.is_finite() && self.polygon_epsilon >= 0.0) {
            return Err(ConfigError::invalid(
                "features.polygon_epsilon",
                format!("must be non-negative, got {}", self.polygon_epsilon),
            ));
        }
        self.corners.validate()?;
        self.blobs.validate()
    }
}

/// Geometric descriptors of one frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FeatureSet {
    /// Strongest first, ties by `(y, x)`.
    pub corners: Vec<Corner>,
    /// One closed polygon per connected component, in discovery order.
    pub polygons: Vec<Vec<Point>>,
    pub blobs: Vec<BlobKeypoint>,
}

#[derive(Clone, Debug)]
pub struct FeatureExtractor {
    params: FeatureParams,
}

impl FeatureExtractor {
    pub fn new(params: FeatureParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &FeatureParams {
        &self.params
    }

    /// Corners and polygons of `boundary`, plus blob keypoints of
    /// `obstacles` when given and enabled.
    pub fn extract(&self, boundary: &ColorMask, obstacles: Option<&GrayImage>) -> FeatureSet {
        let polygons: Vec<Vec<Point>> = find_external_contours(boundary.view())
            .into_iter()
            .map(|c| simplify_closed(&c.points, self.params.polygon_epsilon))
            .collect();
        let corners = detect_corners(&boundary.image, &self.params.corners);
        let blobs = match obstacles {
            Some(img) if self.params.detect_blobs => detect_blobs(img, &self.params.blobs),
            _ => Vec::new(),
        };
        debug!(
            "FeatureExtractor class={} polygons={} corners={} blobs={}",
            boundary.class,
            polygons.len(),
            corners.len(),
            blobs.len()
        );
        FeatureSet {
            corners,
            polygons,
            blobs,
        }
    }
}
