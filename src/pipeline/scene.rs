use super::params::SceneParams;
use crate::blob::{BlobLocalizer, Landmark, LandmarkRole};
use crate::diagnostics::{InputDescriptor, MaskCoverage, SceneTrace, TimingBreakdown};
use crate::error::{ConfigError, FrameError};
use crate::features::{FeatureExtractor, FeatureSet};
use crate::image::{GrayImage, RgbFrame};
use crate::occupancy::{GridBuilder, OccupancyGrid};
use crate::segment::{ColorMask, ColorSegmenter, SegmentedMasks};
use log::debug;
use std::collections::BTreeMap;
use std::time::Instant;

/// Everything derived from one frame.
#[derive(Clone, Debug)]
pub struct SceneFrame {
    /// One mask per class and composite.
    pub masks: SegmentedMasks,
    pub landmarks: BTreeMap<LandmarkRole, Landmark>,
    /// Per-role diagnostic overlays, when enabled.
    pub overlays: BTreeMap<LandmarkRole, RgbFrame>,
    pub grid: OccupancyGrid,
    /// Bilateral-filtered blocking mask the grid was thresholded from.
    pub smoothed: GrayImage,
    pub features: FeatureSet,
    pub trace: SceneTrace,
}

impl SceneFrame {
    pub fn landmark(&self, role: LandmarkRole) -> Option<&Landmark> {
        self.landmarks.get(&role)
    }

    pub fn mask(&self, class: &str) -> Option<&ColorMask> {
        self.masks.get(class)
    }
}

/// Segmenter, localizer, grid builder and feature extractor wired together.
///
/// Holds only validated configuration; [`ScenePipeline::process`] takes
/// `&self` and keeps nothing between frames.
#[derive(Clone, Debug)]
pub struct ScenePipeline {
    params: SceneParams,
    segmenter: ColorSegmenter,
    localizer: BlobLocalizer,
    grid: GridBuilder,
    features: FeatureExtractor,
}

impl ScenePipeline {
    pub fn new(params: SceneParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let segmenter = ColorSegmenter::new(params.segmenter.clone())?;
        let localizer = BlobLocalizer::new(params.localizer.clone());
        let grid = GridBuilder::new(params.grid.build.clone())?;
        let features = FeatureExtractor::new(params.features.clone())?;
        Ok(Self {
            params,
            segmenter,
            localizer,
            grid,
            features,
        })
    }

    pub fn params(&self) -> &SceneParams {
        &self.params
    }

    /// Run every stage on `frame`.
    pub fn process(&self, frame: &RgbFrame) -> Result<SceneFrame, FrameError> {
        let expected = (self.params.width, self.params.height);
        let actual = (frame.w, frame.h);
        if expected != actual {
            return Err(FrameError::DimensionMismatch { expected, actual });
        }
        frame.check_buffer()?;
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let start = Instant::now();
        let masks = self.segmenter.segment(frame)?;
        timings.push("segment", elapsed_ms(start));

        let start = Instant::now();
        let mut landmarks = BTreeMap::new();
        let mut overlays = BTreeMap::new();
        for role in LandmarkRole::ALL {
            let mask = lookup(&masks, self.params.landmarks.class_for(role))?;
            let loc = self.localizer.locate(mask, role);
            landmarks.insert(role, loc.landmark);
            if let Some(overlay) = loc.overlay {
                overlays.insert(role, overlay);
            }
        }
        timings.push("localize", elapsed_ms(start));

        let start = Instant::now();
        let blocking = self
            .params
            .blocking_classes()
            .into_iter()
            .map(|name| lookup(&masks, name))
            .collect::<Result<Vec<_>, _>>()?;
        let built = self.grid.build(&blocking)?;
        timings.push("grid", elapsed_ms(start));

        let start = Instant::now();
        let boundary = lookup(&masks, &self.params.boundary_class)?;
        let features = self.features.extract(boundary, Some(&built.smoothed));
        timings.push("features", elapsed_ms(start));

        timings.total_ms = elapsed_ms(total_start);
        let trace = SceneTrace {
            input: InputDescriptor {
                width: frame.w,
                height: frame.h,
                channel_order: frame.order,
            },
            timings,
            masks: masks.values().map(MaskCoverage::of).collect(),
        };
        debug!(
            "ScenePipeline::process w={} h={} blocked={} total_ms={:.3}",
            frame.w,
            frame.h,
            built.grid.blocked_count(),
            trace.timings.total_ms
        );

        Ok(SceneFrame {
            masks,
            landmarks,
            overlays,
            grid: built.grid,
            smoothed: built.smoothed,
            features,
            trace,
        })
    }
}

fn lookup<'a>(masks: &'a SegmentedMasks, name: &str) -> Result<&'a ColorMask, FrameError> {
    masks
        .get(name)
        .ok_or_else(|| FrameError::MissingMask(name.to_string()))
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
