use super::bilateral::{bilateral_filter, BilateralParams};
use crate::error::{ConfigError, FrameError};
use crate::image::GrayImage;
use crate::segment::{union_masks, ColorMask};
use log::debug;
use serde::{Deserialize, Serialize};

/// Binary occupancy over the frame's pixel grid: 1 = blocked, 0 = free.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl OccupancyGrid {
    /// Binarize a smoothed image: samples `>= threshold` are blocked.
    pub fn from_threshold(image: &GrayImage, threshold: u8) -> Self {
        let cells = image
            .data
            .iter()
            .map(|&v| u8::from(v >= threshold))
            .collect();
        Self {
            width: image.w,
            height: image.h,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major cell values, each 0 or 1.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.cells[y * self.width + x]
    }

    #[inline]
    pub fn is_blocked(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == 1
    }

    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 1).count()
    }

    /// Nested rows, the layout most planners index as `grid[y][x]`.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.to_vec())
            .collect()
    }
}

/// Smoothing and binarization settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridBuildParams {
    pub bilateral: BilateralParams,
    /// Smoothed samples at or above this value are blocked.
    pub threshold: u8,
}

impl Default for GridBuildParams {
    fn default() -> Self {
        Self {
            bilateral: BilateralParams::default(),
            threshold: 128,
        }
    }
}

impl GridBuildParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bilateral.validate()?;
        if self.threshold == 0 {
            return Err(ConfigError::invalid(
                "grid.threshold",
                "a zero cutoff would mark every pixel blocked",
            ));
        }
        Ok(())
    }
}

/// Everything the builder produced for one frame.
#[derive(Clone, Debug)]
pub struct GridOutput {
    pub grid: OccupancyGrid,
    /// OR of the blocking masks before smoothing.
    pub combined: ColorMask,
    /// Bilateral-filtered combined mask (gray levels, not binary).
    pub smoothed: GrayImage,
}

#[derive(Clone, Debug)]
pub struct GridBuilder {
    params: GridBuildParams,
}

impl GridBuilder {
    pub fn new(params: GridBuildParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &GridBuildParams {
        &self.params
    }

    /// Merge, smooth and binarize `blocking` masks into an occupancy grid.
    pub fn build(&self, blocking: &[&ColorMask]) -> Result<GridOutput, FrameError> {
        let combined = union_masks("blocked", blocking)?;
        let smoothed = bilateral_filter(&combined.image, &self.params.bilateral);
        let grid = OccupancyGrid::from_threshold(&smoothed, self.params.threshold);
        debug!(
            "GridBuilder masks={} raw_on={} blocked={} threshold={}",
            blocking.len(),
            combined.count_on(),
            grid.blocked_count(),
            self.params.threshold
        );
        Ok(GridOutput {
            grid,
            combined,
            smoothed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_region_stays_blocked_and_background_free() {
        let mask = ColorMask::from_fn("o", 20, 20, |x, y| (5..15).contains(&x) && (5..15).contains(&y));
        let out = GridBuilder::new(GridBuildParams::default())
            .unwrap()
            .build(&[&mask])
            .unwrap();
        assert!(out.grid.is_blocked(10, 10));
        assert!(!out.grid.is_blocked(0, 0));
        assert!(out.grid.cells().iter().all(|&c| c <= 1));
    }

    #[test]
    fn empty_mask_list_is_rejected() {
        let builder = GridBuilder::new(GridBuildParams::default()).unwrap();
        assert!(matches!(builder.build(&[]), Err(FrameError::NoMasks(_))));
    }

    #[test]
    fn rows_follow_grid_layout() {
        let img = GrayImage::from_raw(3, 2, vec![0, 200, 0, 255, 0, 127]).unwrap();
        let grid = OccupancyGrid::from_threshold(&img, 128);
        assert_eq!(grid.to_rows(), vec![vec![0, 1, 0], vec![1, 0, 0]]);
        assert_eq!(grid.blocked_count(), 2);
    }
}
