//! I/O helpers for frames, masks and JSON.
//!
//! - `load_rgb_frame`: read a PNG/JPEG/etc. into an owned RGB frame.
//! - `save_gray`: write an 8-bit single-channel image (mask, smoothed mask).
//! - `save_occupancy`: write an occupancy grid with blocked cells at 255.
//! - `save_rgb_frame`: write a frame or overlay as RGB.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ChannelOrder, GrayImage, RgbFrame};
use crate::occupancy::OccupancyGrid;
use image::{DynamicImage, GrayImage as LumaBuffer, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk as an RGB frame.
///
/// Decoders always yield RGB; `order` only changes how the bytes are stored,
/// which lets callers mimic sensors that publish BGR.
pub fn load_rgb_frame(path: &Path, order: ChannelOrder) -> Result<RgbFrame, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let mut data = img.into_raw();
    if order == ChannelOrder::Bgr {
        for px in data.chunks_exact_mut(3) {
            px.swap(0, 2);
        }
    }
    RgbFrame::from_raw(width, height, order, data)
        .map_err(|e| format!("Invalid frame {}: {e}", path.display()))
}

/// Save an 8-bit single-channel image as PNG.
pub fn save_gray(image: &GrayImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let buffer = LumaBuffer::from_raw(image.w as u32, image.h as u32, image.data.clone())
        .ok_or_else(|| "Failed to create image buffer".to_string())?;
    DynamicImage::ImageLuma8(buffer)
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save an occupancy grid as PNG, blocked cells white.
pub fn save_occupancy(grid: &OccupancyGrid, path: &Path) -> Result<(), String> {
    let scaled = GrayImage {
        w: grid.width(),
        h: grid.height(),
        data: grid.cells().iter().map(|&c| c * 255).collect(),
    };
    save_gray(&scaled, path)
}

/// Save a frame as an RGB PNG regardless of its storage order.
pub fn save_rgb_frame(frame: &RgbFrame, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut data = frame.data.clone();
    if frame.order == ChannelOrder::Bgr {
        for px in data.chunks_exact_mut(3) {
            px.swap(0, 2);
        }
    }
    let buffer = RgbImage::from_raw(frame.w as u32, frame.h as u32, data)
        .ok_or_else(|| "Failed to create image buffer".to_string())?;
    DynamicImage::ImageRgb8(buffer)
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
