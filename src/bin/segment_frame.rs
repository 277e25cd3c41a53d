use scene_grid::blob::overlay::{draw_circle, fill_circle, RED, YELLOW};
use scene_grid::config::frame::load_config;
use scene_grid::diagnostics::SceneSummary;
use scene_grid::features::FeatureSet;
use scene_grid::image::io::{
    load_rgb_frame, save_gray, save_occupancy, save_rgb_frame, write_json_file,
};
use scene_grid::image::RgbFrame;
use scene_grid::pipeline::ScenePipeline;
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let mut frame = load_rgb_frame(&config.input, config.channel_order)?;
    if config.flip_vertical {
        frame = frame.flip_vertical();
    }
    let mut params = config.scene.clone();
    if config.fit_scene_to_input {
        params.width = frame.w;
        params.height = frame.h;
    }
    let pipeline = ScenePipeline::new(params).map_err(|e| e.to_string())?;
    let scene = pipeline.process(&frame).map_err(|e| e.to_string())?;

    let out = &config.output.directory;
    for (class, mask) in &scene.masks {
        save_gray(&mask.image, &out.join(format!("mask_{class}.png")))?;
    }
    for (role, overlay) in &scene.overlays {
        save_rgb_frame(overlay, &out.join(format!("overlay_{}.png", role.as_str())))?;
    }
    if let Some(navigable) = scene.mask("navigable") {
        let view = frame.masked(navigable).map_err(|e| e.to_string())?;
        save_rgb_frame(&view, &out.join("navigable_view.png"))?;
    }
    save_occupancy(&scene.grid, &out.join("grid.png"))?;
    save_gray(&scene.smoothed, &out.join("smoothed.png"))?;
    let smoothed_rgb = RgbFrame::from_gray(&scene.smoothed);
    save_rgb_frame(
        &render_features(&smoothed_rgb, &scene.features),
        &out.join("features.png"),
    )?;

    let report = FrameReport {
        summary: SceneSummary::from_scene(0, &scene),
        features: &scene.features,
        grid: scene.grid.to_rows(),
    };
    write_json_file(&config.output.report_json, &report)?;

    for landmark in scene.landmarks.values() {
        println!(
            "{}: ({}, {}) via {:?}",
            landmark.role.as_str(),
            landmark.x,
            landmark.y,
            landmark.source
        );
    }
    println!(
        "Saved {} masks, grid ({} blocked) and report to {}",
        scene.masks.len(),
        scene.grid.blocked_count(),
        config.output.report_json.display()
    );
    Ok(())
}

/// Blob keypoints as red rings, corners as yellow dots.
fn render_features(base: &RgbFrame, features: &FeatureSet) -> RgbFrame {
    let mut canvas = base.clone();
    for blob in &features.blobs {
        let radius = (blob.diameter / 2.0).round().max(1.0) as i32;
        draw_circle(&mut canvas, blob.x.round() as i32, blob.y.round() as i32, radius, RED);
    }
    for corner in &features.corners {
        fill_circle(&mut canvas, corner.x as i32, corner.y as i32, 1, YELLOW);
    }
    canvas
}

fn usage() -> String {
    "Usage: segment_frame <config.json>".to_string()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameReport<'a> {
    summary: SceneSummary,
    features: &'a FeatureSet,
    grid: Vec<Vec<u8>>,
}
