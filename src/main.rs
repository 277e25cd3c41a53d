use log::info;
use scene_grid::config::scene::{load_config, OutputConfig, RuntimeConfig};
use scene_grid::diagnostics::SceneSummary;
use scene_grid::image::io::{save_gray, save_occupancy, save_rgb_frame, write_json_file};
use scene_grid::pipeline::{run_loop, DirectorySource, FramePoll, FrameSource, SceneFrame, ScenePipeline};
use std::env;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config: RuntimeConfig = load_config(Path::new(&config_path))?;

    let pipeline = ScenePipeline::new(config.scene.clone()).map_err(|e| e.to_string())?;
    let directory = DirectorySource::open(
        &config.input.directory,
        config.input.channel_order,
        config.input.flip_vertical,
    )?;
    info!(
        "processing {} frames from {}",
        directory.len(),
        config.input.directory.display()
    );
    let mut source = Limited {
        inner: directory,
        remaining: config.input.max_frames,
    };

    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel = Arc::clone(&cancel);
        ctrlc::set_handler(move || cancel.store(true, Ordering::SeqCst))
            .map_err(|e| format!("Failed to install Ctrl-C handler: {e}"))?;
    }

    let output = &config.output;
    let mut summaries: Vec<SceneSummary> = Vec::new();
    let mut write_error: Option<String> = None;
    let mut sink = |index: u64, scene: &SceneFrame| {
        if write_error.is_some() {
            return;
        }
        match write_frame_artifacts(output, index, scene) {
            Ok(summary) => summaries.push(summary),
            Err(err) => {
                write_error = Some(err);
                cancel.store(true, Ordering::SeqCst);
            }
        }
    };
    let stats = run_loop(&mut source, &pipeline, &mut sink, &cancel);
    if let Some(err) = write_error {
        return Err(err);
    }

    write_json_file(&output.directory.join("summary.json"), &summaries)?;
    write_json_file(&output.directory.join("run_stats.json"), &stats)?;
    println!(
        "Processed {} frames ({} frame errors, {} source errors) into {}",
        stats.frames_processed,
        stats.frame_errors,
        stats.source_errors,
        output.directory.display()
    );
    Ok(())
}

fn write_frame_artifacts(
    output: &OutputConfig,
    index: u64,
    scene: &SceneFrame,
) -> Result<SceneSummary, String> {
    let dir = output.directory.join(format!("frame_{index:05}"));
    save_occupancy(&scene.grid, &dir.join("grid.png"))?;
    save_gray(&scene.smoothed, &dir.join("smoothed.png"))?;
    if output.write_masks {
        for (class, mask) in &scene.masks {
            save_gray(&mask.image, &dir.join(format!("mask_{class}.png")))?;
        }
    }
    if output.write_overlays {
        for (role, overlay) in &scene.overlays {
            save_rgb_frame(overlay, &dir.join(format!("overlay_{}.png", role.as_str())))?;
        }
    }
    let summary = SceneSummary::from_scene(index, scene);
    write_json_file(&dir.join("scene.json"), &summary)?;
    write_json_file(&dir.join("features.json"), &scene.features)?;
    info!(
        "frame {index}: {} blocked cells, landmarks {:?}",
        summary.blocked_cells,
        scene
            .landmarks
            .values()
            .map(|l| (l.role.as_str(), l.x, l.y))
            .collect::<Vec<_>>()
    );
    Ok(summary)
}

/// Caps a source at `remaining` frames, then reports disconnection.
struct Limited<S> {
    inner: S,
    remaining: Option<u64>,
}

impl<S: FrameSource> FrameSource for Limited<S> {
    fn poll(&mut self) -> FramePoll {
        match self.remaining {
            Some(0) => FramePoll::Disconnected,
            Some(ref mut n) => {
                let poll = self.inner.poll();
                if matches!(poll, FramePoll::Ready(_)) {
                    *n -= 1;
                }
                poll
            }
            None => self.inner.poll(),
        }
    }
}

fn usage() -> String {
    "Usage: scene-grid <config.json>".to_string()
}
