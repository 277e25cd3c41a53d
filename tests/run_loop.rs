mod common;

use common::synthetic::{arena, solid_frame, GROUND};
use scene_grid::image::{ChannelOrder, RgbFrame};
use scene_grid::pipeline::{
    run_loop, FramePoll, MemorySource, SceneFrame, SceneParams, ScenePipeline, SummarySink,
};
use std::sync::atomic::{AtomicBool, Ordering};

fn pipeline() -> ScenePipeline {
    ScenePipeline::new(SceneParams {
        width: 64,
        height: 64,
        ..SceneParams::default()
    })
    .unwrap()
}

#[test]
fn loop_skips_not_ready_and_survives_errors() {
    common::init_logger();
    let mut source = MemorySource::new([
        FramePoll::Ready(arena(ChannelOrder::Rgb)),
        FramePoll::NotReady,
        FramePoll::Error("sensor timeout".into()),
        FramePoll::Ready(solid_frame(10, 10, GROUND, ChannelOrder::Rgb)),
        FramePoll::NotReady,
        FramePoll::Ready(arena(ChannelOrder::Bgr)),
    ]);
    let mut sink = SummarySink::default();
    let stats = run_loop(&mut source, &pipeline(), &mut sink, &AtomicBool::new(false));

    assert_eq!(stats.frames_received, 3);
    assert_eq!(stats.frames_processed, 2);
    assert_eq!(stats.not_ready, 2);
    assert_eq!(stats.source_errors, 1);
    assert_eq!(stats.frame_errors, 1);
    assert!(stats.disconnected);
    assert!(!stats.cancelled);

    let indices: Vec<u64> = sink.summaries.iter().map(|s| s.index).collect();
    assert_eq!(indices, vec![0, 2]);
}

#[test]
fn short_buffer_frame_is_skipped() {
    let truncated = RgbFrame {
        w: 64,
        h: 64,
        order: ChannelOrder::Rgb,
        data: vec![0; 10],
    };
    let mut source = MemorySource::new([
        FramePoll::Ready(truncated),
        FramePoll::Ready(arena(ChannelOrder::Rgb)),
    ]);
    let mut sink = SummarySink::default();
    let stats = run_loop(&mut source, &pipeline(), &mut sink, &AtomicBool::new(false));

    assert_eq!(stats.frames_received, 2);
    assert_eq!(stats.frame_errors, 1);
    assert_eq!(stats.frames_processed, 1);
    assert_eq!(sink.summaries.len(), 1);
    assert_eq!(sink.summaries[0].index, 1);
}

#[test]
fn cancellation_lets_the_current_frame_finish() {
    let mut source = MemorySource::from_frames((0..5).map(|_| arena(ChannelOrder::Rgb)));
    let cancel = AtomicBool::new(false);
    let mut seen = Vec::new();
    let mut sink = |index: u64, scene: &SceneFrame| {
        seen.push((index, scene.grid.blocked_count()));
        cancel.store(true, Ordering::SeqCst);
    };
    let stats = run_loop(&mut source, &pipeline(), &mut sink, &cancel);

    assert!(stats.cancelled);
    assert_eq!(stats.frames_processed, 1);
    assert_eq!(seen.len(), 1);
    assert!(seen[0].1 > 0);
    assert_eq!(source.remaining(), 4);
}

#[test]
fn raised_flag_stops_before_polling() {
    let mut source = MemorySource::from_frames([arena(ChannelOrder::Rgb)]);
    let mut sink = SummarySink::default();
    let stats = run_loop(&mut source, &pipeline(), &mut sink, &AtomicBool::new(true));
    assert!(stats.cancelled);
    assert_eq!(stats.frames_received, 0);
    assert_eq!(source.remaining(), 1);
    assert!(sink.summaries.is_empty());
}

#[test]
fn directory_source_reads_frames_in_name_order() {
    use common::synthetic::{fill_rect, RED};
    use scene_grid::image::io::save_rgb_frame;
    use scene_grid::pipeline::{DirectorySource, FrameSource};

    let dir = std::env::temp_dir().join(format!("scene_grid_frames_{}", std::process::id()));
    let mut top_red = solid_frame(8, 6, GROUND, ChannelOrder::Rgb);
    fill_rect(&mut top_red, 0, 0, 8, 1, RED);
    save_rgb_frame(&top_red, &dir.join("b.png")).unwrap();
    save_rgb_frame(&solid_frame(8, 6, GROUND, ChannelOrder::Rgb), &dir.join("a.png")).unwrap();
    std::fs::write(dir.join("notes.txt"), "not a frame").unwrap();

    let mut source = DirectorySource::open(&dir, ChannelOrder::Bgr, true).unwrap();
    assert_eq!(source.len(), 2);

    let FramePoll::Ready(first) = source.poll() else {
        panic!("expected a frame");
    };
    assert!(source.current_path().unwrap().ends_with("a.png"));
    assert_eq!(first.order, ChannelOrder::Bgr);
    assert_eq!(first.rgb_at(0, 0), GROUND);

    let FramePoll::Ready(second) = source.poll() else {
        panic!("expected a frame");
    };
    // Flipped: the red top row is now the bottom row.
    assert_eq!(second.rgb_at(3, 5), RED);
    assert_eq!(second.rgb_at(3, 0), GROUND);
    assert!(matches!(source.poll(), FramePoll::Disconnected));

    let _ = std::fs::remove_dir_all(&dir);
}
