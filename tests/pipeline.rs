mod common;

use common::synthetic::{arena, solid_frame, GROUND};
use scene_grid::blob::{LandmarkRole, LandmarkSource};
use scene_grid::contours::Point;
use scene_grid::diagnostics::SceneSummary;
use scene_grid::image::ChannelOrder;
use scene_grid::pipeline::{SceneParams, ScenePipeline};
use scene_grid::{ConfigError, FrameError};

fn arena_pipeline() -> ScenePipeline {
    ScenePipeline::new(SceneParams {
        width: 64,
        height: 64,
        ..SceneParams::default()
    })
    .expect("default classes are valid")
}

#[test]
fn arena_yields_landmarks_grid_and_features() {
    common::init_logger();
    let scene = arena_pipeline().process(&arena(ChannelOrder::Rgb)).unwrap();

    let start = scene.landmark(LandmarkRole::Start).unwrap();
    assert_eq!((start.x, start.y), (12, 22));
    assert_eq!(start.source, LandmarkSource::Contour);
    let goal = scene.landmark(LandmarkRole::Goal).unwrap();
    assert_eq!((goal.x, goal.y), (43, 43));

    assert!(scene.grid.is_blocked(35, 10), "green obstacle");
    assert!(scene.grid.is_blocked(32, 61), "white wall");
    assert!(!scene.grid.is_blocked(12, 22), "start pad is free");
    assert!(!scene.grid.is_blocked(20, 40), "ground is free");

    assert_eq!(scene.features.polygons.len(), 1);
    assert_eq!(scene.features.polygons[0][0], Point::new(0, 58));
    assert!(
        scene
            .features
            .blobs
            .iter()
            .any(|b| (b.x - 34.5).abs() < 2.0 && (b.y - 9.5).abs() < 2.0),
        "{:?}",
        scene.features.blobs
    );
    assert_eq!(scene.overlays.len(), 2);
}

#[test]
fn every_mask_is_binary_and_frame_sized() {
    let scene = arena_pipeline().process(&arena(ChannelOrder::Rgb)).unwrap();
    let names: Vec<&str> = scene.masks.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec!["blue", "green", "navigable", "obstacle", "red", "white"]
    );
    for mask in scene.masks.values() {
        assert_eq!(mask.dims(), (64, 64));
        assert!(mask.image.data.iter().all(|&v| v == 0 || v == 255));
    }
    assert!(scene.grid.cells().iter().all(|&c| c <= 1));
    assert_eq!((scene.grid.width(), scene.grid.height()), (64, 64));
}

#[test]
fn channel_order_does_not_change_the_scene() {
    let pipeline = arena_pipeline();
    let rgb = pipeline.process(&arena(ChannelOrder::Rgb)).unwrap();
    let bgr = pipeline.process(&arena(ChannelOrder::Bgr)).unwrap();
    assert_eq!(rgb.masks, bgr.masks);
    assert_eq!(rgb.landmarks, bgr.landmarks);
    assert_eq!(rgb.grid, bgr.grid);
}

#[test]
fn empty_scene_falls_back_for_both_landmarks() {
    let scene = arena_pipeline()
        .process(&solid_frame(64, 64, GROUND, ChannelOrder::Rgb))
        .unwrap();
    for role in LandmarkRole::ALL {
        let lm = scene.landmark(role).unwrap();
        assert_eq!((lm.x, lm.y), (32, 32));
        assert_eq!(lm.source, LandmarkSource::Fallback);
    }
    assert_eq!(scene.grid.blocked_count(), 0);
}

#[test]
fn wrong_frame_size_is_a_frame_error() {
    let err = arena_pipeline()
        .process(&solid_frame(32, 32, GROUND, ChannelOrder::Rgb))
        .unwrap_err();
    assert_eq!(
        err,
        FrameError::DimensionMismatch {
            expected: (64, 64),
            actual: (32, 32)
        }
    );
}

#[test]
fn invalid_configuration_is_fatal() {
    let mut params = SceneParams::default();
    params.grid.blocking = vec!["lava".into()];
    assert_eq!(
        ScenePipeline::new(params).unwrap_err(),
        ConfigError::unknown_class("grid.blocking", "lava")
    );

    let mut params = SceneParams::default();
    params.grid.build.bilateral.diameter = 8;
    assert!(matches!(
        ScenePipeline::new(params),
        Err(ConfigError::InvalidParameter { .. })
    ));
}

#[test]
fn trace_and_summary_describe_the_frame() {
    let scene = arena_pipeline().process(&arena(ChannelOrder::Bgr)).unwrap();
    let labels: Vec<&str> = scene
        .trace
        .timings
        .stages
        .iter()
        .map(|s| s.label.as_str())
        .collect();
    assert_eq!(labels, vec!["segment", "localize", "grid", "features"]);
    assert_eq!(scene.trace.input.channel_order, ChannelOrder::Bgr);

    let summary = SceneSummary::from_scene(7, &scene);
    assert_eq!(summary.index, 7);
    assert_eq!(summary.blocked_cells, scene.grid.blocked_count());
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["landmarks"][0]["role"], "start");
    assert_eq!(json["input"]["channelOrder"], "bgr");
}
