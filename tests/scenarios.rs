mod common;

use common::synthetic::mask_from_rows;
use scene_grid::blob::{BlobLocalizer, LandmarkRole, LandmarkSource};
use scene_grid::occupancy::{GridBuildParams, GridBuilder};
use scene_grid::segment::ColorMask;

#[test]
fn block_in_corner_localizes_inside_block() {
    common::init_logger();
    let mask = mask_from_rows("red", &["##..", "##..", "....", "...."]);
    let lm = BlobLocalizer::default().locate(&mask, LandmarkRole::Start).landmark;
    assert_eq!(lm.source, LandmarkSource::Contour);
    assert!(lm.x <= 1 && lm.y <= 1, "{lm:?}");
    assert_ne!((lm.x, lm.y), (2, 2));
}

#[test]
fn empty_mask_falls_back_to_centre() {
    let mask = ColorMask::empty("blue", 8, 8);
    let lm = BlobLocalizer::default().locate(&mask, LandmarkRole::Goal).landmark;
    assert_eq!((lm.x, lm.y), (4, 4));
    assert_eq!(lm.source, LandmarkSource::Fallback);
    assert_eq!(lm.role, LandmarkRole::Goal);
}

#[test]
fn larger_block_wins_over_single_pixel() {
    let mask = mask_from_rows(
        "red",
        &[
            "#.......",
            "........",
            "........",
            ".....##.",
            ".....##.",
            "........",
        ],
    );
    let lm = BlobLocalizer::default().locate(&mask, LandmarkRole::Start).landmark;
    assert_eq!((lm.x, lm.y), (5, 3));
    assert_eq!(lm.source, LandmarkSource::Contour);
}

#[test]
fn larger_area_wins_regardless_of_scan_order() {
    let mask = mask_from_rows(
        "red",
        &[
            "##.......",
            "##.......",
            ".........",
            "....####.",
            "....####.",
            "....####.",
            "....####.",
        ],
    );
    let lm = BlobLocalizer::default().locate(&mask, LandmarkRole::Start).landmark;
    // Outline through pixel centres of the 4×4 block spans 4..=7, 3..=6.
    assert_eq!((lm.x, lm.y), (5, 4));
    assert!((lm.area - 9.0).abs() < 1e-9);
}

#[test]
fn isolated_noise_is_cleared_and_solid_block_kept() {
    let mask = ColorMask::from_fn("obstacle", 16, 16, |x, y| {
        (x, y) == (3, 3) || ((9..12).contains(&x) && (9..12).contains(&y))
    });
    let out = GridBuilder::new(GridBuildParams::default())
        .unwrap()
        .build(&[&mask])
        .unwrap();
    assert_eq!(out.grid.get(3, 3), 0, "noise pixel should be free");
    for y in 9..12 {
        for x in 9..12 {
            assert_eq!(out.grid.get(x, y), 1, "block pixel ({x},{y}) should be blocked");
        }
    }
    assert_eq!(out.grid.blocked_count(), 9);
}
