use super::overlay::{draw_polyline, fill_circle, GREEN, RED};
use crate::contours::{find_external_contours, Contour, Moments};
use crate::image::RgbFrame;
use crate::segment::ColorMask;
use log::debug;
use serde::{Deserialize, Serialize};

/// Semantic role of a landmark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandmarkRole {
    Start,
    Goal,
}

impl LandmarkRole {
    pub const ALL: [LandmarkRole; 2] = [LandmarkRole::Start, LandmarkRole::Goal];

    pub fn as_str(self) -> &'static str {
        match self {
            LandmarkRole::Start => "start",
            LandmarkRole::Goal => "goal",
        }
    }
}

/// How a landmark coordinate was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandmarkSource {
    /// Centroid of the largest contour.
    Contour,
    /// No contour enclosed any area; frame centre.
    Fallback,
}

/// Pixel coordinate with its role. Always inside the mask bounds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Landmark {
    pub role: LandmarkRole,
    pub x: usize,
    pub y: usize,
    pub source: LandmarkSource,
    /// Enclosed area of the selected contour (0 for the fallback).
    pub area: f64,
}

/// Overlay styling for [`BlobLocalizer`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizerParams {
    /// Render the diagnostic overlay at all.
    pub draw_overlay: bool,
    /// Contour line thickness in pixels.
    pub contour_thickness: usize,
    /// Radius of the landmark disc in pixels.
    pub marker_radius: usize,
}

impl Default for LocalizerParams {
    fn default() -> Self {
        Self {
            draw_overlay: true,
            contour_thickness: 2,
            marker_radius: 7,
        }
    }
}

/// Result of localizing one mask.
#[derive(Clone, Debug)]
pub struct Localization {
    pub landmark: Landmark,
    /// Contours found in the mask, degenerate ones included.
    pub contours: usize,
    pub overlay: Option<RgbFrame>,
}

#[derive(Clone, Debug, Default)]
pub struct BlobLocalizer {
    params: LocalizerParams,
}

impl BlobLocalizer {
    pub fn new(params: LocalizerParams) -> Self {
        Self { params }
    }

    /// Reduce `mask` to one landmark for `role`.
    pub fn locate(&self, mask: &ColorMask, role: LandmarkRole) -> Localization {
        let (w, h) = mask.dims();
        let contours = find_external_contours(mask.view());
        let measured: Vec<(&Contour, Moments)> =
            contours.iter().map(|c| (c, c.moments())).collect();

        let landmark = match select_largest(&measured) {
            Some((contour, m)) => {
                // Centroid of a boundary through pixel centres lies in the
                // component's bounding box; the clamp only guards rounding.
                let (cx, cy) = m.centroid().unwrap_or((0.0, 0.0));
                let x = (cx as usize).min(w.saturating_sub(1));
                let y = (cy as usize).min(h.saturating_sub(1));
                debug!(
                    "BlobLocalizer class={} role={} contour={} area={:.1} -> ({}, {})",
                    mask.class,
                    role.as_str(),
                    contour.index,
                    m.m00,
                    x,
                    y
                );
                Landmark {
                    role,
                    x,
                    y,
                    source: LandmarkSource::Contour,
                    area: m.m00,
                }
            }
            None => {
                debug!(
                    "BlobLocalizer class={} role={} contours={} -> centre fallback",
                    mask.class,
                    role.as_str(),
                    contours.len()
                );
                fallback_landmark(role, w, h)
            }
        };

        let overlay = self
            .params
            .draw_overlay
            .then(|| self.render_overlay(mask, &measured, &landmark));

        Localization {
            landmark,
            contours: contours.len(),
            overlay,
        }
    }

    fn render_overlay(
        &self,
        mask: &ColorMask,
        measured: &[(&Contour, Moments)],
        landmark: &Landmark,
    ) -> RgbFrame {
        let mut canvas = RgbFrame::from_gray(&mask.image);
        for (contour, m) in measured {
            if !m.is_degenerate() {
                draw_polyline(
                    &mut canvas,
                    &contour.points,
                    true,
                    GREEN,
                    self.params.contour_thickness,
                );
            }
        }
        if landmark.source == LandmarkSource::Contour {
            fill_circle(
                &mut canvas,
                landmark.x as i32,
                landmark.y as i32,
                self.params.marker_radius as i32,
                RED,
            );
        }
        canvas
    }
}

/// Frame-centre landmark used when a mask holds no usable contour.
pub fn fallback_landmark(role: LandmarkRole, w: usize, h: usize) -> Landmark {
    Landmark {
        role,
        x: w / 2,
        y: h / 2,
        source: LandmarkSource::Fallback,
        area: 0.0,
    }
}

/// Largest non-degenerate contour; the earliest one wins ties.
fn select_largest<'a, 'c>(
    measured: &'a [(&'c Contour, Moments)],
) -> Option<&'a (&'c Contour, Moments)> {
    let mut best: Option<&'a (&'c Contour, Moments)> = None;
    for entry in measured.iter().filter(|(_, m)| !m.is_degenerate()) {
        if best.map_or(true, |b| entry.1.m00 > b.1.m00) {
            best = Some(entry);
        }
    }
    best
}
