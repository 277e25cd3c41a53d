use super::mask::{union_masks, ColorMask, MASK_ON};
use super::params::SegmenterParams;
use crate::color::{frame_to_hsv, HsvImage, HsvRange};
use crate::error::{ConfigError, FrameError};
use crate::image::RgbFrame;
use log::debug;
use std::collections::BTreeMap;

/// Masks produced for one frame, keyed by class name.
pub type SegmentedMasks = BTreeMap<String, ColorMask>;

/// Stateless HSV threshold segmenter.
#[derive(Clone, Debug)]
pub struct ColorSegmenter {
    params: SegmenterParams,
}

impl ColorSegmenter {
    /// Validate `params` and build the segmenter.
    pub fn new(params: SegmenterParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &SegmenterParams {
        &self.params
    }

    /// Produce one mask per class and per composite.
    pub fn segment(&self, frame: &RgbFrame) -> Result<SegmentedMasks, FrameError> {
        frame.check_buffer()?;
        let hsv = frame_to_hsv(frame);
        let mut masks = SegmentedMasks::new();

        for class in &self.params.classes {
            let mut mask = ColorMask::empty(&class.name, hsv.w, hsv.h);
            for range in &class.ranges {
                mask.or_assign(&in_range(&class.name, &hsv, range))?;
            }
            debug!(
                "ColorSegmenter class={} ranges={} on={}",
                class.name,
                class.ranges.len(),
                mask.count_on()
            );
            masks.insert(class.name.clone(), mask);
        }

        for composite in &self.params.composites {
            let members: Vec<&ColorMask> = composite
                .members
                .iter()
                .filter_map(|name| masks.get(name))
                .collect();
            let mask = union_masks(&composite.name, &members)?;
            masks.insert(composite.name.clone(), mask);
        }

        Ok(masks)
    }
}

/// 255 where every channel lies inside `range`, 0 elsewhere.
pub(crate) fn in_range(class: &str, hsv: &HsvImage, range: &HsvRange) -> ColorMask {
    let mut mask = ColorMask::empty(class, hsv.w, hsv.h);
    for (dst, &px) in mask.image.data.iter_mut().zip(hsv.data.iter()) {
        if range.contains(px) {
            *dst = MASK_ON;
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ChannelOrder;
    use crate::segment::ColorClass;

    fn frame_from(pixels: &[[u8; 3]], w: usize) -> RgbFrame {
        let data = pixels.iter().flatten().copied().collect();
        RgbFrame::from_raw(w, pixels.len() / w, ChannelOrder::Rgb, data).unwrap()
    }

    #[test]
    fn default_classes_pick_their_colors() {
        let frame = frame_from(
            &[
                [255, 0, 0],
                [0, 0, 255],
                [0, 200, 0],
                [255, 255, 255],
            ],
            4,
        );
        let seg = ColorSegmenter::new(SegmenterParams::default()).unwrap();
        let masks = seg.segment(&frame).unwrap();
        assert_eq!(masks["red"].image.data, vec![255, 0, 0, 0]);
        assert_eq!(masks["blue"].image.data, vec![0, 255, 0, 0]);
        assert_eq!(masks["green"].image.data, vec![0, 0, 255, 0]);
        assert_eq!(masks["white"].image.data, vec![0, 0, 0, 255]);
        assert_eq!(masks["navigable"].image.data, vec![255, 255, 0, 0]);
        assert_eq!(masks["obstacle"].image.data, vec![0, 0, 255, 255]);
    }

    #[test]
    fn overlapping_ranges_do_not_accumulate() {
        let params = SegmenterParams {
            classes: vec![ColorClass::new(
                "any",
                vec![
                    HsvRange::new([0, 0, 0], [180, 255, 255]),
                    HsvRange::new([0, 0, 0], [180, 255, 255]),
                ],
            )],
            composites: Vec::new(),
        };
        let frame = frame_from(&[[12, 34, 56], [0, 0, 0]], 2);
        let masks = ColorSegmenter::new(params).unwrap().segment(&frame).unwrap();
        assert_eq!(masks["any"].image.data, vec![255, 255]);
    }

    #[test]
    fn red_covers_both_ends_of_the_hue_circle() {
        // hue 175 falls in the upper red range, hue 0 in the lower one
        let frame = frame_from(&[[255, 0, 43], [255, 0, 0], [0, 200, 0]], 3);
        let seg = ColorSegmenter::new(SegmenterParams::default()).unwrap();
        let masks = seg.segment(&frame).unwrap();
        assert_eq!(masks["red"].image.data, vec![255, 255, 0]);
        assert_eq!(masks["navigable"].image.data, vec![255, 255, 0]);
    }

    #[test]
    fn short_buffer_is_a_frame_error() {
        let frame = RgbFrame {
            w: 4,
            h: 4,
            order: ChannelOrder::Rgb,
            data: vec![0; 10],
        };
        let seg = ColorSegmenter::new(SegmenterParams::default()).unwrap();
        assert_eq!(
            seg.segment(&frame),
            Err(FrameError::BufferSize {
                expected: 48,
                actual: 10
            })
        );
    }

    #[test]
    fn bgr_frames_segment_like_rgb_frames() {
        let rgb = frame_from(&[[255, 0, 0], [0, 0, 255]], 2);
        let bgr = RgbFrame::from_raw(2, 1, ChannelOrder::Bgr, vec![0, 0, 255, 255, 0, 0]).unwrap();
        let seg = ColorSegmenter::new(SegmenterParams::default()).unwrap();
        assert_eq!(seg.segment(&rgb).unwrap(), seg.segment(&bgr).unwrap());
    }
}
