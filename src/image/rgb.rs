//! Three-channel 8-bit camera frames.
//!
//! A frame records the channel order its producer used. Nothing in the core
//! swaps channels in place: readers ask for `rgb_at` and the order tag is
//! honoured at that single point.
use super::GrayImage;
use crate::error::FrameError;
use crate::segment::ColorMask;
use serde::{Deserialize, Serialize};

/// Interleaved channel order of a frame buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbFrame {
    pub w: usize,
    pub h: usize,
    pub order: ChannelOrder,
    /// Interleaved samples, `3 * w` bytes per row.
    pub data: Vec<u8>,
}

impl RgbFrame {
    /// Black frame of size `w × h`.
    pub fn new(w: usize, h: usize, order: ChannelOrder) -> Self {
        Self {
            w,
            h,
            order,
            data: vec![0; w * h * 3],
        }
    }

    /// Wrap an interleaved buffer, checking that it holds `w × h × 3` bytes.
    pub fn from_raw(
        w: usize,
        h: usize,
        order: ChannelOrder,
        data: Vec<u8>,
    ) -> Result<Self, FrameError> {
        let frame = Self { w, h, order, data };
        frame.check_buffer()?;
        Ok(frame)
    }

    /// Fails unless `data` holds exactly `w × h × 3` bytes. The fields are
    /// public, so frames built by hand are checked before any pixel access.
    pub fn check_buffer(&self) -> Result<(), FrameError> {
        let expected = self.w * self.h * 3;
        if self.data.len() != expected {
            return Err(FrameError::BufferSize {
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    /// Gray replicated into all three channels.
    pub fn from_gray(gray: &GrayImage) -> Self {
        let mut data = Vec::with_capacity(gray.data.len() * 3);
        for &v in &gray.data {
            data.extend_from_slice(&[v, v, v]);
        }
        Self {
            w: gray.w,
            h: gray.h,
            order: ChannelOrder::Rgb,
            data,
        }
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.w + x) * 3
    }

    /// Sample at (x, y) returned as `[r, g, b]` whatever the storage order.
    #[inline]
    pub fn rgb_at(&self, x: usize, y: usize) -> [u8; 3] {
        let i = self.offset(x, y);
        let px = [self.data[i], self.data[i + 1], self.data[i + 2]];
        match self.order {
            ChannelOrder::Rgb => px,
            ChannelOrder::Bgr => [px[2], px[1], px[0]],
        }
    }

    /// Write an `[r, g, b]` color at (x, y) honouring the storage order.
    #[inline]
    pub fn put_rgb(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let i = self.offset(x, y);
        let px = match self.order {
            ChannelOrder::Rgb => rgb,
            ChannelOrder::Bgr => [rgb[2], rgb[1], rgb[0]],
        };
        self.data[i..i + 3].copy_from_slice(&px);
    }

    /// Mirror rows top-to-bottom. Simulated sensors deliver bottom-up rows.
    pub fn flip_vertical(&self) -> Self {
        let row_len = self.w * 3;
        let mut data = Vec::with_capacity(self.data.len());
        for y in (0..self.h).rev() {
            data.extend_from_slice(&self.data[y * row_len..(y + 1) * row_len]);
        }
        Self {
            w: self.w,
            h: self.h,
            order: self.order,
            data,
        }
    }

    /// Copy of the frame with every pixel outside `mask` set to black.
    pub fn masked(&self, mask: &ColorMask) -> Result<Self, FrameError> {
        let (mw, mh) = mask.dims();
        if (mw, mh) != (self.w, self.h) {
            return Err(FrameError::DimensionMismatch {
                expected: (self.w, self.h),
                actual: (mw, mh),
            });
        }
        let mut out = self.clone();
        for (px, &m) in out.data.chunks_exact_mut(3).zip(mask.image.data.iter()) {
            if m == 0 {
                px.fill(0);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bgr_frames_report_rgb_samples() {
        let frame = RgbFrame::from_raw(1, 1, ChannelOrder::Bgr, vec![10, 20, 30]).unwrap();
        assert_eq!(frame.rgb_at(0, 0), [30, 20, 10]);
    }

    #[test]
    fn flip_vertical_reverses_rows() {
        let data = vec![1, 1, 1, 2, 2, 2];
        let frame = RgbFrame::from_raw(1, 2, ChannelOrder::Rgb, data).unwrap();
        let flipped = frame.flip_vertical();
        assert_eq!(flipped.data, vec![2, 2, 2, 1, 1, 1]);
    }

    #[test]
    fn rejects_short_buffers() {
        let err = RgbFrame::from_raw(2, 2, ChannelOrder::Rgb, vec![0; 11]).unwrap_err();
        assert!(matches!(
            err,
            FrameError::BufferSize {
                expected: 12,
                actual: 11
            }
        ));
    }
}
