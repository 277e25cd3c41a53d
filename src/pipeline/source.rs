use crate::image::io::load_rgb_frame;
use crate::image::{ChannelOrder, RgbFrame};
use log::debug;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of one poll of a frame source.
#[derive(Clone, Debug)]
pub enum FramePoll {
    Ready(RgbFrame),
    /// Nothing new yet; poll again next iteration.
    NotReady,
    /// The source failed for this poll but may recover.
    Error(String),
    /// The source is gone; the loop ends.
    Disconnected,
}

/// Producer of camera frames, polled once per loop iteration.
pub trait FrameSource {
    fn poll(&mut self) -> FramePoll;
}

/// Replays a scripted sequence of polls, then reports `Disconnected`.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    polls: VecDeque<FramePoll>,
}

impl MemorySource {
    pub fn new(polls: impl IntoIterator<Item = FramePoll>) -> Self {
        Self {
            polls: polls.into_iter().collect(),
        }
    }

    pub fn from_frames(frames: impl IntoIterator<Item = RgbFrame>) -> Self {
        Self::new(frames.into_iter().map(FramePoll::Ready))
    }

    pub fn remaining(&self) -> usize {
        self.polls.len()
    }
}

impl FrameSource for MemorySource {
    fn poll(&mut self) -> FramePoll {
        self.polls.pop_front().unwrap_or(FramePoll::Disconnected)
    }
}

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Reads image files from a directory in file-name order.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    paths: Vec<PathBuf>,
    next: usize,
    order: ChannelOrder,
    flip_vertical: bool,
}

impl DirectorySource {
    /// List every PNG/JPEG file in `dir`.
    pub fn open(dir: &Path, order: ChannelOrder, flip_vertical: bool) -> Result<Self, String> {
        let entries = fs::read_dir(dir)
            .map_err(|e| format!("Failed to read directory {}: {e}", dir.display()))?;
        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| format!("Failed to list {}: {e}", dir.display()))?
                .path();
            let is_image = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
            if path.is_file() && is_image {
                paths.push(path);
            }
        }
        paths.sort();
        debug!("DirectorySource {} frames={}", dir.display(), paths.len());
        Ok(Self {
            paths,
            next: 0,
            order,
            flip_vertical,
        })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Path of the frame most recently returned by `poll`.
    pub fn current_path(&self) -> Option<&Path> {
        self.next
            .checked_sub(1)
            .and_then(|i| self.paths.get(i))
            .map(PathBuf::as_path)
    }
}

impl FrameSource for DirectorySource {
    fn poll(&mut self) -> FramePoll {
        let Some(path) = self.paths.get(self.next) else {
            return FramePoll::Disconnected;
        };
        self.next += 1;
        match load_rgb_frame(path, self.order) {
            Ok(frame) if self.flip_vertical => FramePoll::Ready(frame.flip_vertical()),
            Ok(frame) => FramePoll::Ready(frame),
            Err(err) => FramePoll::Error(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_source_disconnects_when_drained() {
        let mut src = MemorySource::new([FramePoll::NotReady]);
        assert!(matches!(src.poll(), FramePoll::NotReady));
        assert!(matches!(src.poll(), FramePoll::Disconnected));
        assert!(matches!(src.poll(), FramePoll::Disconnected));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let err = DirectorySource::open(Path::new("/nonexistent/frames"), ChannelOrder::Rgb, false)
            .unwrap_err();
        assert!(err.contains("/nonexistent/frames"));
    }
}
