use super::scene::ScenePipeline;
use super::sink::SceneSink;
use super::source::{FramePoll, FrameSource};
use log::{debug, info, warn};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Counters accumulated by [`run_loop`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    /// Frames received from the source, processed or not.
    pub frames_received: u64,
    pub frames_processed: u64,
    pub not_ready: u64,
    pub source_errors: u64,
    pub frame_errors: u64,
    /// The loop stopped on the cancellation flag.
    pub cancelled: bool,
    /// The loop stopped because the source disconnected.
    pub disconnected: bool,
}

/// Poll `source` until it disconnects or `cancel` is raised.
///
/// The flag is read once per iteration before polling, so a frame already in
/// progress always reaches the sink. Frame errors and source errors are
/// logged and counted; they never stop the loop.
pub fn run_loop<S, K>(
    source: &mut S,
    pipeline: &ScenePipeline,
    sink: &mut K,
    cancel: &AtomicBool,
) -> RunStats
where
    S: FrameSource + ?Sized,
    K: SceneSink + ?Sized,
{
    let mut stats = RunStats::default();
    loop {
        if cancel.load(Ordering::SeqCst) {
            info!("run_loop cancelled after {} frames", stats.frames_processed);
            stats.cancelled = true;
            break;
        }
        match source.poll() {
            FramePoll::Ready(frame) => {
                let index = stats.frames_received;
                stats.frames_received += 1;
                match pipeline.process(&frame) {
                    Ok(scene) => {
                        sink.emit(index, &scene);
                        stats.frames_processed += 1;
                    }
                    Err(err) => {
                        warn!("frame {index} skipped: {err}");
                        stats.frame_errors += 1;
                    }
                }
            }
            FramePoll::NotReady => {
                stats.not_ready += 1;
            }
            FramePoll::Error(msg) => {
                warn!("frame source error: {msg}");
                stats.source_errors += 1;
            }
            FramePoll::Disconnected => {
                info!("frame source disconnected");
                stats.disconnected = true;
                break;
            }
        }
    }
    debug!("run_loop finished {stats:?}");
    stats
}
