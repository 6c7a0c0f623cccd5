//! Progress reporting for the linear decode scan.
//!
//! Frame capture decodes every frame from the start of the stream up to the
//! requested index, which can take a while for large indices. A
//! [`ProgressCallback`] attached through
//! [`ExtractOptions::with_progress`](crate::ExtractOptions::with_progress)
//! observes that scan.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use framegrab::{ExtractOptions, LumaWeights, ProgressCallback, ProgressInfo};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("{}/{} frames decoded", info.decoded, info.target);
//!     }
//! }
//!
//! let options = ExtractOptions::new().with_progress(Arc::new(PrintProgress));
//! framegrab::extract_with_options("input.mp4", 500, LumaWeights::REC601, &options)?;
//! # Ok::<(), framegrab::FrameGrabError>(())
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

/// A snapshot of decode progress.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Frames decoded so far from the selected stream.
    pub decoded: u64,
    /// Frames that must be decoded to reach the target (index + 1).
    pub target: u64,
    /// Completion percentage (0.0 – 100.0).
    pub percentage: f32,
    /// Wall-clock time since decoding started.
    pub elapsed: Duration,
}

/// Receives progress updates while frames are decoded.
///
/// Callbacks observe the scan but cannot stop it.
pub trait ProgressCallback: Send + Sync {
    /// Called every `batch_size` decoded frames and once when the scan ends.
    fn on_progress(&self, info: &ProgressInfo);
}

/// Discards every notification. The default callback.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Counts decoded frames and fires the callback in batches.
pub(crate) struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    target: u64,
    decoded: u64,
    batch_size: u64,
    since_last_report: u64,
    start_time: Instant,
}

impl ProgressTracker {
    pub(crate) fn new(callback: Arc<dyn ProgressCallback>, target: u64, batch_size: u64) -> Self {
        Self {
            callback,
            target: target.max(1),
            decoded: 0,
            batch_size: batch_size.max(1),
            since_last_report: 0,
            start_time: Instant::now(),
        }
    }

    /// Record one decoded frame.
    pub(crate) fn advance(&mut self) {
        self.decoded += 1;
        self.since_last_report += 1;
        if self.since_last_report >= self.batch_size {
            self.report();
            self.since_last_report = 0;
        }
    }

    /// Emit a final report regardless of the batch position.
    pub(crate) fn finish(&self) {
        self.report();
    }

    fn report(&self) {
        let info = ProgressInfo {
            decoded: self.decoded,
            target: self.target,
            percentage: (self.decoded.min(self.target) as f32 / self.target as f32) * 100.0,
            elapsed: self.start_time.elapsed(),
        };
        self.callback.on_progress(&info);
    }
}
