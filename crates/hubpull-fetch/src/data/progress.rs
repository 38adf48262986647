use std::sync::Arc;

use tokio::sync::mpsc;

/// Progress of one file transfer.
///
/// The last value reported for a file always has `fraction == 1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadProgress {
    /// Completion in `[0, 1]`.
    pub fraction:         f64,
    pub file_name:        String,
    /// Local destination of the file.
    pub file_path:        String,
    pub file_size:        u64,
    pub bytes_downloaded: u64,
}

impl DownloadProgress {
    pub fn is_terminal(&self) -> bool { self.fraction >= 1.0 }

    pub fn percent(&self) -> u32 { (self.fraction.clamp(0.0, 1.0) * 100.0).floor() as u32 }
}

/// Receiver of progress events. Invoked synchronously on the transfer task.
pub type ProgressSink = Arc<dyn Fn(&DownloadProgress) + Send + Sync>;

pub fn noop_sink() -> ProgressSink { Arc::new(|_| {}) }

/// A sink that forwards every event into a channel.
///
/// Events are dropped once the receiver is gone.
pub fn channel_sink(tx: mpsc::UnboundedSender<DownloadProgress>) -> ProgressSink {
    Arc::new(move |progress| {
        let _ = tx.send(progress.clone());
    })
}
