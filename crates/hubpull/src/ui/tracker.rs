use std::sync::{Arc, Mutex};

use hubpull_fetch::{DownloadProgress, ProgressSink};
use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;

// TODO: shorten the prefix column on narrow terminals.
const PB_STYLE: &str = "{spinner:.blue} {prefix:>24.cyan.bold} [{elapsed_precise}] {wide_bar:.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta}) {msg}";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const PB_CHARS: &str = "█▓▒░  ";

static PB_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    let pb_style = match ProgressStyle::with_template(PB_STYLE) {
        Ok(pb_style) => pb_style.tick_chars(TICK).progress_chars(PB_CHARS),
        Err(_) => return None,
    };

    Some(pb_style)
});

pub struct ProgressTracker {
    pb:     ProgressBar,
    finish: Option<String>,
}

impl ProgressTracker {
    pub fn set(&self, pos: u64) -> &Self {
        self.pb.set_position(pos);
        self
    }

    pub fn finish(self) {
        match self.finish {
            Some(msg) => self.pb.finish_with_message(msg),
            None => self.pb.finish(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProgressTrackerBuilder {
    len:    Option<u64>,
    prefix: Option<String>,
    finish: Option<String>,
}

impl ProgressTrackerBuilder {
    pub fn with_len(mut self, len: u64) -> Self {
        self.len = Some(len);
        self
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    pub fn with_finish(mut self, finish: &str) -> Self {
        self.finish = Some(finish.to_string());
        self
    }

    pub fn build(self) -> ProgressTracker {
        let pb = match self.len {
            Some(len) => ProgressBar::new(len),
            None => ProgressBar::new_spinner(),
        };
        let pb = match PB_TEMPLATE.as_ref() {
            Some(style) => pb.with_style(style.clone()),
            None => pb,
        };

        if let Some(prefix) = self.prefix {
            pb.set_prefix(prefix);
        }
        ProgressTracker {
            pb,
            finish: self.finish,
        }
    }
}

/// One progress bar per transferred file, driven by the engine's events.
///
/// Transfers are sequential, so a single live bar is kept; an event for a
/// different file closes the previous one.
#[derive(Clone, Default)]
pub struct FileProgress {
    current: Arc<Mutex<Option<(String, ProgressTracker)>>>,
}

impl FileProgress {
    pub fn new() -> Self { Self::default() }

    pub fn sink(&self) -> ProgressSink {
        let this = self.clone();
        Arc::new(move |progress: &DownloadProgress| this.update(progress))
    }

    fn update(&self, progress: &DownloadProgress) {
        let Ok(mut current) = self.current.lock() else {
            return;
        };

        if current.as_ref().is_some_and(|(path, _)| *path != progress.file_path) {
            if let Some((_, tracker)) = current.take() {
                tracker.finish();
            }
        }

        let (_, tracker) = current.get_or_insert_with(|| {
            let tracker = ProgressTrackerBuilder::default()
                .with_len(progress.file_size)
                .with_prefix(&progress.file_name)
                .with_finish("done")
                .build();
            (progress.file_path.clone(), tracker)
        });
        tracker.set(progress.bytes_downloaded);

        if progress.is_terminal() {
            if let Some((_, tracker)) = current.take() {
                tracker.finish();
            }
        }
    }

    /// Close a bar left open by a failed transfer.
    pub fn abandon(&self) {
        if let Ok(mut current) = self.current.lock() {
            if let Some((_, tracker)) = current.take() {
                tracker.pb.abandon();
            }
        }
    }
}
