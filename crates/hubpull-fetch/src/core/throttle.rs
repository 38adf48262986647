use crate::data::{DownloadProgress, ProgressSink};

/// Reduces a continuous progress signal to step-sized crossings.
///
/// A fraction is let through when its integer percentage is at least `step`
/// points above the last one let through (starting from 0). The terminal
/// `1.0` is let through exactly once; nothing passes after it.
#[derive(Debug, Clone)]
pub struct ProgressThrottle {
    step:          u32,
    last_percent:  u32,
    terminal_sent: bool,
}

impl Default for ProgressThrottle {
    fn default() -> Self { Self::new(10) }
}

impl ProgressThrottle {
    pub fn new(step: u32) -> Self {
        Self {
            step:          step.max(1),
            last_percent:  0,
            terminal_sent: false,
        }
    }

    pub fn should_forward(&mut self, fraction: f64) -> bool {
        if self.terminal_sent {
            return false;
        }
        if fraction >= 1.0 {
            self.terminal_sent = true;
            self.last_percent = 100;
            return true;
        }

        let percent = (fraction.max(0.0) * 100.0).floor() as u32;
        if percent >= self.last_percent + self.step {
            self.last_percent = percent;
            true
        } else {
            false
        }
    }

    pub fn is_finished(&self) -> bool { self.terminal_sent }
}

/// A progress sink behind a [`ProgressThrottle`].
pub struct ThrottledSink {
    inner:    ProgressSink,
    throttle: ProgressThrottle,
}

impl ThrottledSink {
    pub fn new(inner: ProgressSink, step: u32) -> Self {
        Self {
            inner,
            throttle: ProgressThrottle::new(step),
        }
    }

    /// Forward `progress` if it crosses the next step or is terminal.
    /// Returns whether it was forwarded.
    pub fn report(&mut self, progress: &DownloadProgress) -> bool {
        self.offer(progress.fraction, || progress.clone())
    }

    /// Like [`report`](Self::report), but only builds the event when it is
    /// actually forwarded.
    pub fn offer(&mut self, fraction: f64, build: impl FnOnce() -> DownloadProgress) -> bool {
        let forward = self.throttle.should_forward(fraction);
        if forward {
            (self.inner)(&build());
        }
        forward
    }

    pub fn is_finished(&self) -> bool { self.throttle.is_finished() }
}
