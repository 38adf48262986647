use std::fmt;
use std::time::Duration;

use hubpull_fs::FinalizeOptions;

pub const DEFAULT_ENDPOINT: &str = "https://huggingface.co";

/// Engine configuration shared by every component of a [`Hub`](crate::Hub).
///
/// # Examples
///
/// ```
/// use hubpull_fetch::HubOptions;
/// use std::time::Duration;
///
/// let options = HubOptions::default()
///     .endpoint("https://mirror.example.com")
///     .transfer_timeout(Duration::from_secs(600));
/// ```
#[derive(Clone)]
pub struct HubOptions {
    /// Base URL serving the listing and file endpoints.
    pub endpoint: String,

    /// Timeout for one tree listing request.
    ///
    /// Default: 30s
    pub list_timeout: Duration,

    /// Timeout for one whole-file request, body included.
    ///
    /// Default: 1800s
    pub transfer_timeout: Duration,

    /// Files larger than this many bytes report intermediate progress.
    ///
    /// Default: 100,000,000
    pub progress_threshold: u64,

    /// Minimum percentage advance between two intermediate progress events.
    ///
    /// Default: 10
    pub progress_step: u32,

    /// Maximum directory nesting followed below a model package.
    ///
    /// Default: 32
    pub max_depth: usize,

    pub finalize: FinalizeOptions,
}

impl fmt::Debug for HubOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubOptions")
            .field("endpoint", &self.endpoint)
            .field("list_timeout", &self.list_timeout)
            .field("transfer_timeout", &self.transfer_timeout)
            .field("progress_threshold", &self.progress_threshold)
            .field("progress_step", &self.progress_step)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

impl Default for HubOptions {
    fn default() -> Self {
        Self {
            endpoint:           DEFAULT_ENDPOINT.to_string(),
            list_timeout:       Duration::from_secs(30),
            transfer_timeout:   Duration::from_secs(1800),
            progress_threshold: 100_000_000,
            progress_step:      10,
            max_depth:          32,
            finalize:           FinalizeOptions::default(),
        }
    }
}

impl HubOptions {
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn list_timeout(mut self, timeout: Duration) -> Self {
        self.list_timeout = timeout;
        self
    }

    #[must_use]
    pub fn transfer_timeout(mut self, timeout: Duration) -> Self {
        self.transfer_timeout = timeout;
        self
    }

    #[must_use]
    pub fn progress_threshold(mut self, bytes: u64) -> Self {
        self.progress_threshold = bytes;
        self
    }

    #[must_use]
    pub fn progress_step(mut self, percent: u32) -> Self {
        self.progress_step = percent.max(1);
        self
    }

    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn finalize(mut self, finalize: FinalizeOptions) -> Self {
        self.finalize = finalize;
        self
    }
}
