//! Per-stage wall-clock timings for one request.

use std::time::{Duration, Instant};

/// Response header carrying the fetch and transform durations.
pub const X_IMAGE_TIMINGS: &str = "x-image-timings";

/// Durations of the stages that ran for one request.
///
/// A stage that did not complete (or never started) is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageTimings {
    pub fetch: Option<Duration>,
    pub detect: Option<Duration>,
    pub transform: Option<Duration>,
}

impl StageTimings {
    /// Renders the `X-Image-Timings` value, e.g. `get=1.2ms, resize=8.4ms`.
    ///
    /// Only completed stages are listed; `None` when neither fetch nor
    /// transform completed.
    pub fn header_value(&self) -> Option<String> {
        let entries: Vec<String> = [("get", self.fetch), ("resize", self.transform)]
            .into_iter()
            .filter_map(|(name, d)| d.map(|d| format!("{}={:?}", name, d)))
            .collect();

        if entries.is_empty() {
            None
        } else {
            Some(entries.join(", "))
        }
    }
}

/// Runs `f` and returns its output along with the elapsed time.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let started = Instant::now();
    let out = f();
    (out, started.elapsed())
}
