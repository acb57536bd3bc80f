//! Pipeline orchestration.
//!
//! ```text
//! START ──fetch──▶ FETCHED ──detect──▶ FORMAT_KNOWN ──transform──▶ TRANSFORMED ──▶ DONE
//!   │                 │                     │
//!   └─────────────────┴─────────────────────┴──────────────▶ FAILED
//! ```
//!
//! Each transition is attempted once. The first error skips every remaining
//! stage and is returned as-is, carrying the timings of the stages that had
//! already completed.

use std::sync::Arc;
use std::time::Instant;

use super::detect::detect;
use super::error::PipelineError;
use super::fetch::Fetch;
use super::timing::{timed, StageTimings};
use super::transform::Transformer;
use super::types::{ImageRequest, ImageResult};
use crate::observability::metrics;

/// Sequences fetch → detect → transform for one request at a time.
///
/// Holds no per-request state; a single instance serves concurrent requests.
#[derive(Clone)]
pub struct Pipeline {
    fetcher: Arc<dyn Fetch>,
    transformer: Arc<dyn Transformer>,
}

impl Pipeline {
    pub fn new(fetcher: Arc<dyn Fetch>, transformer: Arc<dyn Transformer>) -> Self {
        Self {
            fetcher,
            transformer,
        }
    }

    /// Run the pipeline and emit the diagnostic record for the request.
    pub async fn run(&self, request: &ImageRequest) -> Result<ImageResult, PipelineError> {
        let mut input_bytes = None;
        let outcome = self.execute(request, &mut input_bytes).await;

        match &outcome {
            Ok(result) => {
                tracing::info!(
                    url = %request.source_url,
                    size = %request.size_spec,
                    format = %result.format,
                    get = ?result.timings.fetch,
                    detect = ?result.timings.detect,
                    resize = ?result.timings.transform,
                    input_bytes = ?input_bytes,
                    output_bytes = result.bytes.len(),
                    "Image transformed"
                );
            }
            Err(err) => {
                tracing::warn!(
                    url = %request.source_url,
                    size = %request.size_spec,
                    kind = err.kind().as_str(),
                    status = err.status_code(),
                    get = ?err.timings().fetch,
                    detect = ?err.timings().detect,
                    input_bytes = ?input_bytes,
                    error = %err,
                    "Image pipeline failed"
                );
            }
        }

        outcome
    }

    /// `input_bytes` is filled in as soon as the source body is in memory.
    async fn execute(
        &self,
        request: &ImageRequest,
        input_bytes: &mut Option<usize>,
    ) -> Result<ImageResult, PipelineError> {
        let mut timings = StageTimings::default();

        // START → FETCHED
        let fetch_started = Instant::now();
        let raw = self.fetcher.fetch(&request.source_url).await?;
        let fetch_elapsed = fetch_started.elapsed();
        timings.fetch = Some(fetch_elapsed);
        metrics::record_stage("fetch", fetch_elapsed);
        let raw_len = raw.len();
        *input_bytes = Some(raw_len);
        tracing::debug!(input_bytes = raw_len, get = ?fetch_elapsed, "Source fetched");

        // FETCHED → FORMAT_KNOWN
        let (detected, detect_elapsed) = timed(|| detect(&raw));
        let format = detected.map_err(|e| e.with_timings(timings.clone()))?;
        timings.detect = Some(detect_elapsed);
        metrics::record_stage("detect", detect_elapsed);

        // FORMAT_KNOWN → TRANSFORMED
        let transformer = Arc::clone(&self.transformer);
        let size = request.size_spec.clone();
        let transform_started = Instant::now();
        let transformed =
            tokio::task::spawn_blocking(move || transformer.transform(&raw, format, &size))
                .await
                .unwrap_or_else(|e| {
                    Err(PipelineError::resize_failed(format!(
                        "transform task aborted: {}",
                        e
                    )))
                });
        let bytes = transformed.map_err(|e| e.with_timings(timings.clone()))?;
        let transform_elapsed = transform_started.elapsed();
        timings.transform = Some(transform_elapsed);
        metrics::record_stage("transform", transform_elapsed);
        metrics::record_bytes(raw_len, bytes.len());

        Ok(ImageResult {
            bytes,
            format,
            timings,
        })
    }
}
