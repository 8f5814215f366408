//! Background completion of submitted jobs.
//!
//! Every accepted submission schedules one task that waits for the
//! configured delay, picks a sample for the job's style and marks the job
//! completed. Tasks are tracked so shutdown can wait for them.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, info_span, Instrument};

use vgen_models::{Catalog, VideoId, VideoJob, VideoStatus};
use vgen_store::{with_retry, RetryConfig, StoreError, StoreResult, VideoStore};

use crate::metrics;

/// Completes jobs after a simulated generation delay.
#[derive(Clone)]
pub struct CompletionSimulator {
    store: Arc<dyn VideoStore>,
    catalog: Arc<Catalog>,
    delay: Duration,
    retry: RetryConfig,
    tracker: TaskTracker,
}

impl CompletionSimulator {
    pub fn new(store: Arc<dyn VideoStore>, catalog: Arc<Catalog>, delay: Duration) -> Self {
        Self {
            store,
            catalog,
            delay,
            retry: RetryConfig::default(),
            tracker: TaskTracker::new(),
        }
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Number of scheduled completions that have not finished yet.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Schedule completion of a job. Returns immediately.
    pub fn schedule(&self, id: VideoId, style: String) {
        let this = self.clone();
        let span = info_span!("simulate_completion", video_id = %id, style = %style);

        metrics::simulation_started();
        self.tracker.spawn(
            async move {
                let start = Instant::now();
                tokio::time::sleep(this.delay).await;

                match this.complete(&id, &style).await {
                    Ok(job) => {
                        metrics::record_simulation_completed(&job.style, start.elapsed().as_secs_f64());
                        info!(
                            video_url = job.video_url.as_deref().unwrap_or_default(),
                            "Video generation completed"
                        );
                    }
                    Err(e) => {
                        metrics::record_simulation_failed(failure_reason(&e));
                        error!("Failed to complete video generation: {}", e);
                    }
                }
                metrics::simulation_finished();
            }
            .instrument(span),
        );
    }

    /// Pick a sample for `style` and mark the job completed.
    ///
    /// Transient store errors are retried; the job is left in `generating`
    /// if every attempt fails.
    pub async fn complete(&self, id: &VideoId, style: &str) -> StoreResult<VideoJob> {
        let sample = {
            let mut rng = rand::rng();
            self.catalog.pick(style, &mut rng).clone()
        };

        debug!(video_url = %sample.video_url, "Picked sample");

        with_retry(&self.retry, "complete_job", || {
            let sample = sample.clone();
            async move {
                self.store
                    .update_status(
                        id,
                        VideoStatus::Completed,
                        Some(sample.video_url),
                        Some(sample.thumbnail_url),
                    )
                    .await
            }
        })
        .await
    }

    /// Close the tracker and wait for in-flight completions.
    ///
    /// Returns `false` if the grace period elapsed first; the remaining jobs
    /// stay in `generating`.
    pub async fn shutdown(&self, grace: Duration) -> bool {
        self.tracker.close();
        let pending = self.tracker.len();
        if pending > 0 {
            info!("Waiting for {} in-flight simulations", pending);
        }
        tokio::time::timeout(grace, self.tracker.wait()).await.is_ok()
    }
}

fn failure_reason(e: &StoreError) -> &'static str {
    match e {
        StoreError::NotFound(_) => "not_found",
        StoreError::DuplicateId(_) => "duplicate",
        StoreError::Io(_) => "io",
        StoreError::Json(_) => "json",
    }
}
