//! The record store contract.

use async_trait::async_trait;

use vgen_models::{VideoGallery, VideoId, VideoJob, VideoStatus};

use crate::error::StoreResult;

/// Persistent collection of video jobs keyed by ID.
///
/// Every operation is atomic on its own; nothing spans more than one call.
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Add a new job. Fails with `DuplicateId` if the ID is taken.
    async fn insert(&self, job: VideoJob) -> StoreResult<()>;

    /// Fetch a job. Fails with `NotFound` if absent.
    async fn get(&self, id: &VideoId) -> StoreResult<VideoJob>;

    /// Jobs newest first, windowed by `offset` / `limit`.
    ///
    /// `total_count` always reflects the whole store.
    async fn list(&self, limit: usize, offset: usize) -> StoreResult<VideoGallery>;

    /// Partial update of status and result URLs, returning the updated job.
    async fn update_status(
        &self,
        id: &VideoId,
        status: VideoStatus,
        video_url: Option<String>,
        thumbnail_url: Option<String>,
    ) -> StoreResult<VideoJob>;

    /// Number of stored jobs.
    async fn count(&self) -> StoreResult<u64>;
}
