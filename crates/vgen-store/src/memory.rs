//! In-memory store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use vgen_models::{VideoGallery, VideoId, VideoJob, VideoStatus};

use crate::error::StoreResult;
use crate::records::Records;
use crate::store::VideoStore;

/// Store that keeps jobs in process memory. Contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VideoStore for MemoryStore {
    async fn insert(&self, job: VideoJob) -> StoreResult<()> {
        self.records.write().await.insert(job)
    }

    async fn get(&self, id: &VideoId) -> StoreResult<VideoJob> {
        self.records.read().await.get(id).cloned()
    }

    async fn list(&self, limit: usize, offset: usize) -> StoreResult<VideoGallery> {
        Ok(self.records.read().await.page(limit, offset))
    }

    async fn update_status(
        &self,
        id: &VideoId,
        status: VideoStatus,
        video_url: Option<String>,
        thumbnail_url: Option<String>,
    ) -> StoreResult<VideoJob> {
        self.records
            .write()
            .await
            .update_status(id, status, video_url, thumbnail_url)
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.records.read().await.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::error::StoreError;

    fn job_at(prompt: &str, minutes_ago: i64) -> VideoJob {
        let mut job = VideoJob::text(prompt, "realistic", 7, false);
        job.created_at = Utc::now() - Duration::minutes(minutes_ago);
        job
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = MemoryStore::new();
        let job = VideoJob::text("A dragon flying over a castle", "realistic", 7, false);
        store.insert(job.clone()).await.unwrap();

        assert_eq!(store.get(&job.id).await.unwrap(), job);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let store = MemoryStore::new();
        let job = VideoJob::text("p", "anime", 7, false);
        store.insert(job.clone()).await.unwrap();

        let err = store.insert(job).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(_)));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let store = MemoryStore::new();
        let err = store.get(&VideoId::from("nope")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == "nope"));
    }

    #[tokio::test]
    async fn test_list_newest_first_with_total() {
        let store = MemoryStore::new();
        for (prompt, age) in [("old", 30), ("newest", 1), ("middle", 10)] {
            store.insert(job_at(prompt, age)).await.unwrap();
        }

        let page = store.list(2, 0).await.unwrap();
        let prompts: Vec<_> = page.videos.iter().map(|j| j.prompt.clone().unwrap()).collect();
        assert_eq!(prompts, vec!["newest", "middle"]);
        assert_eq!(page.total_count, 3);

        let page = store.list(2, 2).await.unwrap();
        assert_eq!(page.videos.len(), 1);
        assert_eq!(page.videos[0].prompt.as_deref(), Some("old"));
        assert_eq!(page.total_count, 3);

        let page = store.list(5, 10).await.unwrap();
        assert!(page.videos.is_empty());
        assert_eq!(page.total_count, 3);
    }

    #[tokio::test]
    async fn test_list_ties_keep_insertion_order() {
        let store = MemoryStore::new();
        let at = Utc::now();
        for prompt in ["a", "b", "c"] {
            let mut job = VideoJob::text(prompt, "anime", 7, false);
            job.created_at = at;
            store.insert(job).await.unwrap();
        }

        let page = store.list(10, 0).await.unwrap();
        let prompts: Vec<_> = page.videos.iter().map(|j| j.prompt.clone().unwrap()).collect();
        assert_eq!(prompts, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_update_status() {
        let store = MemoryStore::new();
        let job = VideoJob::text("p", "anime", 7, false);
        store.insert(job.clone()).await.unwrap();

        let updated = store
            .update_status(
                &job.id,
                VideoStatus::Completed,
                Some("https://v".to_string()),
                Some("https://t".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(updated.status, VideoStatus::Completed);
        assert_eq!(store.get(&job.id).await.unwrap().video_url.as_deref(), Some("https://v"));
        assert_eq!(updated.prompt, job.prompt);
        assert_eq!(updated.created_at, job.created_at);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let store = MemoryStore::new();
        let err = store
            .update_status(&VideoId::new(), VideoStatus::Completed, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
