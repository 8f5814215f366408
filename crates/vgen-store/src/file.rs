//! JSON snapshot store.
//!
//! Keeps the working set in memory and rewrites a single JSON file after
//! every mutation. The file is written to a sibling temp path and renamed
//! into place so a crash mid-write leaves the previous snapshot intact.

use std::path::{Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use vgen_models::{VideoGallery, VideoId, VideoJob, VideoStatus};

use crate::error::StoreResult;
use crate::metrics::record_operation;
use crate::records::Records;
use crate::store::VideoStore;

/// Store backed by a JSON file on local disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    records: RwLock<Records>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading an existing snapshot if present.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        let records = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let jobs: Vec<VideoJob> = serde_json::from_slice(&bytes)?;
                info!("Loaded {} videos from {}", jobs.len(), path.display());
                Records::from_jobs(jobs)?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }
                info!("Starting empty video store at {}", path.display());
                Records::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    async fn persist(&self, records: &Records) -> StoreResult<()> {
        let start = Instant::now();
        let bytes = serde_json::to_vec(records.jobs())?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(
            path = %self.path.display(),
            bytes = bytes.len(),
            "Persisted video snapshot"
        );
        record_operation("persist", start.elapsed().as_secs_f64());
        Ok(())
    }
}

#[async_trait]
impl VideoStore for JsonFileStore {
    async fn insert(&self, job: VideoJob) -> StoreResult<()> {
        let mut records = self.records.write().await;
        let id = job.id.clone();
        records.insert(job)?;

        if let Err(e) = self.persist(&records).await {
            records.remove(&id);
            return Err(e);
        }
        Ok(())
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
        let mut records = self.records.write().await;
        let previous = records.get(id)?.clone();
        let updated = records.update_status(id, status, video_url, thumbnail_url)?;

        if let Err(e) = self.persist(&records).await {
            records.replace(previous);
            return Err(e);
        }
        Ok(updated)
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.records.read().await.len() as u64)
    }
}
