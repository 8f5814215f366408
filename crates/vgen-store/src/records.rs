//! In-memory job collection shared by the store implementations.

use std::collections::HashMap;

use vgen_models::{VideoGallery, VideoId, VideoJob, VideoStatus};

use crate::error::{StoreError, StoreResult};

/// Jobs in insertion order plus an ID index.
#[derive(Debug, Default)]
pub(crate) struct Records {
    jobs: Vec<VideoJob>,
    index: HashMap<VideoId, usize>,
}

impl Records {
    pub(crate) fn from_jobs(jobs: Vec<VideoJob>) -> StoreResult<Self> {
        let mut records = Self::default();
        for job in jobs {
            records.insert(job)?;
        }
        Ok(records)
    }

    pub(crate) fn jobs(&self) -> &[VideoJob] {
        &self.jobs
    }

    pub(crate) fn len(&self) -> usize {
        self.jobs.len()
    }

    pub(crate) fn insert(&mut self, job: VideoJob) -> StoreResult<()> {
        if self.index.contains_key(&job.id) {
            return Err(StoreError::duplicate_id(job.id.as_str()));
        }
        self.index.insert(job.id.clone(), self.jobs.len());
        self.jobs.push(job);
        Ok(())
    }

    pub(crate) fn get(&self, id: &VideoId) -> StoreResult<&VideoJob> {
        self.index
            .get(id)
            .map(|&i| &self.jobs[i])
            .ok_or_else(|| StoreError::not_found(id.as_str()))
    }

    /// Overwrite a stored job wholesale, bypassing status rules.
    pub(crate) fn replace(&mut self, job: VideoJob) {
        if let Some(&i) = self.index.get(&job.id) {
            self.jobs[i] = job;
        }
    }

    pub(crate) fn remove(&mut self, id: &VideoId) -> Option<VideoJob> {
        let i = self.index.remove(id)?;
        let job = self.jobs.remove(i);
        for slot in self.index.values_mut() {
            if *slot > i {
                *slot -= 1;
            }
        }
        Some(job)
    }

    /// Newest first; jobs created at the same instant keep insertion order.
    pub(crate) fn page(&self, limit: usize, offset: usize) -> VideoGallery {
        let mut sorted: Vec<&VideoJob> = self.jobs.iter().collect();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        VideoGallery {
            videos: sorted.into_iter().skip(offset).take(limit).cloned().collect(),
            total_count: self.jobs.len() as u64,
        }
    }

    pub(crate) fn update_status(
        &mut self,
        id: &VideoId,
        status: VideoStatus,
        video_url: Option<String>,
        thumbnail_url: Option<String>,
    ) -> StoreResult<VideoJob> {
        let i = *self
            .index
            .get(id)
            .ok_or_else(|| StoreError::not_found(id.as_str()))?;
        let job = &mut self.jobs[i];
        job.apply_status(status, video_url, thumbnail_url);
        Ok(job.clone())
    }
}
