//! Video generation job models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::catalog::SampleVideo;

/// Unique identifier for a video generation job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct VideoId(pub String);

impl VideoId {
    /// Generate a new random video ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for VideoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VideoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VideoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Generation status of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum VideoStatus {
    /// Waiting for the simulated generation to finish
    #[default]
    Generating,
    /// Sample result attached
    Completed,
    /// Never produced by the simulated flow; kept for API compatibility
    Failed,
}

impl VideoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoStatus::Generating => "generating",
            VideoStatus::Completed => "completed",
            VideoStatus::Failed => "failed",
        }
    }

    /// Check if this is a terminal state (no more updates expected).
    pub fn is_terminal(&self) -> bool {
        matches!(self, VideoStatus::Completed | VideoStatus::Failed)
    }
}

impl fmt::Display for VideoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which endpoint created a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    TextToVideo,
    ImageToVideo,
}

impl JobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::TextToVideo => "text_to_video",
            JobKind::ImageToVideo => "image_to_video",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A video generation job as stored and returned to clients.
///
/// Exactly one of `prompt` and `image_filename` is set, depending on the
/// job kind. `video_url` and `thumbnail_url` stay empty until the job is
/// completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoJob {
    /// Unique job ID
    pub id: VideoId,

    /// Text prompt (text-to-video jobs)
    #[serde(default)]
    pub prompt: Option<String>,

    /// Stored source image name (image-to-video jobs)
    #[serde(default)]
    pub image_filename: Option<String>,

    /// Requested style, not validated against the catalog
    pub style: String,

    /// Requested length in seconds
    pub duration: u32,

    /// Generation status
    #[serde(default)]
    pub status: VideoStatus,

    #[serde(default)]
    pub video_url: Option<String>,

    #[serde(default)]
    pub thumbnail_url: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub nsfw_enabled: bool,
}

impl VideoJob {
    /// Create a text-to-video job in the `generating` state.
    pub fn text(
        prompt: impl Into<String>,
        style: impl Into<String>,
        duration: u32,
        nsfw_enabled: bool,
    ) -> Self {
        Self::with_id(VideoId::new(), Some(prompt.into()), None, style, duration, nsfw_enabled)
    }

    /// Create an image-to-video job in the `generating` state.
    ///
    /// The ID is supplied by the caller since the stored image name is
    /// derived from it.
    pub fn image(
        id: VideoId,
        image_filename: impl Into<String>,
        style: impl Into<String>,
        duration: u32,
        nsfw_enabled: bool,
    ) -> Self {
        Self::with_id(id, None, Some(image_filename.into()), style, duration, nsfw_enabled)
    }

    fn with_id(
        id: VideoId,
        prompt: Option<String>,
        image_filename: Option<String>,
        style: impl Into<String>,
        duration: u32,
        nsfw_enabled: bool,
    ) -> Self {
        Self {
            id,
            prompt,
            image_filename,
            style: style.into(),
            duration,
            status: VideoStatus::Generating,
            video_url: None,
            thumbnail_url: None,
            created_at: Utc::now(),
            nsfw_enabled,
        }
    }

    pub fn kind(&self) -> JobKind {
        if self.image_filename.is_some() {
            JobKind::ImageToVideo
        } else {
            JobKind::TextToVideo
        }
    }

    /// Apply a status update with optional result URLs.
    ///
    /// A terminal job is never moved back to `generating`; such updates
    /// are ignored and `false` is returned.
    pub fn apply_status(
        &mut self,
        status: VideoStatus,
        video_url: Option<String>,
        thumbnail_url: Option<String>,
    ) -> bool {
        if self.status.is_terminal() && status == VideoStatus::Generating {
            return false;
        }

        self.status = status;
        if status == VideoStatus::Completed {
            self.video_url = video_url;
            self.thumbnail_url = thumbnail_url;
        } else {
            self.video_url = None;
            self.thumbnail_url = None;
        }
        true
    }

    /// Mark as completed with the given sample.
    pub fn complete(mut self, sample: &SampleVideo) -> Self {
        self.apply_status(
            VideoStatus::Completed,
            Some(sample.video_url.clone()),
            Some(sample.thumbnail_url.clone()),
        );
        self
    }
}

/// A page of the gallery.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VideoGallery {
    pub videos: Vec<VideoJob>,
    /// Number of jobs in the store, independent of the page window
    pub total_count: u64,
}
