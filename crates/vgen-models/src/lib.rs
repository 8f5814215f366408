//! Shared data models for the VGen backend.
//!
//! This crate provides Serde-serializable types for:
//! - Video generation jobs and their lifecycle
//! - Style descriptors exposed to clients
//! - The sample catalog used to complete simulated jobs
//! - Request payloads and their validation rules

pub mod catalog;
pub mod request;
pub mod style;
pub mod video;

// Re-export common types
pub use catalog::{Catalog, CatalogError, SampleVideo, FALLBACK_STYLE};
pub use request::{
    ImageToVideoParams, TextToVideoRequest, DEFAULT_DURATION_SECS, MAX_DURATION_SECS,
    MIN_DURATION_SECS,
};
pub use style::{StyleGroups, StyleInfo, StyleKind};
pub use video::{JobKind, VideoGallery, VideoId, VideoJob, VideoStatus};
