//! Upload storage for source images.
//!
//! Files are written once under a generated name. A file is only removed
//! when the job it was uploaded for could not be recorded.

pub mod client;
pub mod error;

pub use client::{upload_filename, UploadStorage, DEFAULT_EXTENSION};
pub use error::{StorageError, StorageResult};
