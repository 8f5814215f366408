//! Video job record store.
//!
//! This crate provides:
//! - The [`VideoStore`] trait used by the API and the completion simulator
//! - An in-memory store for development and tests
//! - A JSON snapshot store that survives restarts
//! - Retry with exponential backoff for transient store errors

pub mod error;
pub mod file;
pub mod memory;
pub mod metrics;
mod records;
pub mod retry;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use retry::{with_retry, RetryConfig};
pub use store::VideoStore;
