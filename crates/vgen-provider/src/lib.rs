//! Client for the third-party (Runway) video generation API.
//!
//! The simulated generation flow never calls this client; it is the
//! integration point for a real backend.

pub mod client;
pub mod error;
pub mod types;

pub use client::{ProviderConfig, RunwayClient};
pub use error::{ProviderError, ProviderResult};
pub use types::GenerateRequest;
