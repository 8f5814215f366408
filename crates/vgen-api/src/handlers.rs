//! Request handlers.

pub mod generation;
pub mod health;
pub mod styles;
pub mod videos;

pub use generation::*;
pub use health::*;
pub use styles::*;
pub use videos::*;
