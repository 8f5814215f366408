//! Background services.

pub mod simulator;

pub use simulator::CompletionSimulator;
