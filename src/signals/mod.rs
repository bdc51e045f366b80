//! Signal detection: trigger classification, scoring and the gate engine

pub mod engine;
pub mod scoring;
pub mod trigger;

pub use engine::SignalEngine;
