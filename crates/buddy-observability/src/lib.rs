//! # buddy-observability
//!
//! Tracing setup, allocation and discovery metrics, and degradation tracking
//! for the buddy matching engine.

pub mod degradation;
pub mod engine;
pub mod metrics;
pub mod tracing_setup;

pub use engine::ObservabilityEngine;
