//! # buddy-matching
//!
//! The matching core: builds comparable profiles from assessment records,
//! scores pairs of profiles, ranks discovery pools, and places users into
//! capacity-limited buddy groups.
//!
//! [`MatchingEngine`] is the entry point for consumers.

pub mod allocator;
pub mod discovery;
pub mod engine;
pub mod profile;
pub mod scoring;

pub use allocator::{AllocationReport, GroupAllocator};
pub use discovery::Discovery;
pub use engine::MatchingEngine;
pub use profile::ProfileBuilder;
pub use scoring::{CompatibilityScorer, ScoreBreakdown};
