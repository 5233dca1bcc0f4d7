//! System metrics sampling and data structures.
//!
//! This module provides point-in-time readings for CPU usage, memory, disk
//! I/O and network I/O. Every facet is optional so a platform that cannot
//! report one of them still produces a usable snapshot.

pub mod data;
pub mod sampler;
pub mod traits;

// Re-export commonly used items
pub use data::MetricsSnapshot;
pub use sampler::MetricsSampler;
pub use traits::MetricsProvider;
