//! Traits for system metrics collection.

use crate::metrics::data::MetricsSnapshot;

/// Trait for collecting system metrics.
///
/// Implementations never fail as a whole: facets that cannot be read are left
/// as `None` in the returned snapshot. The monitor loop is generic over this
/// trait so tests can drive it with scripted snapshots.
pub trait MetricsProvider {
    /// Collect a single snapshot of system metrics.
    fn collect_snapshot(&mut self) -> impl std::future::Future<Output = MetricsSnapshot> + Send;
}
