//! Data structures for system metrics.

use serde::{Deserialize, Serialize};

/// A point-in-time bundle of whatever metric readings were available.
///
/// Every facet is optional: a platform that cannot report disk counters still
/// yields a usable snapshot with `disk_io: None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Timestamp when this snapshot was taken (Unix timestamp in milliseconds)
    pub timestamp: u64,
    /// CPU usage statistics
    pub cpu: Option<CpuReading>,
    /// Memory usage information
    pub memory: Option<MemoryReading>,
    /// Cumulative disk I/O counters
    pub disk_io: Option<DiskIoReading>,
    /// Cumulative network I/O counters
    pub network_io: Option<NetworkIoReading>,
}

/// CPU usage statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuReading {
    /// Overall CPU usage percentage (0.0 to 100.0)
    pub overall_percent: f32,
    /// Per-core CPU usage percentages
    pub core_percents: Vec<f32>,
    /// Frequency information, when the platform exposes it
    pub frequency: Option<CpuFrequency>,
}

/// CPU clock frequency in MHz.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuFrequency {
    pub current_mhz: f64,
    pub min_mhz: Option<f64>,
    pub max_mhz: Option<f64>,
}

/// Memory usage information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryReading {
    /// Total system memory in bytes
    pub total_bytes: u64,
    /// Used memory in bytes
    pub used_bytes: u64,
    /// Available memory in bytes
    pub available_bytes: u64,
    /// Memory usage percentage (`used / total`, 0.0 to 100.0)
    pub percent: f32,
    /// Swap information, only present when the system has swap configured
    pub swap: Option<SwapReading>,
}

/// Swap memory information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwapReading {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub percent: f32,
}

/// Disk I/O counters accumulated since boot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskIoReading {
    pub read_bytes: u64,
    pub write_bytes: u64,
    pub read_count: u64,
    pub write_count: u64,
    /// Milliseconds spent reading, where reported
    pub read_time_ms: Option<u64>,
    /// Milliseconds spent writing, where reported
    pub write_time_ms: Option<u64>,
}

/// Network I/O counters accumulated since boot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkIoReading {
    pub bytes_sent: u64,
    pub bytes_received: u64,
    pub packets_sent: u64,
    pub packets_received: u64,
    pub errors_in: u64,
    pub errors_out: u64,
    /// Dropped inbound packets, where reported
    pub drops_in: Option<u64>,
    /// Dropped outbound packets, where reported
    pub drops_out: Option<u64>,
}

/// General host information, logged once at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostInfo {
    pub os_name: String,
    pub os_version: String,
    pub kernel_version: String,
    pub hostname: String,
    pub architecture: String,
    pub processor: String,
}

impl MetricsSnapshot {
    /// Create an empty snapshot stamped with the current time.
    pub fn new() -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp_millis().max(0) as u64,
            ..Default::default()
        }
    }

    /// Whether the two facets required for publishing are present.
    pub fn is_publishable(&self) -> bool {
        self.cpu.is_some() && self.memory.is_some()
    }
}

/// Percentage of `part` in `total`, or zero when `total` is zero.
pub fn percent_of(part: u64, total: u64) -> f32 {
    if total > 0 {
        (part as f64 / total as f64 * 100.0) as f32
    } else {
        0.0
    }
}
