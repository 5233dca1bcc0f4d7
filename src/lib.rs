//! # System Presence - live telemetry in Discord Rich Presence
//!
//! Samples CPU, memory, disk I/O and network I/O about once per second and
//! publishes a rotating two-line summary to the local Discord client's Rich
//! Presence at a fixed cadence.
//!
//! ## Features
//!
//! - **Per-facet sampling**: a facet the platform cannot report is simply absent
//! - **Best-effort presence**: failed handshakes and sends reconnect on the next tick
//! - **Throttled updates**: never two updates closer than the configured interval
//! - **Library + Binary**: use the sampler and publisher as a crate or run the CLI
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use system_presence::{DiscordClient, Monitor, MetricsSampler, MonitorConfig, PresencePublisher};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let config = MonitorConfig::default().with_show_os(true);
//!     let publisher = PresencePublisher::new(DiscordClient::new(), rand::rng(), &config, "Linux");
//!     let monitor = Monitor::new(MetricsSampler::new(), publisher, &config);
//!
//!     let shutdown = async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     };
//!     monitor.run(shutdown).await;
//! }
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod monitor;
pub mod presence;

// Re-export public API
pub use config::MonitorConfig;
pub use error::{Result, SystemError};
pub use metrics::{
    data::{
        CpuReading, DiskIoReading, HostInfo, MemoryReading, MetricsSnapshot, NetworkIoReading,
        SwapReading,
    },
    sampler::MetricsSampler,
    traits::MetricsProvider,
};
pub use monitor::{Monitor, MonitorStats};
pub use presence::{
    format_bytes, ConnectionState, DiscordClient, PresenceClient, PresencePublisher,
    PresenceUpdate, TickOutcome, VariantKind,
};

/// The default presence update interval in seconds
pub const DEFAULT_RPC_UPDATE_INTERVAL_SECS: u64 = 10;

/// The default Discord application client id
pub const DEFAULT_DISCORD_CLIENT_ID: &str = "1380200369144987760";

/// The default delay between two loop iterations in milliseconds
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;
