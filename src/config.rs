//! Monitor configuration.

use crate::error::{Result, SystemError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client id that marks an unconfigured application.
pub const PLACEHOLDER_CLIENT_ID: &str = "YOUR_CLIENT_ID_HERE";

/// Configuration for the presence monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Minimum number of seconds between two presence updates
    pub update_interval_secs: u64,
    /// Discord application client id
    pub client_id: String,
    /// Whether to append the OS name to titles (also unlocks the frequency variant)
    pub show_os: bool,
    /// Delay between two loop iterations in milliseconds
    pub tick_interval_ms: u64,
    /// Asset key for the large presence image
    pub large_image: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            update_interval_secs: crate::DEFAULT_RPC_UPDATE_INTERVAL_SECS,
            client_id: crate::DEFAULT_DISCORD_CLIENT_ID.to_string(),
            show_os: false,
            tick_interval_ms: crate::DEFAULT_TICK_INTERVAL_MS,
            large_image: "system_monitor_logo".to_string(),
        }
    }
}

impl MonitorConfig {
    /// Create a new configuration with a custom client id and update interval.
    pub fn new(client_id: impl Into<String>, update_interval_secs: u64) -> Self {
        Self {
            client_id: client_id.into(),
            update_interval_secs,
            ..Default::default()
        }
    }

    /// Set the Discord application client id.
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    /// Set the presence update interval in seconds.
    pub fn with_update_interval(mut self, secs: u64) -> Self {
        self.update_interval_secs = secs;
        self
    }

    /// Show or hide the OS name in presence titles.
    pub fn with_show_os(mut self, show_os: bool) -> Self {
        self.show_os = show_os;
        self
    }

    /// Set the loop tick interval in milliseconds.
    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Set the large image asset key.
    pub fn with_large_image(mut self, key: impl Into<String>) -> Self {
        self.large_image = key.into();
        self
    }

    /// The presence update interval.
    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_secs)
    }

    /// The delay between two loop iterations.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Whether the client id points at a real application.
    pub fn has_client_id(&self) -> bool {
        let id = self.client_id.trim();
        !id.is_empty() && id != PLACEHOLDER_CLIENT_ID
    }

    /// Reject configurations the monitor cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.update_interval_secs == 0 {
            return Err(SystemError::config_error(
                "update interval must be at least one second",
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(SystemError::config_error("tick interval must be non-zero"));
        }
        Ok(())
    }
}
