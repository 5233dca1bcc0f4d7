//! Throttled, best-effort presence publishing.

use crate::config::MonitorConfig;
use crate::metrics::data::MetricsSnapshot;
use crate::presence::{
    client::{PresenceClient, PresenceUpdate},
    format::{presence_variants, DisplayOptions, Variant, VariantKind},
    throttle::PublishThrottle,
};
use rand::Rng;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Lifecycle of the presence connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
    /// Closed for good; no further handshakes are attempted.
    Closed,
}

/// What a single loop tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// A variant was sent.
    Published(VariantKind),
    /// The send failed and the connection was reset.
    SendFailed,
    /// Connected, but the interval has not elapsed yet.
    Throttled,
    /// Connected and due, but CPU or memory readings were missing.
    Incomplete,
    /// No connection could be established this tick.
    Offline,
    /// The publisher has been closed.
    Closed,
}

/// Owns the presence connection and decides when and what to publish.
///
/// `R` is the random source used to pick a variant; tests pass a seeded rng.
pub struct PresencePublisher<C: PresenceClient, R: Rng> {
    client: C,
    rng: R,
    client_id: String,
    state: ConnectionState,
    throttle: PublishThrottle,
    display: DisplayOptions,
    large_image: String,
    start_timestamp: i64,
}

impl<C: PresenceClient, R: Rng> PresencePublisher<C, R> {
    /// Create a disconnected publisher.
    pub fn new(client: C, rng: R, config: &MonitorConfig, os_name: impl Into<String>) -> Self {
        Self {
            client,
            rng,
            client_id: config.client_id.clone(),
            state: ConnectionState::Disconnected,
            throttle: PublishThrottle::new(config.update_interval()),
            display: DisplayOptions::new(config.show_os, os_name),
            large_image: config.large_image.clone(),
            start_timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// Override the elapsed-time origin shown by the presence host.
    pub fn with_start_timestamp(mut self, unix_secs: i64) -> Self {
        self.start_timestamp = unix_secs;
        self
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn update_interval(&self) -> std::time::Duration {
        self.throttle.interval()
    }

    /// Attempt the handshake unless already connected or closed.
    pub fn try_connect(&mut self, client_id: &str) -> bool {
        match self.state {
            ConnectionState::Connected => return true,
            ConnectionState::Closed => return false,
            ConnectionState::Disconnected => {}
        }

        let id = client_id.trim();
        if id.is_empty() || id == crate::config::PLACEHOLDER_CLIENT_ID {
            debug!("No presence client id configured, skipping connect");
            return false;
        }

        match self.client.connect(id) {
            Ok(()) => {
                info!("Connected to presence service on {}", self.display.os_name);
                self.state = ConnectionState::Connected;
                true
            }
            Err(err) => {
                warn!("Failed to connect to presence service: {}", err);
                debug!("{}", connect_hint());
                self.state = ConnectionState::Disconnected;
                false
            }
        }
    }

    /// The candidate pool for a snapshot, empty when CPU or memory is missing.
    pub fn variants(&self, snapshot: &MetricsSnapshot) -> Vec<Variant> {
        match (&snapshot.cpu, &snapshot.memory) {
            (Some(cpu), Some(memory)) => presence_variants(
                cpu,
                memory,
                snapshot.disk_io.as_ref(),
                snapshot.network_io.as_ref(),
                &self.display,
            ),
            _ => Vec::new(),
        }
    }

    /// Render and send one randomly chosen variant. No-op when disconnected.
    pub fn publish(&mut self, snapshot: &MetricsSnapshot) -> TickOutcome {
        match self.state {
            ConnectionState::Connected => {}
            ConnectionState::Disconnected => return TickOutcome::Offline,
            ConnectionState::Closed => return TickOutcome::Closed,
        }

        let mut variants = self.variants(snapshot);
        if variants.is_empty() {
            return TickOutcome::Incomplete;
        }
        let variant = variants.swap_remove(self.rng.random_range(0..variants.len()));

        let update = PresenceUpdate {
            details: variant.title,
            state: variant.subtitle,
            large_image: self.large_image.clone(),
            large_text: format!("System Performance Monitor - {}", self.display.os_name),
            small_text: format!("Monitoring {} System...", self.display.os_name),
            start_timestamp: self.start_timestamp,
        };

        match self.client.update(&update) {
            Ok(()) => {
                debug!(kind = ?variant.kind, "Presence updated: {} / {}", update.details, update.state);
                TickOutcome::Published(variant.kind)
            }
            Err(err) => {
                warn!("Error updating presence, will reconnect: {}", err);
                self.state = ConnectionState::Disconnected;
                TickOutcome::SendFailed
            }
        }
    }

    /// One loop iteration: reconnect if needed, then publish when due.
    pub fn tick(&mut self, now: Instant, snapshot: &MetricsSnapshot) -> TickOutcome {
        match self.state {
            ConnectionState::Closed => return TickOutcome::Closed,
            ConnectionState::Disconnected => {
                let id = self.client_id.clone();
                if !self.try_connect(&id) {
                    return TickOutcome::Offline;
                }
            }
            ConnectionState::Connected => {}
        }

        if !self.throttle.is_due(now) {
            return TickOutcome::Throttled;
        }
        if !snapshot.is_publishable() {
            return TickOutcome::Incomplete;
        }

        let outcome = self.publish(snapshot);
        self.throttle.mark(now);
        outcome
    }

    /// Close the connection. Failures are logged, never retried.
    pub fn close(&mut self) {
        if self.state == ConnectionState::Connected {
            match self.client.close() {
                Ok(()) => info!("Presence connection closed"),
                Err(err) => warn!("Error closing presence connection: {}", err),
            }
        }
        self.state = ConnectionState::Closed;
    }
}

impl<C: PresenceClient, R: Rng> Drop for PresencePublisher<C, R> {
    fn drop(&mut self) {
        self.close();
    }
}

fn connect_hint() -> &'static str {
    if cfg!(target_os = "linux") {
        "Make sure Discord is running in the same session (DISPLAY and XDG_RUNTIME_DIR set)"
    } else if cfg!(target_os = "macos") {
        "Make sure Discord is running and has the required permissions"
    } else if cfg!(windows) {
        "Make sure Discord is running as the same user"
    } else {
        "Make sure Discord is running"
    }
}
