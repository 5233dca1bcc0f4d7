//! The sampling and publishing loop.

use crate::config::MonitorConfig;
use crate::metrics::traits::MetricsProvider;
use crate::presence::{PresenceClient, PresencePublisher, TickOutcome};
use rand::Rng;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

/// Counters reported when the loop exits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonitorStats {
    pub ticks: u64,
    pub published: u64,
    pub send_failures: u64,
    pub offline_ticks: u64,
}

impl MonitorStats {
    fn record(&mut self, outcome: &TickOutcome) {
        self.ticks += 1;
        match outcome {
            TickOutcome::Published(_) => self.published += 1,
            TickOutcome::SendFailed => self.send_failures += 1,
            TickOutcome::Offline => self.offline_ticks += 1,
            TickOutcome::Throttled | TickOutcome::Incomplete | TickOutcome::Closed => {}
        }
    }
}

/// Drives one metrics provider and one presence publisher.
pub struct Monitor<P: MetricsProvider, C: PresenceClient, R: Rng> {
    provider: P,
    publisher: PresencePublisher<C, R>,
    tick_interval: Duration,
    stats: MonitorStats,
}

impl<P: MetricsProvider, C: PresenceClient, R: Rng> Monitor<P, C, R> {
    pub fn new(provider: P, publisher: PresencePublisher<C, R>, config: &MonitorConfig) -> Self {
        Self {
            provider,
            publisher,
            tick_interval: config.tick_interval(),
            stats: MonitorStats::default(),
        }
    }

    pub fn publisher(&self) -> &PresencePublisher<C, R> {
        &self.publisher
    }

    pub fn stats(&self) -> &MonitorStats {
        &self.stats
    }

    /// Sample once and hand the snapshot to the publisher.
    pub async fn tick_once(&mut self) -> TickOutcome {
        let snapshot = self.provider.collect_snapshot().await;
        let now = tokio::time::Instant::now().into_std();
        let outcome = self.publisher.tick(now, &snapshot);
        debug!(?outcome, "Tick complete");
        self.stats.record(&outcome);
        outcome
    }

    /// Run until `shutdown` resolves, then close the publisher.
    ///
    /// The publisher also closes on drop, so an unwinding panic releases the
    /// connection as well.
    pub async fn run<S>(mut self, shutdown: S) -> MonitorStats
    where
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        info!(
            "Monitoring started: tick every {:?}, presence every {:?}",
            self.tick_interval,
            self.publisher.update_interval()
        );

        loop {
            let tick_interval = self.tick_interval;
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
                _ = async {
                    self.tick_once().await;
                    tokio::time::sleep(tick_interval).await;
                } => {}
            }
        }

        self.publisher.close();
        info!(
            "Monitoring stopped after {} ticks ({} updates published)",
            self.stats.ticks, self.stats.published
        );
        self.stats.clone()
    }
}
