//! Periodic eviction of inactive clients.

use alloc::sync::Arc;
use core::time::Duration;

use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::{
    config::{HubConfig, MIN_SWEEP_INTERVAL, deadline_after},
    registry::ClientRegistry,
};

/// Background sweep that evicts clients idle past the client timeout.
#[derive(Debug, Clone)]
pub struct Janitor {
    registry: Arc<ClientRegistry>,
    client_timeout: Duration,
    sweep_interval: Duration,
}

impl Janitor {
    /// Create a janitor for `registry` using the timings in `config`.
    ///
    /// A zero sweep interval is raised to [`MIN_SWEEP_INTERVAL`].
    #[must_use]
    pub fn new(registry: Arc<ClientRegistry>, config: &HubConfig) -> Self {
        Self {
            registry,
            client_timeout: config.client_timeout,
            sweep_interval: config.sweep_interval.max(MIN_SWEEP_INTERVAL),
        }
    }

    /// Run one sweep now. Returns the number of evicted clients.
    pub async fn sweep_once(&self) -> usize {
        let evicted = self.registry.sweep(self.client_timeout).await;
        if !evicted.is_empty() {
            let remaining = self.registry.len().await;
            tracing::info!(evicted = evicted.len(), remaining, "janitor sweep");
        }
        evicted.len()
    }

    /// Sweep every `sweep_interval` until `token` is cancelled.
    ///
    /// The first sweep happens one full interval after start.
    pub async fn run(self, token: CancellationToken) {
        let mut interval = tokio::time::interval_at(
            deadline_after(Instant::now(), self.sweep_interval),
            self.sweep_interval,
        );
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    tracing::debug!("janitor tick");
                    self.sweep_once().await;
                }
                () = token.cancelled() => {
                    tracing::debug!("stopping janitor");
                    break;
                }
            }
        }
    }

    /// Spawn [`run`](Self::run) onto the tokio runtime.
    pub fn spawn(self, token: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(token))
    }
}
