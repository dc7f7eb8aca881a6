//! Timing configuration shared by the coordinators and the janitor.

use core::time::Duration;

use tokio::time::Instant;

use crate::{DEFAULT_CLIENT_TIMEOUT_SECS, DEFAULT_POLL_TIMEOUT_SECS, DEFAULT_SWEEP_INTERVAL_SECS};

/// Roughly 30 years. Stands in for "never" when a deadline would overflow.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Shortest janitor cadence. A zero interval is raised to this.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// `now + wait`, saturating to a far-future instant instead of overflowing.
#[must_use]
pub fn deadline_after(now: Instant, wait: Duration) -> Instant {
    now.checked_add(wait).unwrap_or_else(|| now + FAR_FUTURE)
}

/// Timing knobs for a [`Hub`](crate::Hub) and its [`Janitor`](crate::Janitor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubConfig {
    /// How long a poll waits for an event before returning empty.
    pub poll_timeout: Duration,

    /// Inactivity after which a client is evicted.
    pub client_timeout: Duration,

    /// How often the janitor sweeps the registry. Zero is treated as
    /// [`MIN_SWEEP_INTERVAL`].
    pub sweep_interval: Duration,
}

impl HubConfig {
    /// Set the long-poll wait.
    #[must_use]
    pub const fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Set the inactivity timeout.
    #[must_use]
    pub const fn with_client_timeout(mut self, timeout: Duration) -> Self {
        self.client_timeout = timeout;
        self
    }

    /// Set the janitor cadence. Zero is raised to [`MIN_SWEEP_INTERVAL`].
    #[must_use]
    pub const fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = if interval.is_zero() {
            MIN_SWEEP_INTERVAL
        } else {
            interval
        };
        self
    }
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_secs(DEFAULT_POLL_TIMEOUT_SECS),
            client_timeout: Duration::from_secs(DEFAULT_CLIENT_TIMEOUT_SECS),
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }
}
