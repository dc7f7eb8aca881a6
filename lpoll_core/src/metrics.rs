//! Prometheus metrics instrumentation.
//!
//! These go through the `metrics` facade and are no-ops until a recorder is
//! installed (see the `lpoll` binary's `--metrics` flag).

/// Metric names used throughout the application.
pub mod names {
    /// Number of currently registered clients.
    pub const CLIENTS_ACTIVE: &str = "lpoll_clients_active";
    /// Total clients registered by a first poll.
    pub const CLIENTS_REGISTERED_TOTAL: &str = "lpoll_clients_registered_total";
    /// Total clients evicted for inactivity.
    pub const CLIENTS_EVICTED_TOTAL: &str = "lpoll_clients_evicted_total";
    /// Total completed polls, labeled by `outcome`.
    pub const POLLS_TOTAL: &str = "lpoll_polls_total";
    /// Total publishes, labeled by `outcome`.
    pub const PUBLISHES_TOTAL: &str = "lpoll_publishes_total";
}

/// Record a client being registered by its first poll.
#[inline]
pub fn client_registered() {
    metrics::gauge!(names::CLIENTS_ACTIVE).increment(1);
    metrics::counter!(names::CLIENTS_REGISTERED_TOTAL).increment(1);
}

/// Record a client being evicted.
#[inline]
pub fn client_evicted() {
    metrics::gauge!(names::CLIENTS_ACTIVE).decrement(1);
    metrics::counter!(names::CLIENTS_EVICTED_TOTAL).increment(1);
}

/// Record a completed poll.
#[inline]
pub fn poll_completed(outcome: &'static str) {
    metrics::counter!(names::POLLS_TOTAL, "outcome" => outcome).increment(1);
}

/// Record a publish attempt.
#[inline]
pub fn publish_attempted(outcome: &'static str) {
    metrics::counter!(names::PUBLISHES_TOTAL, "outcome" => outcome).increment(1);
}
