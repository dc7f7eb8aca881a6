//! Long-poll coordination.

use tokio::time::Instant;

use crate::{
    client_id::ClientId,
    config::deadline_after,
    event::Event,
    hub::Hub,
    mailbox::Take,
    metrics,
};

/// How a poll ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// An event was waiting or arrived before the poll timeout.
    Delivered(Event),

    /// The poll timeout elapsed with no event. This is the normal long-poll
    /// idle case, not a failure.
    Empty,

    /// The client was evicted while the poll was waiting.
    ClientGone,
}

impl PollOutcome {
    /// Short label for logs and metrics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Delivered(_) => "delivered",
            Self::Empty => "empty",
            Self::ClientGone => "client_gone",
        }
    }
}

impl Hub {
    /// Register or refresh `id`, then wait up to the poll timeout for its
    /// next event.
    ///
    /// Dropping the returned future (for example when the HTTP client
    /// disconnects) releases the wait without consuming any event.
    pub async fn poll(&self, id: &ClientId) -> PollOutcome {
        let state = self.registry.get_or_create(id).await;
        let deadline = deadline_after(Instant::now(), self.config.poll_timeout);

        let outcome = match state.mailbox().take_or_wait_until(deadline).await {
            Take::Taken(event) => PollOutcome::Delivered(event),
            Take::TimedOut => PollOutcome::Empty,
            Take::Closed => PollOutcome::ClientGone,
        };

        match &outcome {
            PollOutcome::Delivered(event) => {
                tracing::debug!(client_id = %id, time = %event.time, "poll delivered event");
            }
            PollOutcome::Empty => tracing::debug!(client_id = %id, "poll timeout"),
            PollOutcome::ClientGone => {
                tracing::debug!(client_id = %id, "client evicted while polling");
            }
        }
        metrics::poll_completed(outcome.label());

        outcome
    }
}
