//! Best-effort, non-blocking publishing.

use crate::{
    client_id::ClientId,
    event::Event,
    hub::Hub,
    mailbox::DepositError,
    metrics,
};

/// How a publish ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The event is now pending in the client's mailbox.
    Delivered,

    /// The client has never polled, or has been evicted.
    NotFound,

    /// An event was already pending; this one was discarded.
    Dropped,
}

impl PublishOutcome {
    /// Short label for logs and metrics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Delivered => "delivered",
            Self::NotFound => "not_found",
            Self::Dropped => "dropped",
        }
    }
}

impl Hub {
    /// Deposit `message` into `id`'s mailbox, stamped with the current time.
    ///
    /// Never waits on the mailbox. Publishing does not count as client
    /// activity, and never registers a client.
    pub async fn publish(&self, id: &ClientId, message: impl Into<String>) -> PublishOutcome {
        let outcome = match self.registry.lookup(id).await {
            None => PublishOutcome::NotFound,
            Some(state) => match state.mailbox().try_deposit(Event::now(message)) {
                Ok(()) => PublishOutcome::Delivered,
                Err(DepositError::Full(_)) => PublishOutcome::Dropped,
                // Evicted between lookup and deposit.
                Err(DepositError::Closed(_)) => PublishOutcome::NotFound,
            },
        };

        tracing::debug!(client_id = %id, outcome = outcome.label(), "publish");
        metrics::publish_attempted(outcome.label());

        outcome
    }
}
