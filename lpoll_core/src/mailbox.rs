//! Single-slot mailbox for pending events.
//!
//! A [`Mailbox`] is always in one of three states:
//!
//! ```text
//!            try_deposit              take_or_wait_until
//!   Empty ───────────────► Occupied ─────────────────────► Empty
//!     │                       │
//!     └──────── close ────────┴──────────────────────────► Closed (terminal)
//! ```
//!
//! Depositing never waits: if the slot is occupied the new event is handed
//! back to the caller. Waiting is cancel-safe: dropping the future returned
//! by [`Mailbox::take_or_wait_until`] unregisters the waiter, and a dropped
//! waiter never consumes an event.
//!
//! The cell is a bounded `async_channel` with capacity one. Closing the
//! channel wakes every listener, which is how an evicted client's pending
//! poll is released.

use thiserror::Error;
use tokio::time::Instant;

use crate::event::Event;

/// Capacity of the mailbox. Exactly one pending event per client.
const MAILBOX_CAPACITY: usize = 1;

/// Observable state of a [`Mailbox`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxState {
    /// No pending event.
    Empty,

    /// One event is waiting to be taken.
    Occupied,

    /// The mailbox was closed by eviction.
    Closed,
}

/// Problem depositing an event. The refused event is returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DepositError {
    /// An event is already pending.
    #[error("mailbox is full")]
    Full(Event),

    /// The mailbox has been closed.
    #[error("mailbox is closed")]
    Closed(Event),
}

impl DepositError {
    /// Recover the refused event.
    #[must_use]
    pub fn into_event(self) -> Event {
        match self {
            Self::Full(event) | Self::Closed(event) => event,
        }
    }
}

/// Result of waiting on a [`Mailbox`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Take {
    /// An event was taken from the slot.
    Taken(Event),

    /// The deadline passed with the slot still empty.
    TimedOut,

    /// The mailbox was closed before an event arrived.
    Closed,
}

/// A cloneable handle to one client's single-slot mailbox.
///
/// Clones share the same slot.
#[derive(Debug, Clone)]
pub struct Mailbox {
    tx: async_channel::Sender<Event>,
    rx: async_channel::Receiver<Event>,
}

impl Mailbox {
    /// Create an empty, open mailbox.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = async_channel::bounded(MAILBOX_CAPACITY);
        Self { tx, rx }
    }

    /// Current state of the slot.
    #[must_use]
    pub fn state(&self) -> MailboxState {
        if self.tx.is_closed() {
            MailboxState::Closed
        } else if self.rx.is_empty() {
            MailboxState::Empty
        } else {
            MailboxState::Occupied
        }
    }

    /// Deposit an event without waiting.
    ///
    /// The first pending event wins: a deposit into an occupied slot does not
    /// overwrite it.
    ///
    /// # Errors
    ///
    /// * [`DepositError::Full`] if an event is already pending.
    /// * [`DepositError::Closed`] if the mailbox has been closed.
    pub fn try_deposit(&self, event: Event) -> Result<(), DepositError> {
        self.tx.try_send(event).map_err(|e| match e {
            async_channel::TrySendError::Full(event) => DepositError::Full(event),
            async_channel::TrySendError::Closed(event) => DepositError::Closed(event),
        })
    }

    /// Take the pending event, waiting until `deadline` for one to arrive.
    pub async fn take_or_wait_until(&self, deadline: Instant) -> Take {
        match tokio::time::timeout_at(deadline, self.rx.recv()).await {
            Ok(Ok(event)) => Take::Taken(event),
            Ok(Err(async_channel::RecvError)) => Take::Closed,
            Err(_elapsed) => Take::TimedOut,
        }
    }

    /// Close the mailbox, discarding any pending event and waking all waiters.
    ///
    /// Returns `true` if this call closed the mailbox, `false` if it was
    /// already closed.
    pub fn close(&self) -> bool {
        let closed = self.tx.close();
        while self.rx.try_recv().is_ok() {}
        closed
    }
}

impl Default for Mailbox {
    fn default() -> Self {
        Self::new()
    }
}
