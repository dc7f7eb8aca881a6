//! Client registry.
//!
//! Maps each [`ClientId`] to its [`ClientState`]. Structural changes (insert,
//! remove, sweep) take the write lock; lookups take the read lock. The
//! per-client [`Mailbox`] has its own synchronization, so a poll waiting on
//! one client never holds the registry lock.

use alloc::collections::BTreeMap;
use core::time::Duration;

use async_lock::RwLock;
use tokio::time::Instant;

use crate::{client_id::ClientId, mailbox::Mailbox, metrics};

/// State for a single registered client.
///
/// Handles returned by the registry are snapshots: the mailbox is shared with
/// the registry entry, `last_seen` is the value at the time of the call.
#[derive(Debug, Clone)]
pub struct ClientState {
    mailbox: Mailbox,
    last_seen: Instant,
}

impl ClientState {
    fn new(now: Instant) -> Self {
        Self {
            mailbox: Mailbox::new(),
            last_seen: now,
        }
    }

    /// The client's mailbox.
    #[must_use]
    pub const fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }

    /// When the client last polled.
    #[must_use]
    pub const fn last_seen(&self) -> Instant {
        self.last_seen
    }

    fn is_expired(&self, now: Instant, client_timeout: Duration) -> bool {
        now.saturating_duration_since(self.last_seen) > client_timeout
    }
}

/// Concurrent mapping from client identifier to client state.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    clients: RwLock<BTreeMap<ClientId, ClientState>>,
}

impl ClientRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client on first contact, or refresh its liveness.
    pub async fn get_or_create(&self, id: &ClientId) -> ClientState {
        let now = Instant::now();
        let mut clients = self.clients.write().await;

        if let Some(state) = clients.get_mut(id) {
            state.last_seen = now;
            return state.clone();
        }

        let state = ClientState::new(now);
        clients.insert(id.clone(), state.clone());
        let active = clients.len();
        drop(clients);

        tracing::info!(client_id = %id, active, "client subscribed");
        metrics::client_registered();

        state
    }

    /// Look up a client without touching its liveness.
    pub async fn lookup(&self, id: &ClientId) -> Option<ClientState> {
        self.clients.read().await.get(id).cloned()
    }

    /// Remove a client and close its mailbox.
    ///
    /// Any poll waiting on the mailbox is woken with a closed result.
    /// Returns `false` if the client was not registered.
    pub async fn evict(&self, id: &ClientId) -> bool {
        let Some(state) = self.clients.write().await.remove(id) else {
            return false;
        };

        state.mailbox.close();
        tracing::info!(client_id = %id, "evicted client");
        metrics::client_evicted();
        true
    }

    /// Evict every client idle for longer than `client_timeout`.
    ///
    /// Holds the write lock for the whole sweep. Returns the evicted IDs.
    pub async fn sweep(&self, client_timeout: Duration) -> Vec<ClientId> {
        let now = Instant::now();
        let mut clients = self.clients.write().await;

        let expired: Vec<ClientId> = clients
            .iter()
            .filter(|(_, state)| state.is_expired(now, client_timeout))
            .map(|(id, _)| id.clone())
            .collect();

        for id in &expired {
            if let Some(state) = clients.remove(id) {
                state.mailbox.close();
                metrics::client_evicted();
                tracing::info!(
                    client_id = %id,
                    remaining = clients.len(),
                    "cleaned up inactive client"
                );
            }
        }

        expired
    }

    /// Number of registered clients.
    pub async fn len(&self) -> usize {
        self.clients.read().await.len()
    }

    /// Whether no clients are registered.
    pub async fn is_empty(&self) -> bool {
        self.clients.read().await.is_empty()
    }
}
