//! Server state shared across request handlers.

use lpoll_core::Hub;
use tokio_util::sync::CancellationToken;

/// Server-side state for HTTP long-polling.
#[derive(Debug, Clone)]
pub struct HttpServerState {
    hub: Hub,
    shutdown: CancellationToken,
}

impl HttpServerState {
    /// Create server state around a hub.
    #[must_use]
    pub const fn new(hub: Hub, shutdown: CancellationToken) -> Self {
        Self { hub, shutdown }
    }

    /// The shared hub.
    #[must_use]
    pub const fn hub(&self) -> &Hub {
        &self.hub
    }

    /// Token cancelled when the server starts shutting down.
    #[must_use]
    pub const fn shutdown(&self) -> &CancellationToken {
        &self.shutdown
    }
}
