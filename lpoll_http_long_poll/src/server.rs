//! HTTP long-polling server implementation.
//!
//! Provides an Axum router over a shared [`Hub`] and a `serve` helper with
//! graceful shutdown.

mod handlers;
mod state;

pub use handlers::router;
pub use state::HttpServerState;

use core::time::Duration;

use lpoll_core::{Hub, HubConfig};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Builder for creating an HTTP server.
#[derive(Debug, Default)]
pub struct HttpServerBuilder {
    config: HubConfig,
}

impl HttpServerBuilder {
    /// Create a new server builder with default timings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the long-poll timeout.
    #[must_use]
    pub const fn poll_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_poll_timeout(timeout);
        self
    }

    /// Set the client inactivity timeout.
    #[must_use]
    pub const fn client_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_client_timeout(timeout);
        self
    }

    /// Set the janitor sweep interval. Zero is raised to the minimum interval.
    #[must_use]
    pub const fn sweep_interval(mut self, interval: Duration) -> Self {
        self.config = self.config.with_sweep_interval(interval);
        self
    }

    /// Build the server state.
    #[must_use]
    pub fn build(self, shutdown: CancellationToken) -> HttpServerState {
        HttpServerState::new(Hub::new(self.config), shutdown)
    }
}

/// Serve `state` on `listener` until `state`'s shutdown token is cancelled.
///
/// Waiting polls are released with `204 No Content` when shutdown begins.
///
/// # Errors
///
/// Returns an error if the listener fails while accepting connections.
pub async fn serve(listener: TcpListener, state: HttpServerState) -> std::io::Result<()> {
    let shutdown = state.shutdown().child_token();
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "HTTP long-poll server listening");
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
}
