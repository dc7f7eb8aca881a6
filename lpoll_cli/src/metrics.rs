//! Prometheus metrics server.
//!
//! Metric names and recording helpers live in [`lpoll_core::metrics`].

use std::net::SocketAddr;

use anyhow::Context;
use axum::{Router, routing::get};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Install the Prometheus recorder and return a handle for the HTTP endpoint.
///
/// Must be called once at startup, before any metrics are recorded.
pub(crate) fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .context("failed to install Prometheus recorder")
}

/// Serve `/metrics` on `addr` in a background task until `token` is cancelled.
///
/// # Errors
///
/// Returns an error if the server fails to bind to the address.
pub(crate) async fn start_metrics_server(
    addr: SocketAddr,
    handle: PrometheusHandle,
    token: CancellationToken,
) -> anyhow::Result<()> {
    let app = Router::new().route(
        "/metrics",
        get(move || {
            let handle = handle.clone();
            async move { handle.render() }
        }),
    );

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Metrics server listening on {}", addr);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(token.cancelled_owned())
            .await
        {
            tracing::error!("Metrics server error: {}", e);
        }
    });

    Ok(())
}
