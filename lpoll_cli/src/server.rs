//! The `lpoll` server command.

use std::{net::SocketAddr, time::Duration};

use anyhow::{Result, ensure};
use lpoll_core::{
    DEFAULT_CLIENT_TIMEOUT_SECS, DEFAULT_POLL_TIMEOUT_SECS, DEFAULT_SWEEP_INTERVAL_SECS,
};
use lpoll_http_long_poll::HttpServerBuilder;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::metrics;

/// Arguments for the server.
#[derive(Debug, clap::Parser)]
#[command(version, about = "Long-poll pub/sub fan-out server")]
pub(crate) struct ServerArgs {
    /// Socket address to bind to
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    pub(crate) socket: SocketAddr,

    /// Seconds a poll waits for an event before returning 204
    #[arg(long, default_value_t = DEFAULT_POLL_TIMEOUT_SECS)]
    pub(crate) poll_timeout: u64,

    /// Seconds without a poll after which a client is evicted
    #[arg(long, default_value_t = DEFAULT_CLIENT_TIMEOUT_SECS)]
    pub(crate) client_timeout: u64,

    /// Seconds between inactive-client sweeps
    #[arg(long, default_value_t = DEFAULT_SWEEP_INTERVAL_SECS)]
    pub(crate) sweep_interval: u64,

    /// Metrics server port (Prometheus endpoint)
    #[arg(long, default_value = "9090")]
    pub(crate) metrics_port: u16,

    /// Enable the Prometheus metrics server
    #[arg(long, default_value_t = false)]
    pub(crate) metrics: bool,
}

impl ServerArgs {
    fn validate(&self) -> Result<()> {
        ensure!(self.poll_timeout > 0, "--poll-timeout must be positive");
        ensure!(self.client_timeout > 0, "--client-timeout must be positive");
        ensure!(self.sweep_interval > 0, "--sweep-interval must be positive");
        Ok(())
    }
}

/// Run the long-poll server until `token` is cancelled.
pub(crate) async fn run(args: ServerArgs, token: CancellationToken) -> Result<()> {
    args.validate()?;

    if args.metrics {
        let metrics_handle = metrics::init_metrics()?;
        let metrics_addr: SocketAddr = ([0, 0, 0, 0], args.metrics_port).into();
        metrics::start_metrics_server(metrics_addr, metrics_handle, token.clone()).await?;
    }

    let state = HttpServerBuilder::new()
        .poll_timeout(Duration::from_secs(args.poll_timeout))
        .client_timeout(Duration::from_secs(args.client_timeout))
        .sweep_interval(Duration::from_secs(args.sweep_interval))
        .build(token.clone());

    let janitor = state.hub().janitor().spawn(token.clone());

    tracing::info!(
        poll_timeout = args.poll_timeout,
        client_timeout = args.client_timeout,
        sweep_interval = args.sweep_interval,
        "starting long-poll server"
    );

    let listener = TcpListener::bind(args.socket).await?;
    lpoll_http_long_poll::serve(listener, state).await?;

    token.cancel();
    janitor.await?;
    tracing::info!("Shutting down server...");

    Ok(())
}
