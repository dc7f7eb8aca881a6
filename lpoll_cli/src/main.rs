//! `lpoll`: long-poll pub/sub fan-out server.

mod metrics;
mod server;

use std::sync::atomic::{AtomicUsize, Ordering};

use clap::Parser;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let token = CancellationToken::new();
    install_signal_handlers(&token);

    let args = server::ServerArgs::parse();
    server::run(args, token).await
}

/// First Ctrl+C cancels `token`; the second exits immediately.
fn install_signal_handlers(token: &CancellationToken) {
    static HITS: AtomicUsize = AtomicUsize::new(0);

    {
        let token = token.clone();
        tokio::spawn(async move {
            loop {
                if tokio::signal::ctrl_c().await.is_ok() {
                    match HITS.fetch_add(1, Ordering::Relaxed) {
                        0 => {
                            eprintln!(
                                "Ctrl+C — attempting graceful shutdown… (press again to force)"
                            );
                            token.cancel();
                        }
                        _ => {
                            eprintln!("Force exiting.");
                            std::process::exit(130);
                        }
                    }
                }
            }
        });
    }

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let token = token.clone();
        tokio::spawn(async move {
            if let Ok(mut term) = signal(SignalKind::terminate()) {
                term.recv().await;
                eprintln!("SIGTERM — graceful shutdown…");
                token.cancel();
            }
        });
    }
}
