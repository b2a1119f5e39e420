//! echopulse server binary.
//!
//! Echo server that tallies requests, closes a session every N requests to
//! exercise teardown under load, and logs throughput once per second.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use echopulse_server::{config, shell::ServerShell};

const CONFIG_PATH: &str = "echopulse.yaml";

#[tokio::main]
async fn main() -> echopulse_core::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = config::load_or_default(CONFIG_PATH)?;
    let shell = ServerShell::bind(&cfg).await?;
    tracing::info!(listen = %shell.local_addr()?, "echopulse starting");

    shell.serve(shutdown_signal()).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
