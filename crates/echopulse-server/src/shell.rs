//! Process wiring: listener, reporter task, accept loop, graceful shutdown.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use echopulse_core::{EchoPulseError, RequestCounter, Result};

use crate::config::ServerConfig;
use crate::handler::{EchoHandler, RpcHandler};
use crate::reporter::ThroughputReporter;
use crate::session::SessionRegistry;
use crate::transport;

/// Assembled server: bound listener plus the component graph.
pub struct ServerShell {
    listener: TcpListener,
    handler: Arc<dyn RpcHandler>,
    counter: Arc<RequestCounter>,
    registry: Arc<SessionRegistry>,
    report_interval: Duration,
}

impl ServerShell {
    /// Bind the listener and assemble the components. Port 0 is supported;
    /// use `local_addr` to find the bound port.
    pub async fn bind(cfg: &ServerConfig) -> Result<Self> {
        let addr: SocketAddr = cfg.server.listen.parse().map_err(|e| {
            EchoPulseError::Config(format!("server.listen is not a valid address: {e}"))
        })?;
        let listener = TcpListener::bind(addr).await?;

        let counter = Arc::new(RequestCounter::new());
        let handler: Arc<dyn RpcHandler> = Arc::new(EchoHandler::new(
            Arc::clone(&counter),
            cfg.server.close_every,
        ));

        Ok(Self {
            listener,
            handler,
            counter,
            registry: Arc::new(SessionRegistry::new()),
            report_interval: Duration::from_millis(cfg.server.report_interval_ms),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// The shared request counter, for callers that want to observe totals.
    pub fn counter(&self) -> Arc<RequestCounter> {
        Arc::clone(&self.counter)
    }

    /// Serve until `shutdown` resolves.
    ///
    /// Spawns the reporter first, then accepts connections, one task per
    /// connection. On shutdown: stop accepting, signal live sessions to
    /// close, stop the reporter.
    pub async fn serve(self, shutdown: impl Future<Output = ()>) -> Result<()> {
        let reporter =
            ThroughputReporter::new(Arc::clone(&self.counter), self.report_interval).spawn();

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,

                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            tracing::debug!(%peer, "connection accepted");
                            let handler = Arc::clone(&self.handler);
                            let registry = Arc::clone(&self.registry);
                            tokio::spawn(async move {
                                if let Err(e) =
                                    transport::tcp::run_connection(stream, handler, registry).await
                                {
                                    tracing::debug!(error = %e, "connection ended with error");
                                }
                            });
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "accept failed");
                        }
                    }
                }
            }
        }

        tracing::info!("shutting down");
        self.registry.close_all();
        reporter.shutdown().await;
        Ok(())
    }
}
