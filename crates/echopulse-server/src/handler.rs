//! Handler seam and the built-in echo handler.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use echopulse_core::{RequestCounter, Result};

use crate::session::Session;

/// Per-message callbacks invoked by the transport, concurrently across
/// sessions.
#[async_trait]
pub trait RpcHandler: Send + Sync {
    /// Handle a request and produce its response payload.
    async fn on_request(&self, request: Bytes, session: &dyn Session) -> Result<Bytes>;

    /// Handle a one-way push. Pushes expect no response.
    async fn on_push(&self, push: Bytes, session: &dyn Session);
}

/// Echoes every request and tallies it; closes the session whenever the
/// running total crosses a multiple of `close_every` (0 disables the policy).
pub struct EchoHandler {
    counter: Arc<RequestCounter>,
    close_every: u64,
}

impl EchoHandler {
    pub fn new(counter: Arc<RequestCounter>, close_every: u64) -> Self {
        Self {
            counter,
            close_every,
        }
    }
}

#[async_trait]
impl RpcHandler for EchoHandler {
    async fn on_request(&self, request: Bytes, session: &dyn Session) -> Result<Bytes> {
        let n = self.counter.increment();

        // The post-increment value is unique per call, so exactly one request
        // observes each threshold crossing. `close` is fire-and-forget and
        // must not delay or fail the response.
        if self.close_every != 0 && n % self.close_every == 0 {
            tracing::debug!(
                session_id = session.id(),
                total = n,
                "request threshold crossed, closing session"
            );
            session.close();
        }

        Ok(request)
    }

    async fn on_push(&self, _push: Bytes, _session: &dyn Session) {}
}
