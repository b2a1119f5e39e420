//! Session handles and the live-session registry.
//!
//! Handlers only ever see the `Session` trait: an opaque id plus a
//! fire-and-forget `close`. The transport owns the concrete connection state.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tokio::sync::mpsc;

/// Opaque per-connection handle given to handlers.
pub trait Session: Send + Sync {
    fn id(&self) -> u64;

    /// Ask the transport to tear this session down.
    ///
    /// Never blocks and never fails from the caller's point of view; a
    /// session that is already mid-teardown swallows the signal.
    fn close(&self);
}

/// TCP-backed session: `close` signals the connection task.
pub struct ConnectionSession {
    id: u64,
    close_tx: mpsc::Sender<()>,
}

impl ConnectionSession {
    pub fn new(id: u64, close_tx: mpsc::Sender<()>) -> Self {
        Self { id, close_tx }
    }
}

impl Session for ConnectionSession {
    fn id(&self) -> u64 {
        self.id
    }

    fn close(&self) {
        if self.close_tx.try_send(()).is_err() {
            tracing::debug!(session_id = self.id, "close signal dropped (already closing)");
        }
    }
}

/// Registry of live sessions, keyed by session id.
///
/// The transport registers a close sender per connection; the shell uses
/// `close_all` to drain connections on shutdown.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<u64, mpsc::Sender<()>>,
    seq: AtomicU64,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            seq: AtomicU64::new(1),
        }
    }

    /// Allocate a session id and track its close sender.
    pub fn register(&self, close_tx: mpsc::Sender<()>) -> u64 {
        let id = self.seq.fetch_add(1, Ordering::Relaxed);
        self.sessions.insert(id, close_tx);
        id
    }

    pub fn remove(&self, id: u64) {
        self.sessions.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Signal every live session to close. Best-effort; sessions already
    /// tearing down are skipped.
    pub fn close_all(&self) {
        for entry in self.sessions.iter() {
            let _ = entry.value().try_send(());
        }
    }
}
