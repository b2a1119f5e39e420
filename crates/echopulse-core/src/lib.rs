//! echopulse core: counting and rate primitives plus the shared error surface.
//!
//! This crate defines the request tally and the per-tick throughput math
//! shared by the server and its tests. It intentionally carries no transport
//! or runtime dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `EchoPulseError`/`Result` so production
//! processes do not crash under load.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod counter;
pub mod error;
pub mod throughput;

pub use counter::RequestCounter;
/// Shared result type.
pub use error::{EchoPulseError, Result};
pub use throughput::{ThroughputTick, ThroughputWindow};
