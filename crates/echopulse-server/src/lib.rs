//! echopulse server library entry.
//!
//! This crate wires the config loader, the handler seam, session plumbing,
//! the throughput reporter, and the TCP reference transport into a runnable
//! echo server. It is intended to be consumed by the binary (`main.rs`) and
//! by integration tests.

pub mod config;
pub mod handler;
pub mod reporter;
pub mod session;
pub mod shell;
pub mod transport;
