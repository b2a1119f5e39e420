//! Shared error type across echopulse crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, EchoPulseError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum EchoPulseError {
    #[error("config: {0}")]
    Config(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("internal: {0}")]
    Internal(String),
}
