//! Top-level facade crate for echopulse.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use echopulse_core::*;
}

pub mod server {
    pub use echopulse_server::*;
}
