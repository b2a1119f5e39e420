//! Reference transport.
//!
//! The handler seam is transport-agnostic; this module provides the thinnest
//! possible carrier for it: raw TCP where each read chunk is one request.

pub mod tcp;
