#![deny(missing_docs)]

//! splitshare SDK - Complete SDK.
//!
//! Re-exports all splitshare components for convenient single-crate usage.

pub use splitshare_client as client;
pub use splitshare_primitives as primitives;
