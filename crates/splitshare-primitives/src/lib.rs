//! splitshare SDK - Attribute splitting and envelope encryption primitives.
//!
//! This crate provides the foundational building blocks for the splitshare SDK:
//! - Categorical attribute encoding tables (gender, age bracket, disability)
//! - Two-party additive share splitting with CSPRNG masks
//! - Share recombination for an authorized holder of both shares
//! - Canonical, versioned serialization of share sets
//! - SPKI/PEM public-key import and RSA-OAEP envelope sealing

pub mod encoding;
pub mod envelope;
pub mod record;
pub mod share;

mod error;
pub use error::SplitError;
