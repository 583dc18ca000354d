#![deny(missing_docs)]

//! # splitshare-client
//!
//! Submission client for the splitshare SDK: fetches each backend's
//! public key, splits a submission into two additive shares, seals each
//! share under its recipient's key, and delivers the envelopes over
//! HTTP. The two recipient legs run concurrently and fail
//! independently, so one backend being down never blocks the other's
//! share.
//!
//! # Example
//!
//! ```no_run
//! use splitshare_client::{ClientConfig, RawSubmission, SubmissionClient};
//!
//! # async fn example() {
//! let client = SubmissionClient::new(ClientConfig::default());
//!
//! let outcome = client
//!     .submit(&RawSubmission {
//!         provider_id: "prov-7".to_string(),
//!         user_id: "user-42".to_string(),
//!         gender: "Female".to_string(),
//!         age: "26-40".to_string(),
//!         disability: "No".to_string(),
//!     })
//!     .await
//!     .unwrap();
//!
//! assert!(outcome.is_complete());
//! # }
//! ```

pub mod client;
pub mod error;
pub mod key_provider;
pub mod transport;
pub mod types;

#[cfg(test)]
mod tests;

pub use client::{DeliveryReceipt, SubmissionClient, SubmissionOutcome};
pub use error::ClientError;
pub use key_provider::{HttpKeyProvider, KeyProvider};
pub use transport::{HttpTransport, Transport};
pub use types::{ClientConfig, EnvelopePayload, RawSubmission, Recipient, RecipientConfig};
