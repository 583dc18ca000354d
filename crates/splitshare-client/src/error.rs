//! Error types for submission operations.

use crate::types::Recipient;
use splitshare_primitives::SplitError;

/// Errors that can occur while producing or delivering a submission.
///
/// Encryption-stage failures ([`ClientError::Split`]) stay distinct from
/// transport-stage failures ([`ClientError::Http`],
/// [`ClientError::Delivery`]) so callers can report accurately what went
/// wrong.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed before a response was produced.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The recipient's key endpoint did not yield a usable key.
    #[error("key fetch for {recipient} failed: {reason}")]
    KeyFetch {
        /// The recipient whose key could not be fetched.
        recipient: Recipient,
        /// Why the key was unusable.
        reason: String,
    },

    /// The recipient's backend rejected the envelope.
    #[error("delivery to {recipient} failed with status {status}")]
    Delivery {
        /// The recipient that rejected the envelope.
        recipient: Recipient,
        /// The HTTP status code returned.
        status: u16,
    },

    /// Splitting or sealing failed.
    #[error("{0}")]
    Split(#[from] SplitError),

    /// The raw submission is not deliverable as given.
    #[error("invalid submission: {0}")]
    InvalidSubmission(String),
}
