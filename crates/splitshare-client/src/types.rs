//! Client data types: recipients, configuration, and wire payloads.

use serde::{Deserialize, Serialize};

use splitshare_primitives::record::AttributeRecord;

use crate::error::ClientError;

/// The two mutually-distrusting destinations of a submission.
///
/// Each recipient receives one additive share, sealed under its own
/// public key; neither can reconstruct the attributes alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recipient {
    /// The service provider's backend.
    ServiceProvider,
    /// The independent third-party backend.
    ThirdParty,
}

impl std::fmt::Display for Recipient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ServiceProvider => "service-provider",
            Self::ThirdParty => "third-party",
        };
        write!(f, "{s}")
    }
}

/// Endpoints for one recipient.
#[derive(Debug, Clone)]
pub struct RecipientConfig {
    /// URL serving the recipient's PEM-armored public key.
    pub key_url: String,
    /// URL accepting the recipient's sealed envelope.
    pub submit_url: String,
}

/// Configuration for a [`SubmissionClient`](crate::SubmissionClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Endpoints for the service provider's backend.
    pub service_provider: RecipientConfig,
    /// Endpoints for the third-party backend.
    pub third_party: RecipientConfig,
}

impl ClientConfig {
    /// Build a configuration with both recipients on one host, using the
    /// standard endpoint paths.
    ///
    /// # Arguments
    /// * `base_url` - Host serving the key and store endpoints, without a
    ///   trailing slash (e.g. `http://127.0.0.1:5000`).
    ///
    /// # Returns
    /// A config with `/public_key`, `/store_service_provider`, and
    /// `/store_third_party` resolved against the base URL.
    pub fn for_base_url(base_url: &str) -> Self {
        ClientConfig {
            service_provider: RecipientConfig {
                key_url: format!("{base_url}/public_key"),
                submit_url: format!("{base_url}/store_service_provider"),
            },
            third_party: RecipientConfig {
                key_url: format!("{base_url}/public_key"),
                submit_url: format!("{base_url}/store_third_party"),
            },
        }
    }

    /// Look up the endpoints for a recipient.
    pub fn recipient(&self, recipient: Recipient) -> &RecipientConfig {
        match recipient {
            Recipient::ServiceProvider => &self.service_provider,
            Recipient::ThirdParty => &self.third_party,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_base_url("http://127.0.0.1:5000")
    }
}

/// Untyped form values for one submission, prior to encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSubmission {
    /// Service-provider identifier.
    pub provider_id: String,
    /// User identifier.
    pub user_id: String,
    /// Gender form label.
    pub gender: String,
    /// Age bracket form label.
    pub age: String,
    /// Disability flag form label.
    pub disability: String,
}

impl RawSubmission {
    /// Encode the form values into an attribute record.
    ///
    /// Both identifiers must be non-empty; categorical labels encode
    /// totally (unknowns become the sentinel code).
    ///
    /// # Returns
    /// `Ok(AttributeRecord)` on success, or
    /// [`ClientError::InvalidSubmission`] for a missing identifier.
    pub fn encode(&self) -> Result<AttributeRecord, ClientError> {
        if self.provider_id.trim().is_empty() {
            return Err(ClientError::InvalidSubmission(
                "provider id must not be empty".to_string(),
            ));
        }
        if self.user_id.trim().is_empty() {
            return Err(ClientError::InvalidSubmission(
                "user id must not be empty".to_string(),
            ));
        }
        Ok(AttributeRecord::from_labels(
            &self.provider_id,
            &self.user_id,
            &self.gender,
            &self.age,
            &self.disability,
        ))
    }
}

/// The JSON envelope a recipient's store endpoint accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopePayload {
    /// Base64-encoded ciphertext of one sealed share set.
    pub data: String,
}
