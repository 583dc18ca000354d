//! The submission pipeline: encode, split, seal, deliver.

use tracing::{debug, warn};

use splitshare_primitives::envelope::{seal, RecipientKey};
use splitshare_primitives::record::ShareSet;
use splitshare_primitives::share::{split, OsMaskSource};

use crate::error::ClientError;
use crate::key_provider::{HttpKeyProvider, KeyProvider};
use crate::transport::{HttpTransport, Transport};
use crate::types::{ClientConfig, RawSubmission, Recipient};

/// Confirmation that one recipient's envelope was handed to transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// The recipient the envelope went to.
    pub recipient: Recipient,
    /// Length of the base64 ciphertext blob that was delivered.
    pub ciphertext_len: usize,
}

/// Per-recipient results of one submission.
///
/// The two legs are independent: a failed leg carries its own error
/// while the other leg's result stands on its own.
#[derive(Debug)]
pub struct SubmissionOutcome {
    /// Result of the service provider's leg.
    pub service_provider: Result<DeliveryReceipt, ClientError>,
    /// Result of the third party's leg.
    pub third_party: Result<DeliveryReceipt, ClientError>,
}

impl SubmissionOutcome {
    /// True when both recipients received their envelope.
    pub fn is_complete(&self) -> bool {
        self.service_provider.is_ok() && self.third_party.is_ok()
    }
}

/// Client that splits a submission and delivers one sealed share to
/// each recipient.
///
/// Generic over its collaborators so key retrieval and delivery can be
/// substituted; [`SubmissionClient::new`] wires up the HTTP-backed
/// defaults.
#[derive(Debug, Clone)]
pub struct SubmissionClient<K: KeyProvider, T: Transport> {
    /// Source of recipient public keys.
    keys: K,
    /// Envelope delivery collaborator.
    transport: T,
}

impl SubmissionClient<HttpKeyProvider, HttpTransport> {
    /// Create a client with HTTP-backed key retrieval and delivery.
    pub fn new(config: ClientConfig) -> Self {
        let client = reqwest::Client::new();
        Self {
            keys: HttpKeyProvider::new(client.clone(), config.clone()),
            transport: HttpTransport::new(client, config),
        }
    }
}

impl<K: KeyProvider, T: Transport> SubmissionClient<K, T> {
    /// Create a client over explicit collaborators.
    pub fn with_collaborators(keys: K, transport: T) -> Self {
        Self { keys, transport }
    }

    /// Split a submission and deliver one sealed share to each recipient.
    ///
    /// Encoding and splitting happen once, up front; a failure there
    /// (empty identifier, mask source unavailable) aborts the whole
    /// submission. The two recipient legs then run concurrently, each
    /// fetching its key, sealing its share, and delivering its envelope;
    /// a failure on one leg never blocks the other.
    ///
    /// # Arguments
    /// * `raw` - The form values to submit.
    ///
    /// # Returns
    /// `Ok(SubmissionOutcome)` with one result per recipient, or an error
    /// if the submission could not be split at all.
    pub async fn submit(&self, raw: &RawSubmission) -> Result<SubmissionOutcome, ClientError> {
        let record = raw.encode()?;
        let pair = split(&record, &mut OsMaskSource)?;

        let (service_provider, third_party) = tokio::join!(
            self.submit_leg(Recipient::ServiceProvider, &pair.a),
            self.submit_leg(Recipient::ThirdParty, &pair.b),
        );

        if let Err(ref e) = service_provider {
            warn!(recipient = %Recipient::ServiceProvider, error = %e, "submission leg failed");
        }
        if let Err(ref e) = third_party {
            warn!(recipient = %Recipient::ThirdParty, error = %e, "submission leg failed");
        }

        Ok(SubmissionOutcome {
            service_provider,
            third_party,
        })
    }

    /// Produce the ciphertext blob for one recipient without delivering it.
    ///
    /// The encryption stage alone: fetch the key, import it, seal the
    /// share. For callers that own delivery themselves.
    ///
    /// # Arguments
    /// * `recipient` - The destination backend.
    /// * `share` - The share set to seal.
    ///
    /// # Returns
    /// `Ok(String)` with the base64 ciphertext blob, or an error.
    pub async fn seal_for(
        &self,
        recipient: Recipient,
        share: &ShareSet,
    ) -> Result<String, ClientError> {
        let pem = self.keys.fetch_public_key(recipient).await?;
        let key = RecipientKey::from_pem(&pem)?;
        Ok(seal(share, &key)?)
    }

    /// One recipient's full leg: fetch key, seal, deliver.
    async fn submit_leg(
        &self,
        recipient: Recipient,
        share: &ShareSet,
    ) -> Result<DeliveryReceipt, ClientError> {
        debug!(%recipient, "fetching recipient public key");
        let blob = self.seal_for(recipient, share).await?;

        self.transport.deliver(recipient, &blob).await?;
        debug!(%recipient, ciphertext_len = blob.len(), "envelope delivered");

        Ok(DeliveryReceipt {
            recipient,
            ciphertext_len: blob.len(),
        })
    }
}
