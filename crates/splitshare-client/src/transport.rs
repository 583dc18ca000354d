//! Envelope delivery to recipient backends.

use crate::error::ClientError;
use crate::types::{ClientConfig, EnvelopePayload, Recipient};

/// Interface for handing a sealed envelope to a recipient.
///
/// The caller's job ends at producing the blob; everything from here on
/// (endpoints, status handling, retries) is the transport's concern.
/// Failures surface as delivery errors, distinct from the encryption
/// stage.
pub trait Transport {
    /// Deliver one ciphertext blob to a recipient.
    fn deliver(
        &self,
        recipient: Recipient,
        blob: &str,
    ) -> impl std::future::Future<Output = Result<(), ClientError>> + Send;
}

/// Transport that POSTs envelopes to each recipient's store endpoint.
///
/// The body is the JSON envelope `{"data": <base64>}` with
/// `Content-Type: application/json`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Underlying HTTP client.
    client: reqwest::Client,
    /// Endpoint configuration.
    config: ClientConfig,
}

impl HttpTransport {
    /// Create a transport over an existing HTTP client and config.
    pub fn new(client: reqwest::Client, config: ClientConfig) -> Self {
        Self { client, config }
    }
}

impl Transport for HttpTransport {
    async fn deliver(&self, recipient: Recipient, blob: &str) -> Result<(), ClientError> {
        let url = &self.config.recipient(recipient).submit_url;
        let payload = EnvelopePayload {
            data: blob.to_string(),
        };
        let resp = self.client.post(url).json(&payload).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Delivery {
                recipient,
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
