//! Recipient public-key retrieval.

use reqwest::header::CACHE_CONTROL;

use crate::error::ClientError;
use crate::types::{ClientConfig, Recipient};

/// Interface for fetching a recipient's public key.
///
/// A missing, empty, or unfetchable key is a hard failure for that
/// recipient's submission, never a silent skip: a submission must not
/// proceed without the key it is meant to be sealed under. Caching, if
/// any, belongs behind this interface.
pub trait KeyProvider {
    /// Fetch the PEM-armored SPKI public key for a recipient.
    fn fetch_public_key(
        &self,
        recipient: Recipient,
    ) -> impl std::future::Future<Output = Result<String, ClientError>> + Send;
}

/// Key provider that fetches each recipient's key over HTTP.
///
/// Sends `Cache-Control: no-store` so the key is re-fetched per
/// submission rather than pinned by an intermediary cache.
#[derive(Debug, Clone)]
pub struct HttpKeyProvider {
    /// Underlying HTTP client.
    client: reqwest::Client,
    /// Endpoint configuration.
    config: ClientConfig,
}

impl HttpKeyProvider {
    /// Create a provider over an existing HTTP client and config.
    pub fn new(client: reqwest::Client, config: ClientConfig) -> Self {
        Self { client, config }
    }
}

impl KeyProvider for HttpKeyProvider {
    async fn fetch_public_key(&self, recipient: Recipient) -> Result<String, ClientError> {
        let url = &self.config.recipient(recipient).key_url;
        let resp = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ClientError::KeyFetch {
                recipient,
                reason: format!("key endpoint returned {}", resp.status()),
            });
        }

        let pem = resp.text().await?;
        if pem.trim().is_empty() {
            return Err(ClientError::KeyFetch {
                recipient,
                reason: "key endpoint returned an empty body".to_string(),
            });
        }
        Ok(pem)
    }
}
