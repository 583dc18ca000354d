//! Recipient-bound envelope encryption of share sets.
//!
//! Each share set is sealed directly under the recipient backend's RSA
//! public key with OAEP/SHA-256, then base64-armored for transport.
//! Direct asymmetric encryption bounds the plaintext to the key's
//! modulus minus the OAEP overhead; share sets are small by design and
//! anything over the bound is an error, never chunked or truncated.

use base64::Engine;
use rand::rngs::OsRng;
use rsa::pkcs8::DecodePublicKey;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPublicKey};
use sha2::Sha256;

use crate::record::ShareSet;
use crate::SplitError;

/// Output length of the OAEP digest (SHA-256), in bytes.
const OAEP_HASH_LEN: usize = 32;

/// An imported recipient public key, configured for encryption only.
///
/// Wraps an RSA public key parsed from SPKI bytes. Import validates the
/// key structure; a key that parses is usable for exactly one thing:
/// sealing share sets with OAEP/SHA-256.
#[derive(Clone, Debug)]
pub struct RecipientKey {
    /// The underlying RSA public key.
    inner: RsaPublicKey,
}

impl RecipientKey {
    /// Import a recipient key from PEM text or a bare base64 SPKI body.
    ///
    /// Accepts the full armor (`-----BEGIN PUBLIC KEY-----` /
    /// `-----END PUBLIC KEY-----` with a newline-wrapped base64 body) as
    /// well as a body whose armor a key provider has already stripped.
    /// Header and footer lines and all whitespace are removed, the body
    /// is base64-decoded, and the DER is parsed as an SPKI RSA key.
    ///
    /// # Arguments
    /// * `pem` - PEM text or bare base64 of an SPKI-encoded RSA public key.
    ///
    /// # Returns
    /// `Ok(RecipientKey)` on success, or [`SplitError::KeyImport`] if the
    /// input is empty, not valid base64, or not an RSA SPKI structure.
    pub fn from_pem(pem: &str) -> Result<Self, SplitError> {
        let body: String = pem
            .lines()
            .filter(|line| !line.trim_start().starts_with("-----"))
            .flat_map(|line| line.split_whitespace())
            .collect();
        if body.is_empty() {
            return Err(SplitError::KeyImport(
                "public key text is empty".to_string(),
            ));
        }
        let der = base64::engine::general_purpose::STANDARD
            .decode(body.as_bytes())
            .map_err(|e| SplitError::KeyImport(format!("invalid base64 body: {e}")))?;
        Self::from_der(&der)
    }

    /// Import a recipient key from SPKI DER bytes.
    ///
    /// # Arguments
    /// * `der` - SPKI-encoded RSA public key bytes.
    ///
    /// # Returns
    /// `Ok(RecipientKey)` on success, or [`SplitError::KeyImport`] if the
    /// bytes do not parse as an RSA key.
    pub fn from_der(der: &[u8]) -> Result<Self, SplitError> {
        let inner = RsaPublicKey::from_public_key_der(der)
            .map_err(|e| SplitError::KeyImport(e.to_string()))?;
        Ok(RecipientKey { inner })
    }

    /// Maximum plaintext length this key can seal, in bytes.
    ///
    /// For a k-byte modulus with SHA-256 OAEP this is `k - 2*32 - 2`
    /// (190 bytes for RSA-2048).
    ///
    /// # Returns
    /// The OAEP plaintext capacity of the key.
    pub fn max_plaintext_len(&self) -> usize {
        self.inner.size().saturating_sub(2 * OAEP_HASH_LEN + 2)
    }

    /// Encrypt a plaintext under this key with OAEP/SHA-256.
    ///
    /// One-shot, single-block. The size bound is checked before
    /// encryption so an oversized plaintext fails with
    /// [`SplitError::PlaintextTooLarge`] rather than an opaque padding
    /// error.
    ///
    /// # Arguments
    /// * `plaintext` - The bytes to seal.
    ///
    /// # Returns
    /// `Ok(Vec<u8>)` with the ciphertext (one modulus-sized block), or an
    /// error.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, SplitError> {
        let limit = self.max_plaintext_len();
        if plaintext.len() > limit {
            return Err(SplitError::PlaintextTooLarge {
                limit,
                got: plaintext.len(),
            });
        }
        self.inner
            .encrypt(&mut OsRng, Oaep::new::<Sha256>(), plaintext)
            .map_err(|e| SplitError::Encryption(e.to_string()))
    }
}

/// Seal a share set under a recipient key.
///
/// Serializes the share set to its canonical bytes, encrypts them with
/// OAEP/SHA-256, and base64-encodes the ciphertext for transport. The
/// base64 armor is an encoding convenience, not a security boundary.
/// Stateless: one share set under one key per call.
///
/// # Arguments
/// * `share` - The share set to seal.
/// * `key` - The recipient's imported public key.
///
/// # Returns
/// `Ok(String)` with the base64 ciphertext blob, or an error from
/// serialization or encryption.
pub fn seal(share: &ShareSet, key: &RecipientKey) -> Result<String, SplitError> {
    let plaintext = share.canonical_bytes()?;
    let ciphertext = key.encrypt(&plaintext)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(ciphertext))
}
