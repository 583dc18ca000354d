/// Unified error type for all primitives operations.
///
/// Covers errors from key import, envelope encryption, mask generation,
/// serialization, and share recombination.
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    #[error("key import failed: {0}")]
    KeyImport(String),

    #[error("plaintext too large for recipient key: limit {limit} bytes, got {got}")]
    PlaintextTooLarge { limit: usize, got: usize },

    #[error("secure random source unavailable: {0}")]
    RandomSourceUnavailable(String),

    #[error("encryption error: {0}")]
    Encryption(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("payload format version mismatch: expected {expected}, got {got}")]
    VersionMismatch { expected: u32, got: u32 },

    #[error("shares do not pair: {0}")]
    ShareMismatch(String),
}
