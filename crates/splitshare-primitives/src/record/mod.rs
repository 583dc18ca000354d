//! Attribute records, share sets, and their canonical byte encoding.
//!
//! A submission starts life as an [`AttributeRecord`] (identifiers plus
//! encoded categorical codes) and is split into two [`ShareSet`]s.
//! Only share sets cross the wire; their canonical encoding is the
//! plaintext handed to the envelope encryptor.

use serde::{Deserialize, Serialize};

use crate::encoding::{encode_age_bracket, encode_disability, encode_gender};
use crate::SplitError;

/// Version of the canonical share-set payload format.
///
/// Bumped whenever the field set or encoding of the payload changes, so
/// the recombining party can reject shares it does not understand.
pub const CANONICAL_VERSION: u32 = 1;

/// One submission's identifiers and encoded categorical attributes.
///
/// The identifier fields travel in the clear to both backends so stored
/// shares can be joined per user; only the numeric codes are hidden by
/// splitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeRecord {
    /// Service-provider identifier, passed through unmodified.
    pub provider_id: String,
    /// User identifier, passed through unmodified.
    pub user_id: String,
    /// Encoded gender code (0-2, or -1 for unknown).
    pub gender: i64,
    /// Encoded age bracket code (0-4, or -1 for unknown).
    pub age: i64,
    /// Encoded disability flag (1 for yes, 0 otherwise).
    pub disabled: i64,
}

impl AttributeRecord {
    /// Build a record from raw form labels, encoding the categorical fields.
    ///
    /// Encoding is total: unknown labels land on the sentinel code, never
    /// an error.
    ///
    /// # Arguments
    /// * `provider_id` - Service-provider identifier.
    /// * `user_id` - User identifier.
    /// * `gender` - Gender form label.
    /// * `age` - Age bracket form label.
    /// * `disability` - Disability flag form label.
    ///
    /// # Returns
    /// A record with all categorical fields encoded.
    pub fn from_labels(
        provider_id: &str,
        user_id: &str,
        gender: &str,
        age: &str,
        disability: &str,
    ) -> Self {
        AttributeRecord {
            provider_id: provider_id.to_string(),
            user_id: user_id.to_string(),
            gender: encode_gender(gender),
            age: encode_age_bracket(age),
            disabled: encode_disability(disability),
        }
    }
}

/// One additive share of an [`AttributeRecord`].
///
/// Identifiers are copies of the record's; each numeric field holds
/// `code - mask` or `code + mask` depending on which half of the pair
/// this is. A single share reveals nothing about the codes without its
/// counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareSet {
    /// Service-provider identifier, identical in both shares.
    pub provider_id: String,
    /// User identifier, identical in both shares.
    pub user_id: String,
    /// Masked gender code.
    pub gender: i64,
    /// Masked age bracket code.
    pub age: i64,
    /// Masked disability flag.
    pub disabled: i64,
}

/// Wire form of a share set: the payload version followed by the share
/// fields in fixed order.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CanonicalShareSet {
    v: u32,
    provider_id: String,
    user_id: String,
    gender: i64,
    age: i64,
    disabled: i64,
}

impl ShareSet {
    /// Serialize this share set to its canonical byte encoding.
    ///
    /// Compact JSON with a fixed field order (`v`, `providerId`, `userId`,
    /// `gender`, `age`, `disabled`) and an explicit format version. The
    /// output is deterministic for a given share set, which makes the
    /// envelope plaintext-size bound computable up front.
    ///
    /// # Returns
    /// `Ok(Vec<u8>)` with the canonical bytes, or a serialization error.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, SplitError> {
        let wire = CanonicalShareSet {
            v: CANONICAL_VERSION,
            provider_id: self.provider_id.clone(),
            user_id: self.user_id.clone(),
            gender: self.gender,
            age: self.age,
            disabled: self.disabled,
        };
        Ok(serde_json::to_vec(&wire)?)
    }

    /// Parse a share set from its canonical byte encoding.
    ///
    /// Rejects payloads whose format version differs from
    /// [`CANONICAL_VERSION`].
    ///
    /// # Arguments
    /// * `bytes` - Canonical bytes produced by [`ShareSet::canonical_bytes`].
    ///
    /// # Returns
    /// `Ok(ShareSet)` on success, or a serialization/version error.
    pub fn from_canonical_bytes(bytes: &[u8]) -> Result<Self, SplitError> {
        let wire: CanonicalShareSet = serde_json::from_slice(bytes)?;
        if wire.v != CANONICAL_VERSION {
            return Err(SplitError::VersionMismatch {
                expected: CANONICAL_VERSION,
                got: wire.v,
            });
        }
        Ok(ShareSet {
            provider_id: wire.provider_id,
            user_id: wire.user_id,
            gender: wire.gender,
            age: wire.age,
            disabled: wire.disabled,
        })
    }
}
