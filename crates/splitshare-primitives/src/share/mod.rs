//! Two-party additive share splitting and recombination.
//!
//! Each encodable field of a record is hidden by one fresh random mask:
//! share A carries `code - mask`, share B carries `code + mask`, so the
//! two shares sum to twice the code while either one alone is a
//! uniformly random value in the mask range. Masks are drawn per field,
//! per submission, and never reused.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::record::{AttributeRecord, ShareSet};
use crate::SplitError;

/// Half-width of the mask range: masks are uniform over
/// `[-2^62, 2^62 - 1]`.
///
/// The range is wide enough that a share leaks nothing usable about a
/// code in `[-1, 4]`, and narrow enough that `code ± mask` can never
/// overflow an `i64`, keeping recombination exact in plain integer
/// arithmetic.
const MASK_HALF_RANGE: i64 = 1 << 62;

/// Source of cryptographically secure random masks.
///
/// Injected into [`split`] rather than reached for ambiently, so tests
/// can substitute deterministic masks and production code states its
/// randomness dependency explicitly. Implementations must be backed by
/// a cryptographically secure generator; the hiding property of a share
/// is only as good as the unpredictability of its mask.
pub trait MaskSource {
    /// Draw one fresh mask, uniform over `[-2^62, 2^62 - 1]`.
    ///
    /// # Returns
    /// `Ok(i64)` with the mask, or
    /// [`SplitError::RandomSourceUnavailable`] if the underlying
    /// generator cannot produce bytes.
    fn draw_mask(&mut self) -> Result<i64, SplitError>;
}

/// Mask source backed by the operating system's CSPRNG.
///
/// Draws fallibly: an OS RNG failure surfaces as an error and aborts
/// the submission instead of degrading to a weaker source.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsMaskSource;

impl MaskSource for OsMaskSource {
    fn draw_mask(&mut self) -> Result<i64, SplitError> {
        let mut buf = [0u8; 8];
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| SplitError::RandomSourceUnavailable(e.to_string()))?;
        // Drop one bit to land exactly on the 63-bit range, then center it.
        let raw = u64::from_le_bytes(buf) >> 1;
        Ok(raw as i64 - MASK_HALF_RANGE)
    }
}

/// The fresh masks for one submission, one per encodable field.
///
/// Single-use: a mask set is consumed by the split that drew it and
/// never stored or reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskSet {
    /// Mask for the gender code.
    pub gender: i64,
    /// Mask for the age bracket code.
    pub age: i64,
    /// Mask for the disability flag.
    pub disabled: i64,
}

impl MaskSet {
    /// Draw a full mask set from the given source.
    ///
    /// # Arguments
    /// * `source` - The mask source to draw from.
    ///
    /// # Returns
    /// `Ok(MaskSet)` with three independent masks, or the source's error.
    pub fn draw<S: MaskSource>(source: &mut S) -> Result<Self, SplitError> {
        Ok(MaskSet {
            gender: source.draw_mask()?,
            age: source.draw_mask()?,
            disabled: source.draw_mask()?,
        })
    }
}

/// The two shares produced by one split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePair {
    /// The subtractive share (`code - mask` per field).
    pub a: ShareSet,
    /// The additive share (`code + mask` per field).
    pub b: ShareSet,
}

/// Split a record into two additive shares using fresh random masks.
///
/// Identifier fields are copied unchanged into both shares; each
/// encodable field is masked with its own independent draw. The only
/// failure mode is the mask source itself.
///
/// # Arguments
/// * `record` - The encoded record to split.
/// * `source` - The mask source to draw from.
///
/// # Returns
/// `Ok(SharePair)` on success, or the mask source's error.
pub fn split<S: MaskSource>(
    record: &AttributeRecord,
    source: &mut S,
) -> Result<SharePair, SplitError> {
    let masks = MaskSet::draw(source)?;
    Ok(split_with_masks(record, &masks))
}

/// Split a record into two additive shares using the given masks.
///
/// Pure arithmetic; [`split`] is this plus a fresh draw. Exposed so the
/// split law can be exercised with known masks.
///
/// # Arguments
/// * `record` - The encoded record to split.
/// * `masks` - One mask per encodable field.
///
/// # Returns
/// The `(A, B)` share pair.
pub fn split_with_masks(record: &AttributeRecord, masks: &MaskSet) -> SharePair {
    SharePair {
        a: ShareSet {
            provider_id: record.provider_id.clone(),
            user_id: record.user_id.clone(),
            gender: record.gender - masks.gender,
            age: record.age - masks.age,
            disabled: record.disabled - masks.disabled,
        },
        b: ShareSet {
            provider_id: record.provider_id.clone(),
            user_id: record.user_id.clone(),
            gender: record.gender + masks.gender,
            age: record.age + masks.age,
            disabled: record.disabled + masks.disabled,
        },
    }
}

/// Recombine two shares into the original record.
///
/// For an authorized party holding both halves: recovers each code as
/// `(a + b) / 2`. The shares must carry matching identifiers and every
/// field sum must be even; anything else means the two inputs do not
/// come from the same split.
///
/// # Arguments
/// * `a` - The subtractive share.
/// * `b` - The additive share.
///
/// # Returns
/// `Ok(AttributeRecord)` with the recovered codes, or
/// [`SplitError::ShareMismatch`] if the shares do not pair.
pub fn combine(a: &ShareSet, b: &ShareSet) -> Result<AttributeRecord, SplitError> {
    if a.provider_id != b.provider_id {
        return Err(SplitError::ShareMismatch(format!(
            "provider id {:?} vs {:?}",
            a.provider_id, b.provider_id
        )));
    }
    if a.user_id != b.user_id {
        return Err(SplitError::ShareMismatch(format!(
            "user id {:?} vs {:?}",
            a.user_id, b.user_id
        )));
    }
    Ok(AttributeRecord {
        provider_id: a.provider_id.clone(),
        user_id: a.user_id.clone(),
        gender: combine_field("gender", a.gender, b.gender)?,
        age: combine_field("age", a.age, b.age)?,
        disabled: combine_field("disabled", a.disabled, b.disabled)?,
    })
}

/// Recover one code from its two shares, checking that they pair.
fn combine_field(name: &str, a: i64, b: i64) -> Result<i64, SplitError> {
    let sum = a.checked_add(b).ok_or_else(|| {
        SplitError::ShareMismatch(format!("{name} share sum overflows"))
    })?;
    if sum % 2 != 0 {
        return Err(SplitError::ShareMismatch(format!(
            "{name} share sum is odd"
        )));
    }
    Ok(sum / 2)
}
