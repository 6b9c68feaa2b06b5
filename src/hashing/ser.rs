//! Serialization of password hashes
//!
//! Compared to the permissive parsing logic, this is comparatively simpler,
//! since we only support serializing to the canonical `2b` revision of the
//! format: the work factor is always zero-padded to two digits, and the
//! salt and hash segments are emitted in bcrypt base64 with no separator
//! between them.

use hashing::{Output, BCRYPT_B64};

/// Encodes a hash output as a storable `$2b$` token.
pub fn encode(output: &Output) -> String {
    format!(
        "${}${:02}${}{}",
        output.alg.hash_id(),
        output.alg.work_factor(),
        BCRYPT_B64.encode(&output.salt),
        BCRYPT_B64.encode(&output.hash)
    )
}
