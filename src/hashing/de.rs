//! Parsing of stored password hashes
//!
//! A stored bcrypt token packs the version tag, the work factor, and the
//! concatenated salt and hash segments into one `$`-separated string:
//! `$2b$12$<22 chars of salt><31 chars of hash>`.
//!
//! Tokens produced by other implementations may carry the legacy version
//! tags `2`, `2a`, `2x` or `2y`; all of them decode to the same parameter
//! set. Anything else is rejected as `ErrorKind::MalformedHash`, never
//! reported as a simple mismatch.

use errors::*;
use hashing::{Output, BCRYPT_B64};
use primitives::Bcrypt;

/// Combined length of the encoded salt (22) and hash (31) segments.
const SALTHASH_LEN: usize = 53;

fn malformed(hash: &str, reason: &str) -> Error {
    debug!("rejecting stored hash {:?}: {}", hash, reason);
    ErrorKind::MalformedHash.into()
}

/// Parses a stored bcrypt token into an `Output`.
pub fn parse(s: &str) -> Result<Output> {
    let mut fields = s.split('$');

    match fields.next() {
        Some("") => {}
        _ => return Err(malformed(s, "token does not start with '$'")),
    }

    match fields.next() {
        Some("2") | Some("2a") | Some("2b") | Some("2x") | Some("2y") => {}
        _ => return Err(malformed(s, "unrecognized version tag")),
    }

    let cost_field = match fields.next() {
        Some(cost) => cost,
        None => return Err(malformed(s, "missing cost field")),
    };
    if cost_field.is_empty() || cost_field.len() > 2
        || !cost_field.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(malformed(s, "cost is not a two-digit decimal"));
    }
    let cost: u32 = match cost_field.parse() {
        Ok(cost) => cost,
        Err(_) => return Err(malformed(s, "cost is not a two-digit decimal")),
    };

    let salthash = match fields.next() {
        Some(salthash) => salthash,
        None => return Err(malformed(s, "missing salt and hash field")),
    };
    if fields.next().is_some() {
        return Err(malformed(s, "trailing fields after salt and hash"));
    }
    if salthash.len() != SALTHASH_LEN || !salthash.is_ascii() {
        return Err(malformed(s, "salt and hash field has the wrong length"));
    }

    let (salt64, hash64) = salthash.split_at(22);
    let salt = match BCRYPT_B64.decode(salt64.as_bytes()) {
        Ok(salt) => salt,
        Err(_) => return Err(malformed(s, "salt is not valid bcrypt base64")),
    };
    let hash = match BCRYPT_B64.decode(hash64.as_bytes()) {
        Ok(hash) => hash,
        Err(_) => return Err(malformed(s, "hash is not valid bcrypt base64")),
    };

    let alg = match Bcrypt::new(cost) {
        Ok(alg) => alg,
        Err(_) => return Err(malformed(s, "embedded cost is out of range")),
    };
    Ok(Output { alg, salt, hash })
}
