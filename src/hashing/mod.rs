//! Password hashing functionality
//!
//! While the `primitives` module handles the raw bcrypt computation, this
//! module contains the `passata` hashing functionality itself: the `Output`
//! structure holding a parsed password hash, and the encoding and decoding
//! of the modular-crypt-format token (`$2b$<cost>$<salt><hash>`) that
//! callers actually store.

use data_encoding::{Encoding, Specification};

use std::fmt;
use std::str::FromStr;

use errors::*;
use primitives::Primitive;
use super::Cleartext;

mod de;
mod ser;

lazy_static! {
    /// The non-standard Base64 alphabet used by bcrypt tokens, without
    /// padding. Salt and hash segments leave nonzero trailing bits, so
    /// these are not checked when decoding.
    pub(crate) static ref BCRYPT_B64: Encoding = {
        let mut spec = Specification::new();
        spec.symbols
            .push_str("./ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789");
        spec.check_trailing_bits = false;
        spec.encoding().expect("bcrypt base64 specification is well-formed")
    };
}

#[derive(Debug)]
/// Represents the output of a password hashing algorithm.
pub struct Output {
    /// The primitive used, parameterised by the work factor
    pub alg: Primitive,
    /// The salt
    pub salt: Vec<u8>,
    /// The hash output
    pub hash: Vec<u8>,
}

impl Output {
    /// Verifies that the supplied password matches the hashed value.
    ///
    /// The hash is recomputed with the work factor and salt held in this
    /// `Output`, and compared to the stored hash in constant time.
    pub fn verify(&self, password: &Cleartext) -> bool {
        self.alg.verify(&password.0, &self.salt, &self.hash)
    }
}

impl FromStr for Output {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        de::parse(s)
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&ser::encode(self))
    }
}

#[test]
fn test_hash() {
    use config;

    let output = config::DEFAULT_PRIM.hash(&"hunter2".into());
    let token = output.to_string();
    println!("{:?}", token);
    let parsed: Output = token.parse().unwrap();
    assert_eq!(parsed.salt, output.salt);
    assert_eq!(parsed.hash, output.hash);
    assert!(parsed.verify(&"hunter2".into()));
}
