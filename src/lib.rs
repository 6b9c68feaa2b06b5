// Copyright (c) 2021, the passata developers

// Permission to use, copy, modify, and/or distribute this software for any
// purpose with or without fee is hereby granted, provided that the above
// copyright notice and this permission notice appear in all copies.

// THE SOFTWARE IS PROVIDED "AS IS" AND THE AUTHOR DISCLAIMS ALL WARRANTIES WITH
// REGARD TO THIS SOFTWARE INCLUDING ALL IMPLIED WARRANTIES OF MERCHANTABILITY
// AND FITNESS. IN NO EVENT SHALL THE AUTHOR BE LIABLE FOR ANY SPECIAL, DIRECT,
// INDIRECT, OR CONSEQUENTIAL DAMAGES OR ANY DAMAGES WHATSOEVER RESULTING FROM
// LOSS OF USE, DATA OR PROFITS, WHETHER IN AN ACTION OF CONTRACT, NEGLIGENCE
// OR OTHER TORTIOUS ACTION, ARISING OUT OF OR IN CONNECTION WITH THE USE OR
// PERFORMANCE OF THIS SOFTWARE.

//! # Passata - Password Hashing
//! _Bcrypt credentials, passed through a sieve_
//!
//! This is a library designed to make storing bcrypt password hashes easy.
//!
//! Passwords are hashed with a per-call random salt and a tunable work
//! factor, and packed into the standard modular-crypt-format token
//! (`$2b$12$...`) which is self-describing: verification always uses the
//! cost and salt embedded in the stored token, so old hashes remain
//! verifiable after the configured default changes.
//!
//! ## Examples
//!
//! The basic functionality for computing password hashes is:
//!
//! ```
//! extern crate passata;
//!
//! fn main() {
//!     let password_hash = passata::hash_password("hunter2").unwrap();
//!     println!("The stored password is: '{}'", password_hash);
//! }
//! ```
//!
//! Verification re-derives the hash from the stored parameters and compares
//! in constant time:
//!
//! ```
//! let hash = passata::hash_password("hunter2").unwrap();
//! assert!(passata::verify_password(&hash, "hunter2").unwrap());
//! assert!(!passata::verify_password(&hash, "*******").unwrap());
//! ```
//!
//! ## Supported formats
//!
//! New hashes are always emitted in the `2b` revision of the bcrypt format.
//! Legacy tokens tagged `$2$`, `$2a$`, `$2x$` and `$2y$` are accepted for
//! verification.

#![cfg_attr(all(feature = "bench", test), feature(test))]

#![deny(
    dead_code,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_must_use,
    unused_qualifications,
)]

extern crate data_encoding;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate ring;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_yaml;

/// `passata` errors.
pub mod errors {
    use ring;
    use serde_yaml;
    // Create the Error, ErrorKind, ResultExt, and Result types
    error_chain! {
        foreign_links {
            Rand(ring::error::Unspecified) #[doc = "Errors originating from the system randomness source."];
            ConfigDeserialize(serde_yaml::Error) #[doc = "Errors from deserializing configuration files."];
        }
        errors {
            /// Empty plaintext was supplied to a hashing operation.
            InvalidInput {
                description("invalid plaintext input")
                display("plaintext password must not be empty")
            }
            /// Requested work factor is outside the supported range.
            UnsupportedCost(cost: u32) {
                description("unsupported work factor")
                display("work factor {} is outside the supported range 4..=31", cost)
            }
            /// A stored hash could not be parsed as a bcrypt token.
            MalformedHash {
                description("malformed password hash")
                display("stored hash is not a well-formed bcrypt token")
            }
        }
    }
}

use errors::*;

use ring::rand::SecureRandom;

#[macro_use]
mod bench;

pub mod config;
pub mod hashing;
use hashing::Output;

pub mod primitives;

/// A simple wrapper for a password to denote it is a cleartext password.
pub struct Cleartext(Vec<u8>);

impl From<String> for Cleartext {
    fn from(thing: String) -> Self {
        Cleartext(thing.into_bytes())
    }
}

impl<'a> From<&'a str> for Cleartext {
    fn from(thing: &str) -> Self {
        Cleartext(thing.as_bytes().to_vec())
    }
}

/// Generates a hash for a given password using the default work factor.
///
/// Fails with `ErrorKind::InvalidInput` if the password is empty. Each call
/// consumes fresh randomness for the salt, so hashing the same password
/// twice yields two distinct tokens.
pub fn hash_password(password: &str) -> Result<String> {
    config::DEFAULT_CONFIG.hash_password(password)
}

/// Generates a hash for a given password at an explicit work factor.
///
/// In addition to the failure cases of `hash_password`, fails with
/// `ErrorKind::UnsupportedCost` if `work_factor` lies outside the
/// algorithm-supported range `4..=31`.
pub fn hash_password_with_work_factor(password: &str, work_factor: u32) -> Result<String> {
    let config = config::Config::with_work_factor(work_factor)?;
    config.hash_password(password)
}

/// Verifies the provided password against a previously stored hash.
///
/// Returns `Ok(false)` for a well-formed token that does not match; a token
/// that cannot be parsed fails with `ErrorKind::MalformedHash` so that
/// callers can tell a wrong password apart from a corrupt stored hash.
/// The comparison of the recomputed hash against the stored one runs in
/// constant time.
pub fn verify_password(hash: &str, password: &str) -> Result<bool> {
    let pwd_hash: Output = hash.parse()?;
    Ok(pwd_hash.verify(&Cleartext::from(password)))
}

/// Verifies a supplied password against a previously computed password hash,
/// and performs an in-place update of the hash value if the password verifies
/// with a work factor below the current default. Hence this needs to take a
/// mutable `String` reference.
pub fn verify_password_update_hash(hash: &mut String, password: &str) -> Result<bool> {
    config::DEFAULT_CONFIG.verify_password_update_hash(hash, password)
}

/// Generates a random 16-byte salt.
///
/// In the extreme case that the system source of randomness is unavailable,
/// this falls back to the seeded backup PRNG. An error is logged when this
/// happens.
fn gen_salt() -> Vec<u8> {
    let mut salt = vec![0_u8; 16];
    if config::RANDOMNESS_SOURCE.fill(&mut salt).is_ok() {
        salt
    } else {
        error!("failed to fill salt from system randomness, using backup PRNG");
        config::backup_gen_salt()
    }
}

#[cfg(test)]
fn get_salt() -> Vec<u8> {
    gen_salt()
}
