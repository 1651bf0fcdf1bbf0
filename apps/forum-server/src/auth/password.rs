// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Salted password hashing (PBKDF2-HMAC-SHA512 via `ring`).
//!
//! Salt and hash are stored base64-encoded on the identity.

use std::num::NonZeroU32;

use base64ct::{Base64, Encoding};
use ring::{
    pbkdf2,
    rand::{SecureRandom, SystemRandom},
};

const SALT_LEN: usize = 32;
const HASH_LEN: usize = 64;
const PBKDF2_ITERATIONS: NonZeroU32 = match NonZeroU32::new(1000) {
    Some(n) => n,
    None => panic!("iteration count must be non-zero"),
};

/// Random source failure while generating a salt.
#[derive(Debug, thiserror::Error)]
#[error("secure random generator failed")]
pub struct RandomError;

/// Generate a fresh base64 salt.
pub fn generate_salt(rng: &SystemRandom) -> Result<String, RandomError> {
    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt).map_err(|_| RandomError)?;
    Ok(Base64::encode_string(&salt))
}

/// Derive the base64 hash of `password` under `salt`.
///
/// Deterministic: the same pair always yields the same output.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut out = [0u8; HASH_LEN];
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA512,
        PBKDF2_ITERATIONS,
        salt.as_bytes(),
        password.as_bytes(),
        &mut out,
    );
    Base64::encode_string(&out)
}

/// Recompute the hash of `password` and compare it with `stored_hash`.
pub fn verify_password(password: &str, salt: &str, stored_hash: &str) -> bool {
    let Ok(expected) = Base64::decode_vec(stored_hash) else {
        return false;
    };
    pbkdf2::verify(
        pbkdf2::PBKDF2_HMAC_SHA512,
        PBKDF2_ITERATIONS,
        salt.as_bytes(),
        password.as_bytes(),
        &expected,
    )
    .is_ok()
}
