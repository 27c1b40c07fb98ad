//! Password digest verification.
//!
//! The digest algorithm itself (PBKDF2-HMAC-SHA512, 10,000 iterations,
//! 64-byte key and salt) is specified only as an opaque
//! `encode(plaintext, salt) -> digest` contract; provisioning credentials
//! with it is the init tool's job, out of scope here. This module only
//! needs to *verify* a client-supplied password against a digest already
//! sitting in the credential store.

use std::num::NonZeroU32;

use ring::pbkdf2;

pub const PBKDF2_ITERATIONS: u32 = 10_000;
pub const KEY_LEN: usize = 64;
pub const SALT_LEN: usize = 64;

/// Encode `plaintext` under `salt`, producing the digest that would be
/// stored in the credential store. Used by `chatty-init` when
/// provisioning, and by tests.
pub fn encode(plaintext: &[u8], salt: &[u8]) -> [u8; KEY_LEN] {
    let mut out = [0u8; KEY_LEN];
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA512,
        NonZeroU32::new(PBKDF2_ITERATIONS).expect("nonzero iteration count"),
        salt,
        plaintext,
        &mut out,
    );
    out
}

/// Constant-time check that `plaintext`, encoded under `salt`, matches
/// `digest`.
pub fn verify(plaintext: &[u8], salt: &[u8], digest: &[u8]) -> bool {
    pbkdf2::verify(
        pbkdf2::PBKDF2_HMAC_SHA512,
        NonZeroU32::new(PBKDF2_ITERATIONS).expect("nonzero iteration count"),
        salt,
        plaintext,
        digest,
    )
    .is_ok()
}
