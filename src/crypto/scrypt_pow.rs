//! Scrypt proof-of-work digest
//!
//! Litecoin parameters: N = 1024, r = 1, p = 1, 32-byte output, with the
//! serialized header used as both password and salt.

use ::scrypt::{scrypt, Params};
use once_cell::sync::Lazy;

use super::Hash;

const LOG_N: u8 = 10;
const R: u32 = 1;
const P: u32 = 1;
const OUTPUT_LEN: usize = 32;

static PARAMS: Lazy<Params> =
    Lazy::new(|| Params::new(LOG_N, R, P, OUTPUT_LEN).expect("N=1024, r=1, p=1 are valid scrypt parameters"));

/// Scrypt digest of a serialized header
pub fn scrypt_digest(header: &[u8]) -> Hash {
    let mut output = [0u8; OUTPUT_LEN];
    scrypt(header, header, &PARAMS, &mut output).expect("32-byte scrypt output is a valid length");
    Hash(output)
}
