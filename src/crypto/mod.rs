//! Cryptography module - SHA-256 ids, scrypt proof of work, Merkle trees

mod hash;
mod merkle;
mod scrypt_pow;

pub use hash::*;
pub use merkle::*;
pub use scrypt_pow::*;
