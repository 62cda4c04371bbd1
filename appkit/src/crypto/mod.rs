//! # Cryptographic Primitives
//!
//! Ergo hashes everything with BLAKE2b-256: transaction ids, box ids, token
//! ids. That is the only primitive this crate needs. Signing and proof
//! verification happen upstream.

pub mod hash;

pub use hash::{blake2b256, blake2b256_multi, Digest32};
