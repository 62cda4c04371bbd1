//! # Hashing Utilities
//!
//! BLAKE2b with a 256-bit output, as used by every Ergo identifier. We wrap
//! `blake2b_simd` rather than hand-rolling anything: it is fast, audited,
//! and already does the SIMD dispatch for us.
//!
//! [`Digest32`] is the fixed-size result type. Transaction ids, box ids and
//! token ids are all `Digest32` under different names, and all of them are
//! rendered as lowercase hex when they leave the process.

use std::fmt;
use std::str::FromStr;

use crate::config::DIGEST_LENGTH;

/// A 32-byte BLAKE2b-256 digest.
///
/// `Display` and `FromStr` use lowercase hex, which is how the node API and
/// explorers render ids.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Digest32([u8; DIGEST_LENGTH]);

impl Digest32 {
    /// Wraps raw digest bytes.
    pub const fn from_bytes(bytes: [u8; DIGEST_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Returns the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LENGTH] {
        &self.0
    }

    /// Lowercase hex rendering, 64 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; DIGEST_LENGTH];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl From<[u8; DIGEST_LENGTH]> for Digest32 {
    fn from(bytes: [u8; DIGEST_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Digest32 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Digest32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest32({})", self.to_hex())
    }
}

impl FromStr for Digest32 {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Compute the BLAKE2b-256 hash of the input data.
///
/// # Example
///
/// ```
/// use ergo_appkit::crypto::blake2b256;
///
/// let digest = blake2b256(b"ergo");
/// assert_eq!(digest.as_bytes().len(), 32);
/// ```
pub fn blake2b256(data: &[u8]) -> Digest32 {
    let hash = blake2b_simd::Params::new()
        .hash_length(DIGEST_LENGTH)
        .hash(data);

    let mut output = [0u8; DIGEST_LENGTH];
    output.copy_from_slice(hash.as_bytes());
    Digest32(output)
}

/// Hash multiple byte slices together without concatenating them first.
///
/// Box ids are `blake2b256(candidate_bytes ‖ tx_id ‖ index)`; feeding the
/// parts into one state saves the temporary buffer.
pub fn blake2b256_multi(parts: &[&[u8]]) -> Digest32 {
    let mut state = blake2b_simd::Params::new()
        .hash_length(DIGEST_LENGTH)
        .to_state();
    for part in parts {
        state.update(part);
    }

    let mut output = [0u8; DIGEST_LENGTH];
    output.copy_from_slice(state.finalize().as_bytes());
    Digest32(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blake2b256_known_vector() {
        // BLAKE2b-256 of the empty string.
        let digest = blake2b256(b"");
        assert_eq!(
            digest.to_hex(),
            "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
        );
    }

    #[test]
    fn blake2b256_deterministic() {
        assert_eq!(blake2b256(b"ergo"), blake2b256(b"ergo"));
        assert_ne!(blake2b256(b"ergo"), blake2b256(b"Ergo"));
    }

    #[test]
    fn multi_matches_concatenation() {
        let multi = blake2b256_multi(&[b"hello".as_slice(), b" world".as_slice()]);
        assert_eq!(multi, blake2b256(b"hello world"));
    }

    #[test]
    fn digest_hex_roundtrip() {
        let digest = blake2b256(b"box");
        let parsed: Digest32 = digest.to_hex().parse().unwrap();
        assert_eq!(parsed, digest);
        assert_eq!(digest.to_string(), digest.to_hex());
    }

    #[test]
    fn digest_rejects_wrong_length() {
        assert!(Digest32::from_hex("abcd").is_err());
        assert!(Digest32::from_hex(&"zz".repeat(32)).is_err());
    }
}
