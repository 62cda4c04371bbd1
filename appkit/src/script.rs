//! # ErgoTree Codec
//!
//! Compiled guard scripts travel as bytes, but humans want to read them.
//! [`ErgoTreeCodec`] is the seam where the two meet: a named, bidirectional
//! conversion that the rest of the crate consumes without knowing anything
//! about the tree format.
//!
//! The real codec (a full sigma-language decompiler) lives outside this
//! crate and is injected through [`BlockchainContext`](crate::BlockchainContext).
//! [`P2pkTreeCodec`] is the built-in fallback: it understands exactly one
//! shape of tree, pay-to-public-key, and says so loudly for everything else.

use thiserror::Error;

use crate::config::{GROUP_ELEMENT_LENGTH, P2PK_TREE_PREFIX};
use crate::transaction::types::ErgoTree;

/// Errors produced by an [`ErgoTreeCodec`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The codec does not know how to render this tree.
    #[error("unsupported ergo tree: {tree_hex}")]
    Unsupported { tree_hex: String },

    /// The textual form could not be compiled back into a tree.
    #[error("invalid script source: {reason}")]
    InvalidSource { reason: String },
}

/// Bidirectional conversion between a compiled tree and its textual form.
///
/// `decode` is what JSON pretty-printing uses. `encode` is the inverse; the
/// encoder never calls it, but a codec is expected to round-trip:
/// `encode(decode(t)?)? == t` for every tree it accepts.
pub trait ErgoTreeCodec: Send + Sync {
    /// Bytes → text.
    fn decode(&self, tree: &ErgoTree) -> Result<String, CodecError>;

    /// Text → bytes.
    fn encode(&self, source: &str) -> Result<ErgoTree, CodecError>;
}

/// Codec for pay-to-public-key trees only.
///
/// `0008cd<33-byte point>` ↔ `ProveDlog(<hex point>)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct P2pkTreeCodec;

impl P2pkTreeCodec {
    const TEXT_PREFIX: &'static str = "ProveDlog(";
    const TEXT_SUFFIX: &'static str = ")";
}

impl ErgoTreeCodec for P2pkTreeCodec {
    fn decode(&self, tree: &ErgoTree) -> Result<String, CodecError> {
        let bytes = tree.bytes();
        match bytes.strip_prefix(P2PK_TREE_PREFIX.as_slice()) {
            Some(point) if point.len() == GROUP_ELEMENT_LENGTH => Ok(format!(
                "{}{}{}",
                Self::TEXT_PREFIX,
                hex::encode(point),
                Self::TEXT_SUFFIX
            )),
            _ => Err(CodecError::Unsupported {
                tree_hex: tree.to_hex(),
            }),
        }
    }

    fn encode(&self, source: &str) -> Result<ErgoTree, CodecError> {
        let point_hex = source
            .trim()
            .strip_prefix(Self::TEXT_PREFIX)
            .and_then(|rest| rest.strip_suffix(Self::TEXT_SUFFIX))
            .ok_or_else(|| CodecError::InvalidSource {
                reason: format!("expected ProveDlog(<point>), got {:?}", source),
            })?;

        let point = hex::decode(point_hex).map_err(|e| CodecError::InvalidSource {
            reason: format!("point is not hex: {}", e),
        })?;
        if point.len() != GROUP_ELEMENT_LENGTH {
            return Err(CodecError::InvalidSource {
                reason: format!(
                    "point must be {} bytes, got {}",
                    GROUP_ELEMENT_LENGTH,
                    point.len()
                ),
            });
        }

        let mut bytes = Vec::with_capacity(P2PK_TREE_PREFIX.len() + GROUP_ELEMENT_LENGTH);
        bytes.extend_from_slice(&P2PK_TREE_PREFIX);
        bytes.extend_from_slice(&point);
        Ok(ErgoTree::from_bytes(bytes))
    }
}
