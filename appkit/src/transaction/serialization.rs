//! Canonical byte serialization.
//!
//! The transaction id commits to [`ErgoLikeTransaction::bytes_to_sign`],
//! which is the full serialization with every spending proof left out. That
//! keeps the id stable across signing: the id you compute before proving is
//! the id the node reports afterwards.
//!
//! Integers are unsigned LEB128 ("VLQ"); counts that the wire format stores
//! as a single byte (tokens and registers per box, context variables) are
//! written as one byte.

use std::collections::{HashMap, HashSet};

use super::types::{
    BoxId, ContextExtension, ErgoBoxCandidate, ErgoLikeTransaction, Input, TokenId, TxId,
};
use crate::crypto::hash::blake2b256_multi;

// ---------------------------------------------------------------------------
// SigmaWriter
// ---------------------------------------------------------------------------

/// Append-only byte buffer with the handful of encodings the transaction
/// format needs.
#[derive(Debug, Default)]
pub struct SigmaWriter {
    buf: Vec<u8>,
}

impl SigmaWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn put_u8(&mut self, value: u8) -> &mut Self {
        self.buf.push(value);
        self
    }

    /// Unsigned LEB128: seven bits per byte, high bit set on every byte but
    /// the last.
    pub fn put_vlq(&mut self, mut value: u64) -> &mut Self {
        loop {
            let byte = (value & 0x7f) as u8;
            value >>= 7;
            if value == 0 {
                self.buf.push(byte);
                return self;
            }
            self.buf.push(byte | 0x80);
        }
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Byte-sized count. Saturates; callers that care reject oversized
    /// collections before serializing.
    pub fn put_count_u8(&mut self, count: usize) -> &mut Self {
        self.put_u8(u8::try_from(count).unwrap_or(u8::MAX))
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

// ---------------------------------------------------------------------------
// Transaction bytes
// ---------------------------------------------------------------------------

impl ErgoLikeTransaction {
    /// Bytes committed to by the transaction id and by every input's proof.
    pub fn bytes_to_sign(&self) -> Vec<u8> {
        self.serialize(false)
    }

    /// Full signed serialization, proofs included. Its length is the `size`
    /// the node reports for the transaction.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.serialize(true)
    }

    /// Token ids referenced by the outputs, deduplicated, in order of first
    /// appearance.
    pub fn distinct_token_ids(&self) -> Vec<TokenId> {
        let mut seen = HashSet::new();
        self.output_candidates
            .iter()
            .flat_map(|c| c.tokens.iter())
            .filter(|token| seen.insert(token.id))
            .map(|token| token.id)
            .collect()
    }

    fn serialize(&self, with_proofs: bool) -> Vec<u8> {
        let mut w = SigmaWriter::with_capacity(256);

        w.put_vlq(self.inputs.len() as u64);
        for input in &self.inputs {
            write_input(&mut w, input, with_proofs);
        }

        w.put_vlq(self.data_inputs.len() as u64);
        for data_input in &self.data_inputs {
            w.put_bytes(data_input.box_id.as_ref());
        }

        let token_ids = self.distinct_token_ids();
        let token_index: HashMap<TokenId, usize> = token_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, i))
            .collect();
        w.put_vlq(token_ids.len() as u64);
        for id in &token_ids {
            w.put_bytes(id.as_ref());
        }

        w.put_vlq(self.output_candidates.len() as u64);
        for candidate in &self.output_candidates {
            write_candidate(&mut w, candidate, Some(&token_index));
        }

        w.into_bytes()
    }
}

fn write_input(w: &mut SigmaWriter, input: &Input, with_proof: bool) {
    w.put_bytes(input.box_id.as_ref());
    if with_proof {
        let proof = &input.spending_proof.proof;
        w.put_vlq(proof.len() as u64);
        w.put_bytes(proof);
    }
    write_extension(w, &input.spending_proof.extension);
}

fn write_extension(w: &mut SigmaWriter, extension: &ContextExtension) {
    w.put_count_u8(extension.values.len());
    for (key, value) in &extension.values {
        w.put_u8(*key);
        w.put_bytes(value.bytes());
    }
}

/// Writes a box candidate. Inside a transaction tokens are referenced by
/// index into the distinct-id table; standalone (for box ids) the full token
/// id is written instead.
fn write_candidate(
    w: &mut SigmaWriter,
    candidate: &ErgoBoxCandidate,
    token_index: Option<&HashMap<TokenId, usize>>,
) {
    w.put_vlq(candidate.value);
    w.put_bytes(candidate.ergo_tree.bytes());
    w.put_vlq(u64::from(candidate.creation_height));

    w.put_count_u8(candidate.tokens.len());
    for token in &candidate.tokens {
        match token_index.and_then(|idx| idx.get(&token.id)) {
            Some(i) => {
                w.put_vlq(*i as u64);
            }
            None => {
                w.put_bytes(token.id.as_ref());
            }
        }
        w.put_vlq(token.amount);
    }

    w.put_count_u8(candidate.registers.len());
    for value in candidate.registers.values() {
        w.put_bytes(value.bytes());
    }
}

/// Standalone serialization of a box candidate (full token ids).
pub fn candidate_bytes(candidate: &ErgoBoxCandidate) -> Vec<u8> {
    let mut w = SigmaWriter::with_capacity(128);
    write_candidate(&mut w, candidate, None);
    w.into_bytes()
}

/// Id of the `index`-th output of transaction `tx_id`.
pub fn box_id(candidate: &ErgoBoxCandidate, tx_id: &TxId, index: u16) -> BoxId {
    let body = candidate_bytes(candidate);
    let mut suffix = SigmaWriter::new();
    suffix.put_vlq(u64::from(index));
    let suffix = suffix.into_bytes();
    blake2b256_multi(&[body.as_slice(), tx_id.as_ref(), suffix.as_slice()])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
