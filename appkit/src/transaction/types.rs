//! Core type definitions for Ergo transactions.
//!
//! These are the pieces an assembled transaction is made of: inputs with
//! their spending proofs, read-only data inputs, and output box candidates
//! carrying value, a guard script, tokens and registers. Script and register
//! contents stay opaque byte strings here; interpreting them is somebody
//! else's job.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::config::{FIRST_NON_MANDATORY_REGISTER, MAX_REGISTERS};
use crate::crypto::hash::Digest32;
use crate::error::EncodingError;

/// Identifier of a box (unspent or spent).
pub type BoxId = Digest32;

/// Identifier of a transaction.
pub type TxId = Digest32;

/// Identifier of a token. Equal to the id of the first input of the
/// transaction that minted it.
pub type TokenId = Digest32;

// ---------------------------------------------------------------------------
// Opaque byte payloads
// ---------------------------------------------------------------------------

/// A compiled guard script in its serialized binary form.
///
/// We never parse the tree. Turning it into text is the job of an
/// [`ErgoTreeCodec`](crate::script::ErgoTreeCodec).
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct ErgoTree(Vec<u8>);

impl ErgoTree {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex of the serialized tree, as the node API expects it.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Debug for ErgoTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ErgoTree({})", self.to_hex())
    }
}

/// A serialized sigma constant (register value or context variable).
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Constant(Vec<u8>);

impl Constant {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Debug for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constant({})", self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// RegisterId
// ---------------------------------------------------------------------------

/// A non-mandatory box register.
///
/// `R0`..`R3` (value, script, tokens, creation info) are derived from the box
/// itself, so only `R4`..`R9` are ever stored explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegisterId {
    R4,
    R5,
    R6,
    R7,
    R8,
    R9,
}

impl RegisterId {
    /// All non-mandatory registers in canonical order.
    pub const ALL: [RegisterId; MAX_REGISTERS] = [
        RegisterId::R4,
        RegisterId::R5,
        RegisterId::R6,
        RegisterId::R7,
        RegisterId::R8,
        RegisterId::R9,
    ];

    /// Register number, `4..=9`.
    pub fn number(self) -> u8 {
        FIRST_NON_MANDATORY_REGISTER + self.offset() as u8
    }

    /// Zero-based position among the non-mandatory registers.
    pub fn offset(self) -> usize {
        match self {
            Self::R4 => 0,
            Self::R5 => 1,
            Self::R6 => 2,
            Self::R7 => 3,
            Self::R8 => 4,
            Self::R9 => 5,
        }
    }

    /// Looks up a register by number. Returns `None` outside `4..=9`.
    pub fn from_number(number: u8) -> Option<Self> {
        number
            .checked_sub(FIRST_NON_MANDATORY_REGISTER)
            .and_then(|offset| Self::ALL.get(offset as usize).copied())
    }
}

impl fmt::Display for RegisterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.number())
    }
}

impl FromStr for RegisterId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('R')
            .and_then(|n| n.parse::<u8>().ok())
            .and_then(Self::from_number)
            .ok_or_else(|| s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tokens, proofs, inputs
// ---------------------------------------------------------------------------

/// An amount of a token held in a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub id: TokenId,
    pub amount: u64,
}

impl Token {
    pub fn new(id: TokenId, amount: u64) -> Self {
        Self { id, amount }
    }
}

/// Context variables attached to an input and visible to its guard script.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContextExtension {
    pub values: BTreeMap<u8, Constant>,
}

impl ContextExtension {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, key: u8) -> Option<&Constant> {
        self.values.get(&key)
    }
}

/// The prover's output for one input: the serialized sigma proof plus the
/// context extension it was produced against.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProverResult {
    pub proof: Vec<u8>,
    pub extension: ContextExtension,
}

/// A signed input: the box being spent and the proof authorizing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub box_id: BoxId,
    pub spending_proof: ProverResult,
}

impl Input {
    pub fn new(box_id: BoxId, spending_proof: ProverResult) -> Self {
        Self {
            box_id,
            spending_proof,
        }
    }
}

/// A box read by the transaction without being spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataInput {
    pub box_id: BoxId,
}

// ---------------------------------------------------------------------------
// Boxes
// ---------------------------------------------------------------------------

/// An output declared by a transaction, before the transaction id is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErgoBoxCandidate {
    /// Value in nanoERG.
    pub value: u64,
    pub ergo_tree: ErgoTree,
    pub creation_height: u32,
    pub tokens: Vec<Token>,
    pub registers: BTreeMap<RegisterId, Constant>,
}

impl ErgoBoxCandidate {
    /// `true` when the registers are packed from `R4` without gaps, which is
    /// the only layout the wire format can express.
    pub fn registers_densely_packed(&self) -> bool {
        self.registers
            .keys()
            .enumerate()
            .all(|(i, reg)| reg.offset() == i)
    }
}

/// An output box: a candidate pinned to the transaction that created it.
///
/// The id is derived once at construction from the candidate bytes, the
/// creating transaction id and the output index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErgoBox {
    box_id: BoxId,
    candidate: ErgoBoxCandidate,
    transaction_id: TxId,
    index: u16,
}

impl ErgoBox {
    pub fn new(candidate: ErgoBoxCandidate, transaction_id: TxId, index: u16) -> Self {
        let box_id = super::serialization::box_id(&candidate, &transaction_id, index);
        Self {
            box_id,
            candidate,
            transaction_id,
            index,
        }
    }

    pub fn box_id(&self) -> BoxId {
        self.box_id
    }

    pub fn candidate(&self) -> &ErgoBoxCandidate {
        &self.candidate
    }

    pub fn transaction_id(&self) -> TxId {
        self.transaction_id
    }

    pub fn index(&self) -> u16 {
        self.index
    }
}

// ---------------------------------------------------------------------------
// ErgoLikeTransaction
// ---------------------------------------------------------------------------

/// An assembled, signed transaction as produced by the signing pipeline.
///
/// Order matters everywhere: the id commits to input, data-input and output
/// order, and output indices are positions in `output_candidates`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErgoLikeTransaction {
    pub inputs: Vec<Input>,
    pub data_inputs: Vec<DataInput>,
    pub output_candidates: Vec<ErgoBoxCandidate>,
}

impl ErgoLikeTransaction {
    pub fn new(
        inputs: Vec<Input>,
        data_inputs: Vec<DataInput>,
        output_candidates: Vec<ErgoBoxCandidate>,
    ) -> Self {
        Self {
            inputs,
            data_inputs,
            output_candidates,
        }
    }

    /// Canonical id: `blake2b256(bytes_to_sign)`.
    pub fn id(&self) -> TxId {
        crate::crypto::blake2b256(&self.bytes_to_sign())
    }

    /// The boxes this transaction creates, one per candidate, in output
    /// order.
    ///
    /// Box indices are 16-bit; a transaction declaring more outputs than that
    /// has no valid box set and is rejected as a whole.
    pub fn outputs(&self) -> Result<Vec<ErgoBox>, EncodingError> {
        if self.output_candidates.len() > usize::from(u16::MAX) + 1 {
            return Err(EncodingError::malformed(format!(
                "{} outputs cannot be indexed by a 16-bit box index",
                self.output_candidates.len()
            )));
        }
        let tx_id = self.id();
        Ok(self
            .output_candidates
            .iter()
            .zip(0..=u16::MAX)
            .map(|(candidate, index)| ErgoBox::new(candidate.clone(), tx_id, index))
            .collect())
    }
}

impl fmt::Display for ErgoLikeTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ErgoLikeTransaction(id: {}, inputs: {}, dataInputs: {}, outputs: {})",
            self.id(),
            self.inputs.len(),
            self.data_inputs.len(),
            self.output_candidates.len()
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::blake2b256;

    fn candidate(registers: &[RegisterId]) -> ErgoBoxCandidate {
        ErgoBoxCandidate {
            value: 1_000_000,
            ergo_tree: ErgoTree::from_bytes(vec![0x00, 0x08, 0xcd]),
            creation_height: 100,
            tokens: vec![],
            registers: registers
                .iter()
                .map(|r| (*r, Constant::from_bytes(vec![0x04, r.number()])))
                .collect(),
        }
    }

    #[test]
    fn register_display_and_parse() {
        assert_eq!(RegisterId::R4.to_string(), "R4");
        assert_eq!(RegisterId::R9.to_string(), "R9");
        assert_eq!("R7".parse::<RegisterId>(), Ok(RegisterId::R7));
        assert!("R3".parse::<RegisterId>().is_err());
        assert!("R10".parse::<RegisterId>().is_err());
        assert!("X4".parse::<RegisterId>().is_err());
    }

    #[test]
    fn register_from_number_bounds() {
        assert_eq!(RegisterId::from_number(4), Some(RegisterId::R4));
        assert_eq!(RegisterId::from_number(9), Some(RegisterId::R9));
        assert_eq!(RegisterId::from_number(0), None);
        assert_eq!(RegisterId::from_number(10), None);
    }

    #[test]
    fn dense_registers_detected() {
        assert!(candidate(&[]).registers_densely_packed());
        assert!(candidate(&[RegisterId::R4, RegisterId::R5]).registers_densely_packed());
        assert!(!candidate(&[RegisterId::R5]).registers_densely_packed());
        assert!(!candidate(&[RegisterId::R4, RegisterId::R6]).registers_densely_packed());
    }

    #[test]
    fn outputs_carry_tx_id_and_index() {
        let tx = ErgoLikeTransaction::new(
            vec![Input::new(blake2b256(b"in"), ProverResult::default())],
            vec![],
            vec![candidate(&[]), candidate(&[RegisterId::R4])],
        );
        let outputs = tx.outputs().unwrap();
        assert_eq!(outputs.len(), 2);
        for (i, b) in outputs.iter().enumerate() {
            assert_eq!(b.transaction_id(), tx.id());
            assert_eq!(b.index() as usize, i);
            assert_eq!(b.candidate(), &tx.output_candidates[i]);
        }
        assert_ne!(outputs[0].box_id(), outputs[1].box_id());
    }

    #[test]
    fn oversized_output_list_is_rejected_not_truncated() {
        let declared = usize::from(u16::MAX) + 2;
        let tx = ErgoLikeTransaction::new(vec![], vec![], vec![candidate(&[]); declared]);
        assert!(matches!(tx.outputs(), Err(EncodingError::Malformed { .. })));
    }

    #[test]
    fn every_candidate_gets_a_box() {
        let declared = 300;
        let tx = ErgoLikeTransaction::new(vec![], vec![], vec![candidate(&[]); declared]);
        let outputs = tx.outputs().unwrap();
        assert_eq!(outputs.len(), declared);
        assert_eq!(usize::from(outputs[declared - 1].index()), declared - 1);
    }

    #[test]
    fn display_mentions_id_and_counts() {
        let tx = ErgoLikeTransaction::default();
        let rendered = tx.to_string();
        assert!(rendered.contains(&tx.id().to_hex()));
        assert!(rendered.contains("inputs: 0"));
    }
}
