//! # Protocol Configuration & Constants
//!
//! Every structural limit and formatting default used by the encoder lives
//! here. The limits mirror the ones the Ergo reference node enforces when it
//! parses a transaction, so anything we refuse to encode the node would have
//! refused to accept anyway.

/// Library version, as published.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ---------------------------------------------------------------------------
// Digests
// ---------------------------------------------------------------------------

/// Length of every Ergo digest (transaction ids, box ids, token ids).
pub const DIGEST_LENGTH: usize = 32;

/// Length of a transaction id rendered as lowercase hex.
pub const TX_ID_HEX_LENGTH: usize = DIGEST_LENGTH * 2;

// ---------------------------------------------------------------------------
// Structural Limits
// ---------------------------------------------------------------------------

/// Maximum number of inputs in one transaction. Counts are signed 16-bit
/// on the wire.
pub const MAX_INPUTS: usize = i16::MAX as usize;

/// Maximum number of data inputs in one transaction.
pub const MAX_DATA_INPUTS: usize = i16::MAX as usize;

/// Maximum number of outputs in one transaction.
pub const MAX_OUTPUTS: usize = i16::MAX as usize;

/// Maximum number of distinct tokens a single box may carry. The count is
/// written as one unsigned byte.
pub const MAX_TOKENS_PER_BOX: usize = u8::MAX as usize;

/// Number of non-mandatory registers (`R4`..=`R9`).
pub const MAX_REGISTERS: usize = 6;

/// Index of the first non-mandatory register. `R0`..`R3` are derived from
/// the box itself and never appear in `additionalRegisters`.
pub const FIRST_NON_MANDATORY_REGISTER: u8 = 4;

// ---------------------------------------------------------------------------
// ErgoTree
// ---------------------------------------------------------------------------

/// Header + type + opcode prefix of a pay-to-public-key tree:
/// header `0x00`, type `SSigmaProp` (`0x08`), `ProveDlog` (`0xcd`).
pub const P2PK_TREE_PREFIX: [u8; 3] = [0x00, 0x08, 0xcd];

/// Length of a compressed secp256k1 point.
pub const GROUP_ELEMENT_LENGTH: usize = 33;

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Indentation width of the pretty JSON encoder. Two spaces, matching the
/// node's own pretty output.
pub const DEFAULT_PRETTY_INDENT: usize = 2;
