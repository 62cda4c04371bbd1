//! # Node API Encoding
//!
//! Everything needed to turn a ledger transaction into the JSON document the
//! node's transaction endpoints speak, and back.
//!
//! ## Architecture
//!
//! ```text
//! types.rs   — serde structs mirroring the node's ErgoTransaction schema
//! convert.rs — TryFrom conversions ledger ↔ API, structural limit checks
//! json.rs    — JsonEncoder: compact or pretty serialization
//! pretty.rs  — script decoding and encoder choice for display output
//! ```
//!
//! The conversion always produces an owned document. Anything that rewrites
//! fields for display (pretty-printing scripts, for one) works on that copy.

pub mod convert;
pub mod json;
pub mod pretty;
pub mod types;

pub use convert::check_limits;
pub use json::{JsonEncoder, JsonFormat};
pub use types::{
    Asset, ErgoTransaction, ErgoTransactionDataInput, ErgoTransactionInput,
    ErgoTransactionOutput, SpendingProof,
};
