//! # Transactions
//!
//! The ledger side of the crate: the transaction as the signing pipeline
//! assembled it, its canonical byte layout, and the read-only record and
//! views handed to callers.
//!
//! ## Architecture
//!
//! ```text
//! types.rs         — ErgoLikeTransaction, inputs, box candidates, boxes
//! serialization.rs — SigmaWriter, bytes_to_sign / to_bytes, box ids
//! signed.rs        — SignedTransaction: id, cost, views, to_json
//! input.rs         — SignedInput: borrowed view of one input
//! output.rs        — InputBox: a created box ready to be spent
//! ```

pub mod input;
pub mod output;
pub mod serialization;
pub mod signed;
pub mod types;

pub use input::SignedInput;
pub use output::InputBox;
pub use signed::SignedTransaction;
pub use types::{
    BoxId, Constant, ContextExtension, DataInput, ErgoBox, ErgoBoxCandidate, ErgoLikeTransaction,
    ErgoTree, Input, ProverResult, RegisterId, Token, TokenId, TxId,
};
