// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Ergo Appkit — Signed Transaction Core
//!
//! A read-only view over a finalized, signed Ergo transaction: its canonical
//! identifier, its signed inputs, the boxes it creates, and the JSON document
//! a node's `/transactions` endpoint accepts.
//!
//! Nothing in here builds, signs, costs or broadcasts transactions. Those
//! jobs belong to the assembly pipeline that hands us a finished
//! [`transaction::SignedTransaction`]. We only look at it, carefully, and
//! never touch it.
//!
//! ## Architecture
//!
//! - **config** — Protocol limits and formatting defaults.
//! - **crypto** — blake2b256, the only hash Ergo cares about.
//! - **script** — The ErgoTree bytes↔text codec seam.
//! - **transaction** — Ledger types, canonical bytes, the signed record and its views.
//! - **api** — Node-API schema types, conversions, and the JSON encoder.
//! - **context** — Execution context shared by records and box views.
//! - **error** — `EncodingError`, the one failure this crate produces.
//!
//! ## Design Philosophy
//!
//! 1. The raw transaction is borrowed, never mutated. Pretty-printing works on
//!    an owned copy.
//! 2. Views are relation + lookup. They point at data; they do not own it.
//! 3. Order is identity. Reordering inputs or outputs changes the id.

pub mod api;
pub mod config;
pub mod context;
pub mod crypto;
pub mod error;
pub mod script;
pub mod transaction;

pub use config::VERSION;
pub use context::BlockchainContext;
pub use error::EncodingError;
pub use script::{CodecError, ErgoTreeCodec, P2pkTreeCodec};
pub use transaction::{InputBox, SignedInput, SignedTransaction};
