//! Node REST API transaction schema.
//!
//! These mirror the `ErgoTransaction` document accepted by the node's
//! `POST /transactions` endpoint and returned by its query endpoints. Every
//! byte field is lowercase hex; every field name is camelCase.
//!
//! The structs are plain owned data. Converting a transaction into them
//! produces an independent copy, which is what lets pretty-printing rewrite
//! `ergoTree` without ever touching the source transaction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A transaction as the node API sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErgoTransaction {
    pub id: String,
    pub inputs: Vec<ErgoTransactionInput>,
    #[serde(default)]
    pub data_inputs: Vec<ErgoTransactionDataInput>,
    pub outputs: Vec<ErgoTransactionOutput>,
    /// Size of the signed serialization in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// A signed input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErgoTransactionInput {
    pub box_id: String,
    pub spending_proof: SpendingProof,
}

/// Proof bytes plus the context extension, keyed by variable id in decimal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingProof {
    pub proof_bytes: String,
    #[serde(default)]
    pub extension: BTreeMap<String, String>,
}

/// A read-only data input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErgoTransactionDataInput {
    pub box_id: String,
}

/// An output box.
///
/// `ergo_tree` is hex by default and codec text after pretty-printing. The
/// derived fields (`box_id`, `transaction_id`, `index`) are optional so that
/// unsigned outputs can be represented too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErgoTransactionOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_id: Option<String>,
    pub value: u64,
    pub ergo_tree: String,
    pub creation_height: u32,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub additional_registers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u16>,
}

/// A token amount held in an output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub token_id: String,
    pub amount: u64,
}
