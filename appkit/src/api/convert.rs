//! Conversions between ledger types and the node-API schema.
//!
//! Both directions are `TryFrom` impls. Ledger → API builds a fresh owned
//! document and never borrows from the source beyond the call. API → ledger
//! is what loads node JSON back into a transaction; it validates every hex
//! field and, when the document carries an id, checks it against the id
//! recomputed from the content. Output `boxId`, `transactionId` and `index`
//! are optional in the schema; those present must match the recomputed box.

use std::collections::BTreeMap;

use super::types::{
    Asset, ErgoTransaction, ErgoTransactionDataInput, ErgoTransactionInput,
    ErgoTransactionOutput, SpendingProof,
};
use crate::config::{
    MAX_DATA_INPUTS, MAX_INPUTS, MAX_OUTPUTS, MAX_TOKENS_PER_BOX,
};
use crate::crypto::hash::Digest32;
use crate::error::EncodingError;
use crate::transaction::types::{
    Constant, ContextExtension, DataInput, ErgoBox, ErgoBoxCandidate, ErgoLikeTransaction,
    ErgoTree, Input, ProverResult, RegisterId, Token,
};

// ---------------------------------------------------------------------------
// Structural limits
// ---------------------------------------------------------------------------

/// Rejects transactions the wire format cannot express.
pub fn check_limits(tx: &ErgoLikeTransaction) -> Result<(), EncodingError> {
    if tx.inputs.len() > MAX_INPUTS {
        return Err(EncodingError::malformed(format!(
            "{} inputs exceed the limit of {}",
            tx.inputs.len(),
            MAX_INPUTS
        )));
    }
    if tx.data_inputs.len() > MAX_DATA_INPUTS {
        return Err(EncodingError::malformed(format!(
            "{} data inputs exceed the limit of {}",
            tx.data_inputs.len(),
            MAX_DATA_INPUTS
        )));
    }
    if tx.output_candidates.len() > MAX_OUTPUTS {
        return Err(EncodingError::malformed(format!(
            "{} outputs exceed the limit of {}",
            tx.output_candidates.len(),
            MAX_OUTPUTS
        )));
    }

    for (index, input) in tx.inputs.iter().enumerate() {
        if input.spending_proof.extension.values.len() > u8::MAX as usize {
            return Err(EncodingError::malformed(format!(
                "input {} carries more than {} context variables",
                index,
                u8::MAX
            )));
        }
    }

    for (index, candidate) in tx.output_candidates.iter().enumerate() {
        if candidate.tokens.len() > MAX_TOKENS_PER_BOX {
            return Err(EncodingError::malformed(format!(
                "output {} holds {} tokens, limit is {}",
                index,
                candidate.tokens.len(),
                MAX_TOKENS_PER_BOX
            )));
        }
        if !candidate.registers_densely_packed() {
            let layout: Vec<String> = candidate.registers.keys().map(|r| r.to_string()).collect();
            return Err(EncodingError::malformed(format!(
                "output {} registers must be packed from R4 without gaps, got [{}]",
                index,
                layout.join(", ")
            )));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Ledger → API
// ---------------------------------------------------------------------------

impl TryFrom<&ErgoLikeTransaction> for ErgoTransaction {
    type Error = EncodingError;

    fn try_from(tx: &ErgoLikeTransaction) -> Result<Self, Self::Error> {
        check_limits(tx)?;

        let id = tx.id();
        let size = u32::try_from(tx.to_bytes().len())
            .map_err(|_| EncodingError::malformed("signed serialization exceeds 4 GiB"))?;

        let inputs = tx.inputs.iter().map(ErgoTransactionInput::from).collect();
        let data_inputs = tx
            .data_inputs
            .iter()
            .map(|d| ErgoTransactionDataInput {
                box_id: d.box_id.to_hex(),
            })
            .collect();
        let outputs = tx.outputs()?.iter().map(ErgoTransactionOutput::from).collect();

        Ok(Self {
            id: id.to_hex(),
            inputs,
            data_inputs,
            outputs,
            size: Some(size),
        })
    }
}

impl From<&Input> for ErgoTransactionInput {
    fn from(input: &Input) -> Self {
        let extension = input
            .spending_proof
            .extension
            .values
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_hex()))
            .collect();
        Self {
            box_id: input.box_id.to_hex(),
            spending_proof: SpendingProof {
                proof_bytes: hex::encode(&input.spending_proof.proof),
                extension,
            },
        }
    }
}

impl From<&ErgoBox> for ErgoTransactionOutput {
    fn from(ergo_box: &ErgoBox) -> Self {
        let candidate = ergo_box.candidate();
        Self {
            box_id: Some(ergo_box.box_id().to_hex()),
            value: candidate.value,
            ergo_tree: candidate.ergo_tree.to_hex(),
            creation_height: candidate.creation_height,
            assets: candidate
                .tokens
                .iter()
                .map(|t| Asset {
                    token_id: t.id.to_hex(),
                    amount: t.amount,
                })
                .collect(),
            additional_registers: candidate
                .registers
                .iter()
                .map(|(reg, value)| (reg.to_string(), value.to_hex()))
                .collect(),
            transaction_id: Some(ergo_box.transaction_id().to_hex()),
            index: Some(ergo_box.index()),
        }
    }
}

// ---------------------------------------------------------------------------
// API → Ledger
// ---------------------------------------------------------------------------

impl TryFrom<&ErgoTransaction> for ErgoLikeTransaction {
    type Error = EncodingError;

    fn try_from(api: &ErgoTransaction) -> Result<Self, Self::Error> {
        let inputs = api
            .inputs
            .iter()
            .enumerate()
            .map(|(i, input)| input_from_api(i, input))
            .collect::<Result<Vec<_>, _>>()?;

        let data_inputs = api
            .data_inputs
            .iter()
            .enumerate()
            .map(|(i, d)| {
                Ok(DataInput {
                    box_id: parse_digest(&d.box_id, || format!("dataInputs[{}].boxId", i))?,
                })
            })
            .collect::<Result<Vec<_>, EncodingError>>()?;

        let output_candidates = api
            .outputs
            .iter()
            .enumerate()
            .map(|(i, output)| candidate_from_api(i, output))
            .collect::<Result<Vec<_>, _>>()?;

        let tx = ErgoLikeTransaction::new(inputs, data_inputs, output_candidates);
        check_limits(&tx)?;

        // An empty id means "not computed yet"; anything else must match.
        let computed = tx.id().to_hex();
        if !api.id.is_empty() && !api.id.eq_ignore_ascii_case(&computed) {
            return Err(EncodingError::IdMismatch {
                expected: computed,
                actual: api.id.clone(),
            });
        }

        for (index, (output, ergo_box)) in api.outputs.iter().zip(tx.outputs()?).enumerate() {
            check_output_identity(index, output, &ergo_box)?;
        }

        Ok(tx)
    }
}

/// Compares the identity fields a node document may carry for an output
/// against the box recomputed from the transaction.
fn check_output_identity(
    index: usize,
    output: &ErgoTransactionOutput,
    ergo_box: &ErgoBox,
) -> Result<(), EncodingError> {
    let mismatch = |field: &'static str, expected: String, actual: String| {
        EncodingError::OutputMismatch {
            index,
            field,
            expected,
            actual,
        }
    };

    if let Some(box_id) = &output.box_id {
        let expected = ergo_box.box_id().to_hex();
        if !box_id.eq_ignore_ascii_case(&expected) {
            return Err(mismatch("boxId", expected, box_id.clone()));
        }
    }
    if let Some(tx_id) = &output.transaction_id {
        let expected = ergo_box.transaction_id().to_hex();
        if !tx_id.eq_ignore_ascii_case(&expected) {
            return Err(mismatch("transactionId", expected, tx_id.clone()));
        }
    }
    if let Some(actual) = output.index {
        if actual != ergo_box.index() {
            return Err(mismatch(
                "index",
                ergo_box.index().to_string(),
                actual.to_string(),
            ));
        }
    }
    Ok(())
}

fn input_from_api(index: usize, input: &ErgoTransactionInput) -> Result<Input, EncodingError> {
    let box_id = parse_digest(&input.box_id, || format!("inputs[{}].boxId", index))?;
    let proof = hex::decode(&input.spending_proof.proof_bytes).map_err(|e| {
        EncodingError::invalid_hex(format!("inputs[{}].spendingProof.proofBytes", index), e)
    })?;

    let mut values = BTreeMap::new();
    for (key, value) in &input.spending_proof.extension {
        let var_id: u8 = key.parse().map_err(|_| {
            EncodingError::malformed(format!(
                "inputs[{}] context variable id {:?} is not in 0..=255",
                index, key
            ))
        })?;
        let bytes = hex::decode(value).map_err(|e| {
            EncodingError::invalid_hex(
                format!("inputs[{}].spendingProof.extension.{}", index, key),
                e,
            )
        })?;
        values.insert(var_id, Constant::from_bytes(bytes));
    }

    Ok(Input::new(
        box_id,
        ProverResult {
            proof,
            extension: ContextExtension { values },
        },
    ))
}

fn candidate_from_api(
    index: usize,
    output: &ErgoTransactionOutput,
) -> Result<ErgoBoxCandidate, EncodingError> {
    let tree = hex::decode(&output.ergo_tree)
        .map_err(|e| EncodingError::invalid_hex(format!("outputs[{}].ergoTree", index), e))?;

    let tokens = output
        .assets
        .iter()
        .enumerate()
        .map(|(j, asset)| {
            let id = parse_digest(&asset.token_id, || {
                format!("outputs[{}].assets[{}].tokenId", index, j)
            })?;
            Ok(Token::new(id, asset.amount))
        })
        .collect::<Result<Vec<_>, EncodingError>>()?;

    let mut registers = BTreeMap::new();
    for (name, value) in &output.additional_registers {
        let reg: RegisterId = name
            .parse()
            .map_err(|unknown| EncodingError::UnknownRegister { name: unknown })?;
        let bytes = hex::decode(value).map_err(|e| {
            EncodingError::invalid_hex(
                format!("outputs[{}].additionalRegisters.{}", index, name),
                e,
            )
        })?;
        registers.insert(reg, Constant::from_bytes(bytes));
    }

    Ok(ErgoBoxCandidate {
        value: output.value,
        ergo_tree: ErgoTree::from_bytes(tree),
        creation_height: output.creation_height,
        tokens,
        registers,
    })
}

fn parse_digest(s: &str, field: impl FnOnce() -> String) -> Result<Digest32, EncodingError> {
    Digest32::from_hex(s).map_err(|e| EncodingError::invalid_hex(field(), e))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
