//! The signed transaction record.
//!
//! A [`SignedTransaction`] is what the signing pipeline hands over when it is
//! done: the assembled [`ErgoLikeTransaction`], the cost the verifier charged
//! for it, and the context it was built in. From here on it is read-only.
//! Every accessor either returns a borrowed view or builds a fresh value, so
//! a record can be shared across threads without any locking.
//!
//! Construction checks the structural limits once. A record that exists has
//! exactly one box per declared output, and encoding it can only fail in the
//! codec.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::input::SignedInput;
use super::output::InputBox;
use super::types::{ErgoBox, ErgoLikeTransaction, TxId};
use crate::api::convert::check_limits;
use crate::api::pretty::{choose_encoder, decode_output_trees};
use crate::api::types::ErgoTransaction;
use crate::context::BlockchainContext;
use crate::error::EncodingError;

/// A finalized, signed and costed transaction.
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    ctx: Arc<BlockchainContext>,
    tx: ErgoLikeTransaction,
    outputs: Vec<Arc<ErgoBox>>,
    cost: u64,
}

impl SignedTransaction {
    /// Wraps a finished transaction.
    ///
    /// # Errors
    ///
    /// [`EncodingError::Malformed`] if the transaction breaks a structural
    /// limit of the wire format.
    pub fn new(
        ctx: Arc<BlockchainContext>,
        tx: ErgoLikeTransaction,
        cost: u64,
    ) -> Result<Self, EncodingError> {
        check_limits(&tx)?;
        let outputs = tx.outputs()?.into_iter().map(Arc::new).collect();
        Ok(Self {
            ctx,
            tx,
            outputs,
            cost,
        })
    }

    /// The underlying transaction. Shared access only.
    pub fn tx(&self) -> &ErgoLikeTransaction {
        &self.tx
    }

    pub fn context(&self) -> &Arc<BlockchainContext> {
        &self.ctx
    }

    /// Canonical id as 64 lowercase hex characters.
    pub fn id(&self) -> String {
        self.tx_id().to_hex()
    }

    pub fn tx_id(&self) -> TxId {
        self.tx.id()
    }

    /// Execution cost charged when the transaction was verified. Stored, not
    /// recomputed.
    pub fn cost(&self) -> u64 {
        self.cost
    }

    /// One view per input, in input order. Built fresh on every call.
    pub fn signed_inputs(&self) -> Vec<SignedInput<'_>> {
        (0..self.tx.inputs.len())
            .map(|index| SignedInput::new(self, index))
            .collect()
    }

    /// The boxes this transaction creates, wrapped for spending by a later
    /// transaction. One view per declared output, built fresh on every call.
    pub fn outputs_to_spend(&self) -> Vec<InputBox> {
        self.outputs
            .iter()
            .map(|ergo_box| InputBox::new(Arc::clone(&self.ctx), Arc::clone(ergo_box)))
            .collect()
    }

    /// Same as [`to_json_with`](Self::to_json_with) with `format_json = true`.
    pub fn to_json(&self, pretty_print: bool) -> Result<String, EncodingError> {
        self.to_json_with(pretty_print, true)
    }

    /// Encodes the transaction as a node-API JSON document.
    ///
    /// With `pretty_print` every output's `ergoTree` is replaced by the
    /// codec's text and the document is indented. With only `format_json`
    /// the document is indented but scripts stay hex. With neither, the
    /// context's shared encoder decides the layout.
    ///
    /// # Errors
    ///
    /// [`EncodingError::ScriptDecode`] if the codec rejects a tree while
    /// pretty-printing. Nothing is returned on failure.
    pub fn to_json_with(
        &self,
        pretty_print: bool,
        format_json: bool,
    ) -> Result<String, EncodingError> {
        let mut api_tx = ErgoTransaction::try_from(&self.tx)?;

        if pretty_print {
            let trees = self.tx.output_candidates.iter().map(|c| &c.ergo_tree);
            decode_output_trees(self.ctx.tree_codec(), trees, &mut api_tx.outputs)?;
        }

        let encoder = choose_encoder(&self.ctx, pretty_print, format_json);
        debug!(
            tx_id = %api_tx.id,
            pretty_print,
            format_json,
            outputs = api_tx.outputs.len(),
            "encoding signed transaction"
        );
        Ok(encoder.encode(&api_tx)?)
    }
}

impl fmt::Display for SignedTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signed({})", self.tx)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
