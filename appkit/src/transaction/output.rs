//! Spendable view of a box created by a signed transaction.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::types::{BoxId, Constant, ErgoBox, ErgoTree, RegisterId, Token, TxId};
use crate::api::pretty::{choose_encoder, render_tree};
use crate::api::types::ErgoTransactionOutput;
use crate::context::BlockchainContext;
use crate::error::EncodingError;

/// A box paired with the context it can be spent in.
///
/// Cheap to clone: both halves are reference counted.
#[derive(Clone)]
pub struct InputBox {
    ctx: Arc<BlockchainContext>,
    ergo_box: Arc<ErgoBox>,
}

impl InputBox {
    pub fn new(ctx: Arc<BlockchainContext>, ergo_box: Arc<ErgoBox>) -> Self {
        Self { ctx, ergo_box }
    }

    pub fn id(&self) -> BoxId {
        self.ergo_box.box_id()
    }

    /// Value in nanoERG.
    pub fn value(&self) -> u64 {
        self.ergo_box.candidate().value
    }

    pub fn ergo_tree(&self) -> &ErgoTree {
        &self.ergo_box.candidate().ergo_tree
    }

    pub fn creation_height(&self) -> u32 {
        self.ergo_box.candidate().creation_height
    }

    pub fn tokens(&self) -> &[Token] {
        &self.ergo_box.candidate().tokens
    }

    pub fn registers(&self) -> &BTreeMap<RegisterId, Constant> {
        &self.ergo_box.candidate().registers
    }

    pub fn register(&self, id: RegisterId) -> Option<&Constant> {
        self.registers().get(&id)
    }

    /// Id of the transaction that created this box.
    pub fn transaction_id(&self) -> TxId {
        self.ergo_box.transaction_id()
    }

    /// Output index within the creating transaction.
    pub fn transaction_index(&self) -> u16 {
        self.ergo_box.index()
    }

    pub fn ergo_box(&self) -> &ErgoBox {
        &self.ergo_box
    }

    /// Blocks since the box was created, measured against the context
    /// height. Zero when the context lags behind the box.
    pub fn confirmations(&self) -> u32 {
        self.ctx.height().saturating_sub(self.creation_height())
    }

    pub fn to_json(&self, pretty_print: bool) -> Result<String, EncodingError> {
        self.to_json_with(pretty_print, true)
    }

    /// Encodes the box as a node-API output document. Flags behave as in
    /// [`SignedTransaction::to_json_with`](super::SignedTransaction::to_json_with).
    pub fn to_json_with(
        &self,
        pretty_print: bool,
        format_json: bool,
    ) -> Result<String, EncodingError> {
        let mut doc = ErgoTransactionOutput::from(self.ergo_box.as_ref());
        if pretty_print {
            doc.ergo_tree = render_tree(
                self.ctx.tree_codec(),
                usize::from(self.transaction_index()),
                self.ergo_tree(),
            )?;
        }

        let encoder = choose_encoder(&self.ctx, pretty_print, format_json);
        debug!(box_id = %self.id(), pretty_print, format_json, "encoding box");
        Ok(encoder.encode(&doc)?)
    }
}

impl PartialEq for InputBox {
    fn eq(&self, other: &Self) -> bool {
        self.ergo_box == other.ergo_box
    }
}

impl Eq for InputBox {}

impl fmt::Debug for InputBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputBox")
            .field("id", &self.id())
            .field("value", &self.value())
            .field("transaction_id", &self.transaction_id())
            .field("index", &self.transaction_index())
            .finish()
    }
}
