//! Human-readable rendering of API documents.
//!
//! Pretty-printing swaps each output's hex `ergoTree` for the text the
//! context's codec produces. It only ever writes into an owned API document;
//! the tree bytes are read from the ledger side, which stays borrowed
//! immutably throughout.

use std::borrow::Cow;

use tracing::warn;

use super::json::JsonEncoder;
use super::types::ErgoTransactionOutput;
use crate::context::BlockchainContext;
use crate::error::EncodingError;
use crate::script::ErgoTreeCodec;
use crate::transaction::types::ErgoTree;

/// Renders one tree through `codec`, tagging failures with the output index.
pub fn render_tree(
    codec: &dyn ErgoTreeCodec,
    index: usize,
    tree: &ErgoTree,
) -> Result<String, EncodingError> {
    codec.decode(tree).map_err(|source| {
        warn!(index, tree = %tree.to_hex(), error = %source, "ergo tree codec rejected output script");
        EncodingError::ScriptDecode { index, source }
    })
}

/// Replaces `outputs[i].ergo_tree` with the decoded text of `trees[i]`.
///
/// Both sequences come from the same transaction, so they line up one to
/// one. Stops at the first tree the codec rejects.
pub fn decode_output_trees<'t>(
    codec: &dyn ErgoTreeCodec,
    trees: impl IntoIterator<Item = &'t ErgoTree>,
    outputs: &mut [ErgoTransactionOutput],
) -> Result<(), EncodingError> {
    for (index, (output, tree)) in outputs.iter_mut().zip(trees).enumerate() {
        output.ergo_tree = render_tree(codec, index, tree)?;
    }
    Ok(())
}

/// Pretty layout when either flag asks for it, otherwise the context's
/// shared encoder.
pub fn choose_encoder(
    ctx: &BlockchainContext,
    pretty_print: bool,
    format_json: bool,
) -> Cow<'_, JsonEncoder> {
    if pretty_print || format_json {
        Cow::Owned(JsonEncoder::pretty())
    } else {
        Cow::Borrowed(ctx.json_encoder())
    }
}
