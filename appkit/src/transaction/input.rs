//! Read-only view of one input of a signed transaction.

use std::fmt;

use super::signed::SignedTransaction;
use super::types::{BoxId, ContextExtension, Input};

/// Borrowed view of `tx.inputs[index]`.
///
/// The view never outlives the transaction it was taken from.
#[derive(Clone, Copy)]
pub struct SignedInput<'a> {
    tx: &'a SignedTransaction,
    index: usize,
}

impl<'a> SignedInput<'a> {
    pub(crate) fn new(tx: &'a SignedTransaction, index: usize) -> Self {
        Self { tx, index }
    }

    /// Position of this input within the transaction.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn transaction(&self) -> &'a SignedTransaction {
        self.tx
    }

    fn raw(&self) -> &'a Input {
        &self.tx.tx().inputs[self.index]
    }

    /// Id of the box being spent.
    pub fn box_id(&self) -> BoxId {
        self.raw().box_id
    }

    /// Serialized spending proof.
    pub fn proof_bytes(&self) -> &'a [u8] {
        &self.raw().spending_proof.proof
    }

    /// Context variables handed to the guarding script.
    pub fn context_vars(&self) -> &'a ContextExtension {
        &self.raw().spending_proof.extension
    }
}

impl PartialEq for SignedInput<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.raw() == other.raw()
    }
}

impl Eq for SignedInput<'_> {}

impl fmt::Debug for SignedInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedInput")
            .field("index", &self.index)
            .field("box_id", &self.box_id())
            .field("proof_len", &self.proof_bytes().len())
            .finish()
    }
}
