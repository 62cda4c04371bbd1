//! Execution context.
//!
//! A [`BlockchainContext`] carries what the views need but the transaction
//! does not: the encoder configuration shared with the rest of the client,
//! the tree codec used for pretty-printing, and the chain height that
//! context-dependent box properties are measured against.
//!
//! Contexts are built once and shared behind an `Arc`.

use std::fmt;
use std::sync::Arc;

use crate::api::json::JsonEncoder;
use crate::script::{ErgoTreeCodec, P2pkTreeCodec};

/// Shared, read-only execution context.
pub struct BlockchainContext {
    height: u32,
    json_encoder: JsonEncoder,
    tree_codec: Arc<dyn ErgoTreeCodec>,
}

impl BlockchainContext {
    /// Starts a builder with compact JSON, the P2PK codec and height 0.
    pub fn builder() -> BlockchainContextBuilder {
        BlockchainContextBuilder::default()
    }

    /// Current chain height as known to the client.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The encoder the API client uses for compact documents.
    pub fn json_encoder(&self) -> &JsonEncoder {
        &self.json_encoder
    }

    pub fn tree_codec(&self) -> &dyn ErgoTreeCodec {
        self.tree_codec.as_ref()
    }
}

impl Default for BlockchainContext {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for BlockchainContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockchainContext")
            .field("height", &self.height)
            .field("json_encoder", &self.json_encoder)
            .finish_non_exhaustive()
    }
}

/// Fluent builder for [`BlockchainContext`].
pub struct BlockchainContextBuilder {
    height: u32,
    json_encoder: JsonEncoder,
    tree_codec: Arc<dyn ErgoTreeCodec>,
}

impl Default for BlockchainContextBuilder {
    fn default() -> Self {
        Self {
            height: 0,
            json_encoder: JsonEncoder::compact(),
            tree_codec: Arc::new(P2pkTreeCodec),
        }
    }
}

impl BlockchainContextBuilder {
    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// Replaces the shared encoder used on the compact path.
    pub fn json_encoder(mut self, encoder: JsonEncoder) -> Self {
        self.json_encoder = encoder;
        self
    }

    /// Injects the tree codec used when pretty-printing scripts.
    pub fn tree_codec(mut self, codec: Arc<dyn ErgoTreeCodec>) -> Self {
        self.tree_codec = codec;
        self
    }

    pub fn build(self) -> BlockchainContext {
        BlockchainContext {
            height: self.height,
            json_encoder: self.json_encoder,
            tree_codec: self.tree_codec,
        }
    }
}
