//! Encoding errors.
//!
//! Every failure this crate can produce is an [`EncodingError`]: either the
//! transaction cannot be expressed in the node-API schema, or the injected
//! tree codec refused to render a script. None of them are retryable; the
//! same input fails the same way every time.

use thiserror::Error;

use crate::script::CodecError;

/// Errors raised while converting a transaction to or from its API form.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// The transaction violates a structural limit of the wire format.
    #[error("malformed transaction: {reason}")]
    Malformed { reason: String },

    /// The tree codec could not render the script of an output.
    #[error("cannot decode ergo tree of output {index}: {source}")]
    ScriptDecode {
        index: usize,
        #[source]
        source: CodecError,
    },

    /// A hex field of an API document is not valid hex (or has the wrong
    /// length for a digest).
    #[error("invalid hex in {field}: {source}")]
    InvalidHex {
        field: String,
        #[source]
        source: hex::FromHexError,
    },

    /// An `additionalRegisters` key is not one of `R4`..`R9`.
    #[error("unknown register {name}")]
    UnknownRegister { name: String },

    /// The `id` of an API document does not match the id recomputed from
    /// its content.
    #[error("transaction ID mismatch: expected {expected}, got {actual}")]
    IdMismatch { expected: String, actual: String },

    /// An output's `boxId`, `transactionId` or `index` disagrees with the box
    /// recomputed from the document.
    #[error("outputs[{index}].{field} mismatch: expected {expected}, got {actual}")]
    OutputMismatch {
        index: usize,
        field: &'static str,
        expected: String,
        actual: String,
    },

    /// `serde_json` failed to produce or parse the document.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EncodingError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_hex(field: impl Into<String>, source: hex::FromHexError) -> Self {
        Self::InvalidHex {
            field: field.into(),
            source,
        }
    }
}
