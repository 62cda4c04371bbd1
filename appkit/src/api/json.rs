//! JSON encoder configuration.
//!
//! One [`JsonEncoder`] is shared through the
//! [`BlockchainContext`](crate::BlockchainContext) so that every document a
//! client emits is formatted the same way. Pretty output gets its own
//! encoder built on demand.

use serde::ser::Error as _;
use serde::Serialize;
use serde_json::ser::{CompactFormatter, PrettyFormatter, Serializer};

use crate::config::DEFAULT_PRETTY_INDENT;

/// Output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonFormat {
    /// Single line, no insignificant whitespace.
    Compact,
    /// Multi-line, indented by `indent` spaces per level.
    Pretty { indent: usize },
}

/// Serializes values to JSON text in a fixed layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonEncoder {
    format: JsonFormat,
}

impl JsonEncoder {
    pub fn compact() -> Self {
        Self {
            format: JsonFormat::Compact,
        }
    }

    /// Pretty encoder with the default indentation.
    pub fn pretty() -> Self {
        Self::with_indent(DEFAULT_PRETTY_INDENT)
    }

    pub fn with_indent(indent: usize) -> Self {
        Self {
            format: JsonFormat::Pretty { indent },
        }
    }

    pub fn format(&self) -> JsonFormat {
        self.format
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self.format, JsonFormat::Pretty { .. })
    }

    /// Serializes `value` to a string.
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, serde_json::Error> {
        let mut buf = Vec::with_capacity(512);
        match self.format {
            JsonFormat::Compact => {
                let mut ser = Serializer::with_formatter(&mut buf, CompactFormatter);
                value.serialize(&mut ser)?;
            }
            JsonFormat::Pretty { indent } => {
                let indent = vec![b' '; indent];
                let mut ser =
                    Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
                value.serialize(&mut ser)?;
            }
        }
        String::from_utf8(buf).map_err(serde_json::Error::custom)
    }
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::compact()
    }
}
