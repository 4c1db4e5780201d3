//! Body serializers
//!
//! A [`Serializer`] turns structured body parameters into bytes. The request
//! only carries the strategy; the client invokes it while encoding the body.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use std::fmt;

/// Strategy that serializes structured body values
pub trait Serializer: Send + Sync + fmt::Debug {
    /// Content type sent alongside the serialized bytes
    fn content_type(&self) -> &str;

    /// Serialize a value to bytes
    fn serialize(&self, value: &JsonValue) -> Result<Vec<u8>>;
}

/// JSON serializer (the default for every request)
#[derive(Debug, Clone, Default)]
pub struct JsonSerializer {
    pretty: bool,
}

impl JsonSerializer {
    /// Create a compact JSON serializer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a serializer emitting indented JSON
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Serializer for JsonSerializer {
    fn content_type(&self) -> &str {
        "application/json"
    }

    fn serialize(&self, value: &JsonValue) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        };
        bytes.map_err(|e| Error::Serialize {
            content_type: self.content_type().to_string(),
            message: e.to_string(),
        })
    }
}
