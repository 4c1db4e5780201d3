//! Common types used throughout restreq
//!
//! Shared enums and type aliases used by the request model, the client,
//! and configuration loading.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method. Any standard or extension verb is accepted.
pub use reqwest::Method;

/// Parse a method name, upper-casing it first so `get` and `GET` agree
pub fn parse_method(s: &str) -> Result<Method, String> {
    Method::from_bytes(s.trim().to_ascii_uppercase().as_bytes())
        .map_err(|_| format!("invalid HTTP method '{s}'"))
}

// ============================================================================
// Content Collection Mode
// ============================================================================

/// Selects multipart vs. simple encoding when a request carries a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentCollectionMode {
    /// Never build multipart content
    SimpleEncodingOnly,
    /// Build multipart content whenever a file parameter is present
    #[default]
    MultiPartForFileParameters,
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}
