//! Request parameters
//!
//! A [`Parameter`] is a named value tagged with the part of the wire request
//! it ends up in. Parameters are immutable once built.

use crate::types::JsonValue;
use bytes::Bytes;
use std::borrow::Cow;
use std::fmt;

/// Destination of a parameter in the wire request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    /// Appended to the query string
    Query,
    /// Field of an `application/x-www-form-urlencoded` (or multipart) body
    UrlEncodedBody,
    /// The raw request body, serialized by the request serializer
    RequestBody,
    /// File part of a multipart body
    File,
    /// Wire header, attached verbatim
    HttpHeader,
    /// Replaces `{name}` in the resource path
    UrlSegment,
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParameterKind::Query => "query",
            ParameterKind::UrlEncodedBody => "url_encoded_body",
            ParameterKind::RequestBody => "request_body",
            ParameterKind::File => "file",
            ParameterKind::HttpHeader => "http_header",
            ParameterKind::UrlSegment => "url_segment",
        };
        f.write_str(name)
    }
}

/// Value carried by a parameter
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    /// Plain text
    Text(String),
    /// Structured value (scalars render as text, objects go through a serializer)
    Json(JsonValue),
    /// Raw bytes
    Bytes(Bytes),
    /// File payload
    File {
        /// File name sent in the multipart part
        file_name: String,
        /// MIME type, `application/octet-stream` when unset
        content_type: Option<String>,
        /// File contents
        data: Bytes,
    },
}

impl ParameterValue {
    /// Text rendering for query strings, form fields, headers and segments.
    ///
    /// Byte and file payloads have no text form.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            ParameterValue::Text(s) => Some(Cow::Borrowed(s)),
            ParameterValue::Json(JsonValue::String(s)) => Some(Cow::Borrowed(s)),
            ParameterValue::Json(JsonValue::Null) => Some(Cow::Borrowed("")),
            ParameterValue::Json(v) => Some(Cow::Owned(v.to_string())),
            ParameterValue::Bytes(_) | ParameterValue::File { .. } => None,
        }
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::Text(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Text(value.to_string())
    }
}

impl From<&String> for ParameterValue {
    fn from(value: &String) -> Self {
        ParameterValue::Text(value.clone())
    }
}

impl From<JsonValue> for ParameterValue {
    fn from(value: JsonValue) -> Self {
        ParameterValue::Json(value)
    }
}

impl From<Bytes> for ParameterValue {
    fn from(value: Bytes) -> Self {
        ParameterValue::Bytes(value)
    }
}

impl From<Vec<u8>> for ParameterValue {
    fn from(value: Vec<u8>) -> Self {
        ParameterValue::Bytes(Bytes::from(value))
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Json(JsonValue::Bool(value))
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Json(JsonValue::from(value))
    }
}

impl From<u64> for ParameterValue {
    fn from(value: u64) -> Self {
        ParameterValue::Json(JsonValue::from(value))
    }
}

impl From<i32> for ParameterValue {
    fn from(value: i32) -> Self {
        ParameterValue::Json(JsonValue::from(value))
    }
}

/// A single named value destined for a specific part of the request
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    value: ParameterValue,
    kind: ParameterKind,
}

impl Parameter {
    /// Create a new parameter
    pub fn new(
        name: impl Into<String>,
        value: impl Into<ParameterValue>,
        kind: ParameterKind,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind,
        }
    }

    /// Create a header parameter
    pub fn header(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, value.into(), ParameterKind::HttpHeader)
    }

    /// Create a query parameter
    pub fn query(name: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        Self::new(name, value, ParameterKind::Query)
    }

    /// Create a file parameter
    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: Option<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self::new(
            name,
            ParameterValue::File {
                file_name: file_name.into(),
                content_type,
                data: data.into(),
            },
            ParameterKind::File,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &ParameterValue {
        &self.value
    }

    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    /// Shorthand for `value().as_text()`
    pub fn text(&self) -> Option<Cow<'_, str>> {
        self.value.as_text()
    }
}
