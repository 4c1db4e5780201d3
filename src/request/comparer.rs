//! Parameter name comparison policy

use serde::{Deserialize, Serialize};

/// How parameter names are matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameComparer {
    /// Exact byte comparison
    #[default]
    Ordinal,
    /// ASCII case-insensitive comparison
    OrdinalIgnoreCase,
}

impl NameComparer {
    /// Pick the request-level override if set, otherwise the client default
    pub fn resolve(request: Option<NameComparer>, client_default: NameComparer) -> NameComparer {
        request.unwrap_or(client_default)
    }

    /// Whether two names are equal under this policy
    pub fn matches(self, a: &str, b: &str) -> bool {
        match self {
            NameComparer::Ordinal => a == b,
            NameComparer::OrdinalIgnoreCase => a.eq_ignore_ascii_case(b),
        }
    }
}
