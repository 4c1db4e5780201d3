//! Authentication module
//!
//! Supports: Basic, Bearer, API Key, Custom Headers
//!
//! Every authenticator implements the [`Authenticator`] trait and only ever
//! adds parameters that are missing, so applying one repeatedly (or after a
//! different authenticator) never duplicates or overwrites credentials.

mod authenticator;
mod basic;
mod strategies;
mod types;

pub use authenticator::{ensure_header, ensure_parameter, Authenticator, AUTHORIZATION};
pub use basic::HttpBasicAuthenticator;
pub use strategies::{ApiKeyAuthenticator, BearerAuthenticator, HeadersAuthenticator};
pub use types::{AuthConfig, Location};

#[cfg(test)]
mod tests;
