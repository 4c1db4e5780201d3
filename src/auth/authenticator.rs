//! The authenticator contract
//!
//! An [`Authenticator`] mutates a [`Request`] in place before it is sent.
//! Implementations must be idempotent: the client re-runs every
//! authenticator before each attempt (retries, credential challenges), so a
//! second pass over an already authenticated request has to be a no-op.

use crate::http::RestClient;
use crate::request::{Parameter, ParameterKind, Request};
use tracing::trace;

/// Name of the header every built-in credential scheme writes
pub const AUTHORIZATION: &str = "Authorization";

/// Adds authentication evidence to a request
pub trait Authenticator: Send + Sync {
    /// Modify `request` so the authentication requirements are met.
    ///
    /// Never fails: rejected credentials surface when the request executes.
    fn authenticate(&self, client: &RestClient, request: &mut Request);
}

impl<A: Authenticator + ?Sized> Authenticator for Box<A> {
    fn authenticate(&self, client: &RestClient, request: &mut Request) {
        (**self).authenticate(client, request);
    }
}

impl<A: Authenticator + ?Sized> Authenticator for std::sync::Arc<A> {
    fn authenticate(&self, client: &RestClient, request: &mut Request) {
        (**self).authenticate(client, request);
    }
}

/// Add a header parameter unless one with the same name already exists.
///
/// Names are compared ASCII case-insensitively across all parameter kinds.
/// `value` only runs when the header is actually added. Returns whether the
/// request was modified.
pub fn ensure_header<F>(request: &mut Request, name: &str, value: F) -> bool
where
    F: FnOnce() -> String,
{
    if request.has_parameter_named(name) {
        trace!(header = name, "header already present, leaving request untouched");
        return false;
    }
    request.push_parameter(Parameter::header(name, value()));
    true
}

/// Add a parameter of `kind` unless one with a matching name and the same
/// kind already exists under the request's resolved comparer.
pub fn ensure_parameter<F>(
    client: &RestClient,
    request: &mut Request,
    name: &str,
    kind: ParameterKind,
    value: F,
) -> bool
where
    F: FnOnce() -> String,
{
    let comparer = client.parameter_name_comparer_for(request);
    if request.has_parameter(name, kind, comparer) {
        trace!(parameter = name, %kind, "parameter already present, leaving request untouched");
        return false;
    }
    request.add_parameter(name, value(), kind);
    true
}
