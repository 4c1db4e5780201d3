//! Request model
//!
//! A [`Request`] is an ordered collection of [`Parameter`]s plus method,
//! resource, serializer, credentials and content collection mode. It is the
//! unit authenticators mutate and the client later encodes and sends.

mod comparer;
mod parameter;
mod types;

pub use comparer::NameComparer;
pub use parameter::{Parameter, ParameterKind, ParameterValue};
pub use types::{NetworkCredential, Request};

#[cfg(test)]
mod tests;
