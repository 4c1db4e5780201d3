//! HTTP client module
//!
//! Hands fully built [`Request`](crate::request::Request)s to `reqwest`.
//!
//! # Features
//!
//! - **Authentication**: Runs authenticators before every attempt
//! - **Default Parameters**: Client-wide headers the request may override
//! - **Body Encoding**: Raw, url-encoded or multipart per content mode
//! - **Automatic Retries**: Configurable retry logic with backoff

mod body;
mod client;

pub use client::{ClientConfig, ClientConfigBuilder, RestClient};
