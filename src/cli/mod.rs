//! CLI module
//!
//! Command-line interface for building and sending requests.
//!
//! # Commands
//!
//! - `send` - Execute a request and print the response
//! - `prepare` - Print the encoded wire request without sending it

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, RequestArgs};
pub use runner::Runner;
