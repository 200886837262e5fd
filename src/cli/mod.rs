//! CLI module for the trivia API
//!
//! Provides command-line interface for:
//! - serve: Open the store and run the HTTP server
//! - seed: Create the schema and install the default categories

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{run, run_command};
pub use errors::{CliError, CliResult};
