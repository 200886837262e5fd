//! CLI argument definitions using clap
//!
//! Commands:
//! - trivia-api serve [--host <h>] [--port <p>] [--db <path>]
//! - trivia-api seed --db <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Trivia API - REST backend for a trivia application
#[derive(Parser, Debug)]
#[command(name = "trivia-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the trivia API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to bind to
        #[arg(long, default_value_t = 5000)]
        port: u16,

        /// SQLite database file; omit for an in-memory database
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Create the schema and install the default categories
    Seed {
        /// SQLite database file
        #[arg(long)]
        db: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["trivia-api", "serve"]).unwrap();
        match cli.command {
            Command::Serve { host, port, db } => {
                assert_eq!(host, "0.0.0.0");
                assert_eq!(port, 5000);
                assert!(db.is_none());
            }
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn test_parse_seed_requires_db() {
        assert!(Cli::try_parse_from(["trivia-api", "seed"]).is_err());
        let cli = Cli::try_parse_from(["trivia-api", "seed", "--db", "trivia.db"]).unwrap();
        match cli.command {
            Command::Seed { db } => assert_eq!(db, PathBuf::from("trivia.db")),
            _ => panic!("expected seed command"),
        }
    }
}
