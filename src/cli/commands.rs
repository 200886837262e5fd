//! CLI command implementations

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use super::args::{Cli, Command};
use super::errors::CliResult;
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::store::{seed_default_categories, SqliteTriviaStore, TriviaStore};

/// Parse arguments and dispatch
pub async fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command).await
}

/// Execute a single CLI command
pub async fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { host, port, db } => serve(host, port, db).await,
        Command::Seed { db } => seed(&db),
    }
}

async fn serve(host: String, port: u16, db: Option<PathBuf>) -> CliResult<()> {
    init_tracing();

    let store: Arc<dyn TriviaStore> = match &db {
        Some(path) => Arc::new(SqliteTriviaStore::open(path)?),
        None => {
            tracing::warn!("no --db given, running against an in-memory database");
            Arc::new(SqliteTriviaStore::open_in_memory()?)
        }
    };

    let config = HttpServerConfig {
        host,
        port,
        database_path: db,
        ..Default::default()
    };
    HttpServer::new(config, store).start().await?;
    Ok(())
}

fn seed(db: &Path) -> CliResult<()> {
    let store = SqliteTriviaStore::open(db)?;
    let added = seed_default_categories(&store)?;
    if added == 0 {
        println!("Categories already present, nothing to do");
    } else {
        println!("Seeded {} categories", added);
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).try_init().ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_command_creates_categories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trivia.db");

        run_command(Command::Seed { db: path.clone() }).await.unwrap();

        let store = SqliteTriviaStore::open(&path).unwrap();
        assert_eq!(store.categories().unwrap().len(), 6);

        // Re-running leaves the store untouched
        run_command(Command::Seed { db: path.clone() }).await.unwrap();
        let store = SqliteTriviaStore::open(&path).unwrap();
        assert_eq!(store.categories().unwrap().len(), 6);
    }
}
