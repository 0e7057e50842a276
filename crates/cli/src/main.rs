//! `person-service` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`: start the graph + RPC server.
//! - `statements`: print the effective named statements as TOML.
//! - `schema`: print the graph schema.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use db::{MemoryStore, PgStore, Statements, Store};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "person-service",
    about = "Person and address data service over graph and RPC front ends",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the server (graph at /graphql, gRPC on the same port).
    Serve {
        #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
        bind: String,

        #[command(flatten)]
        store: StoreArgs,
    },
    /// Print the named statements after applying overrides.
    Statements {
        /// TOML file overriding some or all statements.
        #[arg(long, env = "STATEMENTS_FILE")]
        statements: Option<PathBuf>,
    },
    /// Print the graph schema definition.
    Schema,
}

#[derive(Args)]
struct StoreArgs {
    #[arg(long, env = "DATABASE_URL", required_unless_present = "in_memory")]
    database_url: Option<String>,

    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 10)]
    max_connections: u32,

    /// TOML file overriding some or all statements.
    #[arg(long, env = "STATEMENTS_FILE")]
    statements: Option<PathBuf>,

    /// Keep everything in process memory instead of Postgres.
    #[arg(long)]
    in_memory: bool,
}

fn load_statements(path: Option<&PathBuf>) -> anyhow::Result<Statements> {
    match path {
        Some(path) => Statements::from_file(path)
            .with_context(|| format!("loading statements from {}", path.display())),
        None => Ok(Statements::default()),
    }
}

async fn open_store(args: StoreArgs) -> anyhow::Result<Arc<dyn Store>> {
    if args.in_memory {
        warn!("Using the in-memory store; data is lost on exit");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let database_url = args
        .database_url
        .context("--database-url is required unless --in-memory is set")?;
    let statements = load_statements(args.statements.as_ref())?;
    let store = PgStore::connect(&database_url, args.max_connections, statements)
        .await
        .context("failed to connect to database")?;
    Ok(Arc::new(store))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { bind, store } => {
            info!("Starting server on {bind}");
            let store = open_store(store).await?;
            api::serve(&bind, api::AppState::new(store)).await?;
        }
        Command::Statements { statements } => {
            let statements = load_statements(statements.as_ref())?;
            print!("{}", statements.to_toml_string()?);
        }
        Command::Schema => {
            print!("{}", graph::sdl());
        }
    }

    Ok(())
}
