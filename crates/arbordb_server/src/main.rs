//! ArborDB server binary.
//!
//! # Commands
//!
//! - `serve` - Run the HTTP API over a memory or file store
//! - `seed` - Insert a fixture key sequence through the engine

use arbordb_engine::{EngineError, NodeKey, TreeEngine};
use arbordb_format::{render_label, Locale};
use arbordb_server::{router, AppState, ServerConfig};
use arbordb_store::{FileStore, MemoryStore, RecordStore, StoreError};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// The canonical fixture sequence: a root, two full levels, and a third
/// level of leaves.
const FIXTURE_KEYS: [i64; 15] = [
    50, 30, 70, 20, 40, 60, 80, 10, 25, 35, 45, 55, 65, 75, 85,
];

/// ArborDB tree server and tools.
#[derive(Parser)]
#[command(name = "arbordb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1:3000")]
        bind: SocketAddr,

        /// Directory for the on-disk store (defaults to in-memory)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Enable destructive development routes
        #[arg(long)]
        dev: bool,
    },

    /// Seed a store with a fixture tree
    Seed {
        /// Directory for the on-disk store (defaults to in-memory)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Key to insert, in order; repeatable (defaults to the canonical
        /// fixture sequence)
        #[arg(long = "key")]
        keys: Vec<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("arbordb=info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Serve {
            bind,
            data_dir,
            dev,
        } => serve(bind, data_dir, dev).await,
        Commands::Seed { data_dir, keys } => seed(data_dir, &keys),
    }
}

async fn serve(
    bind: SocketAddr,
    data_dir: Option<PathBuf>,
    dev: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ServerConfig::new(bind).with_dev_routes(dev);
    if let Some(dir) = &data_dir {
        config = config.with_data_dir(dir);
    }

    let store = open_store(data_dir.as_deref())?;
    let state = AppState {
        engine: Arc::new(TreeEngine::new(store)),
        config: Arc::new(config),
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(%bind, dev, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn seed(data_dir: Option<PathBuf>, keys: &[i64]) -> Result<(), Box<dyn std::error::Error>> {
    let keys = if keys.is_empty() {
        FIXTURE_KEYS.to_vec()
    } else {
        keys.to_vec()
    };

    if data_dir.is_none() {
        tracing::warn!("no --data-dir given; the seeded store ends with this process");
    }

    let store = open_store(data_dir.as_deref())?;
    let engine = TreeEngine::new(store);

    for key in keys {
        let node_key = NodeKey::new(key);
        let label = render_label(node_key, Locale::En);
        match engine.insert(node_key, label) {
            Ok(inserted) => {
                tracing::info!(key, parent = ?inserted.parent_key, "seeded");
            }
            Err(EngineError::KeyConflict { .. }) => {
                tracing::warn!(key, "key already present, skipping");
            }
            Err(err) => return Err(err.into()),
        }
    }

    tracing::info!(total = engine.node_count()?, "seeding complete");
    Ok(())
}

fn open_store(data_dir: Option<&Path>) -> Result<Arc<dyn RecordStore>, StoreError> {
    match data_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            Ok(Arc::new(FileStore::open(dir)?))
        }
        None => Ok(Arc::new(MemoryStore::new())),
    }
}
