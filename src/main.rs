use std::sync::Arc;

use tracing::{info, warn};

use cirrus::file::{BlobStore, HttpBlobStore, MemoryBlobStore};
use cirrus::{Config, Database, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration. The signing secret is mandatory, so a bad config
    // means the process cannot serve requests at all.
    let config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            std::process::exit(1);
        }
    };

    // Initialize logging
    if let Err(e) = cirrus::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        cirrus::logging::init_console_only(&config.logging.level);
    }

    info!("Cirrus - Personal Cloud Storage");

    let db = match Database::open(&config.database.path).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to open database: {e}");
            std::process::exit(1);
        }
    };

    let storage: Arc<dyn BlobStore> = match &config.storage.endpoint {
        Some(endpoint) => {
            info!("Using blob store at {}", endpoint);
            match HttpBlobStore::new(endpoint, &config.storage.api_key, &config.storage.folder) {
                Ok(store) => Arc::new(store),
                Err(e) => {
                    eprintln!("Failed to configure blob store: {e}");
                    std::process::exit(1);
                }
            }
        }
        None => {
            warn!("No storage endpoint configured; using in-memory blob store");
            Arc::new(MemoryBlobStore::new())
        }
    };

    let server = match WebServer::new(&config, db, storage) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("Failed to start server: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }
}
