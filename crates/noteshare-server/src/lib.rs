//! noteshare-server: HTTP API server for noteshare
//!
//! This crate provides:
//! - REST endpoints for listing, creating, editing, deleting and sharing notes
//! - JSON error responses mapped from the access-controlled store
//! - Request IDs, tracing and CORS middleware
//!
//! # Usage
//!
//! ```rust,ignore
//! use noteshare_server::{config::ServerConfig, connect_notes, middleware, routes, AppState};
//!
//! let config = ServerConfig::from_env()?;
//! let notes = connect_notes(&config).await?;
//! let router = routes::build_router(AppState::new(notes, config.clone()));
//! let app = middleware::apply(router, &config)?;
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

use std::sync::Arc;

use noteshare_core::AccessPolicy;
use noteshare_store::{
    AccessControlledNoteStore, DocumentStore, MemoryStore, PgStore, StoreConfig, StoreResult,
};

// Re-exports for convenience
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

// Re-export dependent crates
pub use noteshare_core;
pub use noteshare_store;

/// Build the access-controlled store described by `config`.
///
/// Connects to PostgreSQL when `database_url` is set, otherwise keeps notes
/// in memory for the lifetime of the process.
pub async fn connect_notes(config: &ServerConfig) -> StoreResult<AccessControlledNoteStore> {
    let backend: Arc<dyn DocumentStore> = match &config.database_url {
        Some(url) => Arc::new(PgStore::connect(StoreConfig::from_url(url.clone())).await?),
        None => {
            tracing::warn!("DATABASE_URL not set, notes are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    Ok(AccessControlledNoteStore::new(backend)
        .with_policy(AccessPolicy {
            delete: config.delete_policy,
        })
        .with_timeout(config.store_timeout))
}
