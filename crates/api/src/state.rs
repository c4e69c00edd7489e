use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted and the config sits
/// behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: foodgram_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractors).
    pub config: Arc<ServerConfig>,
}
