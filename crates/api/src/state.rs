use std::sync::Arc;
use std::time::Duration;

use inventory_core::rate_limit::FixedWindowLimiter;
use tokio::sync::Mutex;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: inventory_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Per-client limiter for category writes.
    pub write_limiter: Arc<Mutex<FixedWindowLimiter>>,
}

impl AppState {
    pub fn new(pool: inventory_db::DbPool, config: ServerConfig) -> Self {
        let limiter = FixedWindowLimiter::new(
            config.write_rate_limit,
            Duration::from_secs(config.write_rate_window_secs),
        );
        Self {
            pool,
            config: Arc::new(config),
            write_limiter: Arc::new(Mutex::new(limiter)),
        }
    }
}
