use std::sync::Arc;

use waymark_core::integrity::IntegrityService;

use crate::config::ServerConfig;
use crate::integrity::PgReferenceStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: waymark_db::DbPool,
    /// Server configuration (JWT settings are read by auth handlers and middleware).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Integrity rules bound to this state's pool.
    pub fn integrity(&self) -> IntegrityService<PgReferenceStore> {
        IntegrityService::new(PgReferenceStore::new(self.pool.clone()))
    }
}
