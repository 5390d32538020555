use std::sync::Arc;

use track1_storage::MediaStore;

use crate::config::ServerConfig;
use crate::services::TrackService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: track1_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Object store used by the upload handlers.
    pub store: Arc<dyn MediaStore>,
    /// Beat and comment business logic.
    pub tracks: Arc<TrackService>,
}
