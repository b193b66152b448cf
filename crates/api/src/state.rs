use std::sync::Arc;

use showcase_db::DbStore;
use showcase_media::SharedUploader;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Document store backend.
    pub store: DbStore,
    /// Media host client for image and document uploads.
    pub media: SharedUploader,
    pub config: Arc<ServerConfig>,
}
