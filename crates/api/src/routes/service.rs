//! Route definitions for the `/services` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::service;
use crate::state::AppState;

/// Routes mounted at `/services`.
///
/// ```text
/// GET    /            -> list
/// POST   /create      -> create        (auth)
/// PUT    /{id}        -> update        (auth)
/// DELETE /{id}        -> delete        (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(service::list))
        .route("/create", post(service::create))
        .route("/{id}", put(service::update).delete(service::delete))
}
