//! Route definitions for the `/projects` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /            -> list
/// POST   /create      -> create        (auth)
/// GET    /{id}        -> get_by_id
/// PUT    /{id}        -> update        (auth)
/// DELETE /{id}        -> delete        (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list))
        .route("/create", post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
}
