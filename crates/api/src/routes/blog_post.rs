//! Route definitions for the `/blogs` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::blog_post;
use crate::state::AppState;

/// Routes mounted at `/blogs`.
///
/// ```text
/// GET    /            -> list
/// POST   /create      -> create        (auth)
/// PUT    /{id}        -> update        (auth)
/// DELETE /{id}        -> delete        (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(blog_post::list))
        .route("/create", post(blog_post::create))
        .route("/{id}", put(blog_post::update).delete(blog_post::delete))
}
