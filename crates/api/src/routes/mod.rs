pub mod blog_post;
pub mod health;
pub mod project;
pub mod service;
pub mod user;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /projects                 list (public), create, update, delete
/// /projects/{id}            get (public)
/// /blogs                    list (public), create, update, delete
/// /services                 list (public), create, update, delete
/// /users/login              login (public)
/// /users/logout             logout (public)
/// /users/getuser            current account (requires auth)
/// /users/register           register (public, only when enabled)
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/blogs", blog_post::router())
        .nest("/services", service::router())
        .nest("/users", user::router(config.allow_registration))
}
