//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /login       -> login
/// GET    /logout      -> logout
/// GET    /getuser     -> get_user      (auth)
/// POST   /register    -> register      (only when enabled)
/// ```
pub fn router(allow_registration: bool) -> Router<AppState> {
    let routes = Router::new()
        .route("/login", post(user::login))
        .route("/logout", get(user::logout))
        .route("/getuser", get(user::get_user));

    if allow_registration {
        routes.route("/register", post(user::register))
    } else {
        routes
    }
}
