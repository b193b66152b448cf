//! Cookie-session authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use showcase_db::models::user::User;
use showcase_db::repositories::UserRepo;

use crate::auth::cookie::TOKEN_COOKIE;
use crate::auth::jwt::{credential_error, validate_token};
use crate::error::AppError;
use crate::state::AppState;

/// The account behind the request's `token` cookie.
///
/// Declaring it as a handler parameter gates the handler:
///
/// ```ignore
/// async fn my_handler(AuthUser(user): AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// Rejections:
/// - no cookie, or an empty one: 401 "Please login to continue"
/// - expired token: 400
/// - any other bad token: 400
/// - token for an account that no longer exists: 401
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(TOKEN_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(AppError::login_required)?;

        let claims = validate_token(&token, &state.config.jwt)
            .map_err(|e| AppError::Core(credential_error(&e)))?;

        let user = UserRepo::find_by_id(&state.store, claims.sub)
            .await?
            .ok_or_else(|| {
                tracing::warn!(user_id = %claims.sub, "Valid token for a missing account");
                AppError::login_required()
            })?;

        Ok(AuthUser(user))
    }
}
