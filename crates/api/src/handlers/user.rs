//! Handlers for the `/users` resource (login, logout, current user, register).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use showcase_core::fields::non_blank;
use showcase_core::types::DocId;
use showcase_db::models::user::{User, UserInfo};
use showcase_db::repositories::UserRepo;

use crate::auth::cookie::{cleared_cookie, session_cookie};
use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppBody;
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

const MISSING_FIELDS: &str = "Please provide the all fields!";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for login and registration.
#[derive(Debug, Default, Deserialize)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    /// Both fields, or the "all fields" rejection if either is missing or blank.
    fn into_parts(self) -> AppResult<(String, String)> {
        match (non_blank(self.username), non_blank(self.password)) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(AppError::bad_request(MISSING_FIELDS)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserInfo,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct CurrentUser {
    pub success: bool,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    #[serde(rename = "_id")]
    pub id: DocId,
    pub username: String,
    pub token: String,
}

fn issue_token(state: &AppState, user: &User) -> AppResult<String> {
    generate_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/users/login
///
/// Verifies the credentials, sets the `token` cookie, and echoes the token.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppBody(input): AppBody<Credentials>,
) -> AppResult<(StatusCode, CookieJar, Json<LoginResponse>)> {
    let (username, password) = input.into_parts()?;

    let user = UserRepo::find_by_username(&state.store, &username)
        .await?
        .ok_or_else(|| AppError::bad_request("User doesn't exists!"))?;

    let password_valid = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(username = %user.username, "Login rejected: wrong password");
        return Err(AppError::bad_request(
            "Please provide the correct information",
        ));
    }

    let token = issue_token(&state, &user)?;
    let jar = jar.add(session_cookie(token.clone(), &state.config.cookie));

    tracing::info!(user_id = %user.id, "User logged in");
    Ok((
        StatusCode::CREATED,
        jar,
        Json(LoginResponse {
            success: true,
            user: UserInfo::from(&user),
            token,
        }),
    ))
}

/// GET /api/users/logout
///
/// Overwrites the `token` cookie with an expired, empty one.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (StatusCode, CookieJar, Json<MessageResponse>) {
    let jar = jar.add(cleared_cookie(&state.config.cookie));
    (
        StatusCode::CREATED,
        jar,
        Json(MessageResponse::ok("Log out successful!")),
    )
}

/// GET /api/users/getuser
pub async fn get_user(AuthUser(user): AuthUser) -> Json<CurrentUser> {
    Json(CurrentUser {
        success: true,
        user: UserInfo::from(&user),
    })
}

/// POST /api/users/register
///
/// Only mounted when registration is enabled.
pub async fn register(
    State(state): State<AppState>,
    AppBody(input): AppBody<Credentials>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let (username, password) = input.into_parts()?;

    if UserRepo::find_by_username(&state.store, &username)
        .await?
        .is_some()
    {
        return Err(AppError::bad_request("User already exists"));
    }

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = User::new(username, password_hash);

    // A concurrent registration can still win at the unique index; that
    // surfaces as a duplicate-key store error.
    UserRepo::create(&state.store, &user).await?;

    let token = issue_token(&state, &user)?;
    tracing::info!(user_id = %user.id, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id,
            username: user.username,
            token,
        }),
    ))
}
