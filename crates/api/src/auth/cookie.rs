//! The `token` session cookie.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::{Duration, OffsetDateTime};

/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Default cookie lifetime in days.
pub const DEFAULT_LIFETIME_DAYS: i64 = 90;

/// Longest accepted cookie lifetime in days.
pub const MAX_LIFETIME_DAYS: i64 = 10 * 365;

#[derive(Debug, Clone)]
pub struct CookieConfig {
    /// Set the `Secure` attribute (production only).
    pub secure: bool,
    pub lifetime_days: i64,
}

/// Build the cookie set on successful login.
pub fn session_cookie(token: String, config: &CookieConfig) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure)
        .expires(OffsetDateTime::now_utc() + Duration::days(config.lifetime_days))
        .build()
}

/// Build the cookie that overwrites and expires the session on logout.
pub fn cleared_cookie(config: &CookieConfig) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure)
        .expires(OffsetDateTime::now_utc())
        .max_age(Duration::ZERO)
        .build()
}
