//! Request extractors that gate handlers.
//!
//! - [`auth::AuthUser`] -- resolves the account from the `token` cookie.

pub mod auth;
