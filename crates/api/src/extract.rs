//! Request extractors whose rejections use the standard error envelope.

use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::Form;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// `axum::Json` with rejections routed through [`AppError`], so a malformed
/// body answers with the same envelope as every other failure.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl<T: serde::Serialize> IntoResponse for AppJson<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// A request body sent either as JSON or as an urlencoded form.
///
/// Form bodies carry flat fields only; list fields such as `tags` need JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppBody<T>(pub T);

impl<S, T> FromRequest<S> for AppBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state).await?;
            Ok(AppBody(value))
        } else {
            let AppJson(value) = AppJson::<T>::from_request(req, state).await?;
            Ok(AppBody(value))
        }
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}
