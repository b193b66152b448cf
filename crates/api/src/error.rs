use std::any::Any;

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use showcase_core::error::CoreError;
use showcase_db::StoreError;
use showcase_media::MediaError;

/// Message sent for every failure that must not leak detail to the client.
pub const INTERNAL_MESSAGE: &str = "Internal server Error";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and the store and media crate
/// errors. Implements [`IntoResponse`] to produce the
/// `{ "success": false, "message": ... }` envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `showcase_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A document store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A media host failure while uploading.
    #[error(transparent)]
    Media(#[from] MediaError),

    /// The request body was not valid JSON for the target type.
    #[error(transparent)]
    Json(#[from] JsonRejection),

    /// The request body was not a valid urlencoded form for the target type.
    #[error(transparent)]
    Form(#[from] FormRejection),

    /// An internal error; the message is logged, never sent.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// The session gate's rejection for a request without a usable session.
    pub fn login_required() -> Self {
        AppError::Core(CoreError::Unauthenticated(
            "Please login to continue".into(),
        ))
    }

    /// A 400 carrying `message` verbatim.
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::Core(CoreError::Validation(message.into()))
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, core.to_string()),
                CoreError::Unauthenticated(_) => (StatusCode::UNAUTHORIZED, core.to_string()),
                CoreError::Validation(_)
                | CoreError::Conflict { .. }
                | CoreError::InvalidId { .. }
                | CoreError::InvalidCredential
                | CoreError::ExpiredCredential => (StatusCode::BAD_REQUEST, core.to_string()),
            },

            // --- Store errors ---
            AppError::Store(StoreError::DuplicateKey { field }) => (
                StatusCode::BAD_REQUEST,
                CoreError::Conflict {
                    field: field.clone(),
                }
                .to_string(),
            ),
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.into())
            }

            // --- HTTP-specific errors ---
            AppError::Media(err) => {
                tracing::warn!(error = %err, "Media upload failed");
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            // Body rejections keep their own status (413 over the size cap,
            // 415 on a wrong content type).
            AppError::Json(rejection) => (rejection.status(), rejection.body_text()),
            AppError::Form(rejection) => (rejection.status(), rejection.body_text()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.into())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let body = json!({
            "success": false,
            "message": message,
        });
        (status, axum::Json(body)).into_response()
    }
}

/// Turn a handler panic into the standard 500 envelope.
///
/// Installed through `CatchPanicLayer::custom`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    AppError::InternalError(format!("Handler panicked: {detail}")).into_response()
}
