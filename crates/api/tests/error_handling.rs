//! Tests for the error envelope: `AppError` → HTTP response mapping, plus the
//! routing-level failures (bad ids, bad JSON, panics) that share it.

mod common;

use axum::body::Body;
use axum::http::{header, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use common::{body_json, build_test_app, expect_error, request};
use http_body_util::BodyExt;
use showcase_api::error::{handle_panic, AppError};
use showcase_core::error::CoreError;
use showcase_db::StoreError;
use showcase_media::MediaError;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;

/// Convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Normalizer mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Core(CoreError::NotFound {
        entity: "Project",
    }))
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json,
        serde_json::json!({ "success": false, "message": "Project not found" })
    );
}

#[tokio::test]
async fn invalid_id_returns_400() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::InvalidId { field: "_id" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Resource not found with this id. Invalid _id");
}

#[tokio::test]
async fn duplicate_key_from_store_returns_400() {
    let (status, json) = error_to_response(AppError::Store(StoreError::DuplicateKey {
        field: "username".into(),
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Duplicate key username entered");
}

#[tokio::test]
async fn unauthenticated_returns_401() {
    let (status, json) = error_to_response(AppError::login_required()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Please login to continue");
}

#[tokio::test]
async fn credential_failures_return_400() {
    let (status, json) = error_to_response(AppError::Core(CoreError::InvalidCredential)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Your URL is invalid. Please try again later.");

    let (status, json) = error_to_response(AppError::Core(CoreError::ExpiredCredential)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Your URL has expired. Please try again later.");
}

#[tokio::test]
async fn media_failure_returns_400_with_host_message() {
    let (status, json) = error_to_response(AppError::Media(MediaError::Rejected {
        status: 400,
        message: "Invalid image file".into(),
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid image file");
}

#[tokio::test]
async fn bad_request_keeps_its_message() {
    let (status, json) = error_to_response(AppError::bad_request("User already exists")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "User already exists");
}

#[tokio::test]
async fn internal_error_is_sanitized() {
    let (status, json) =
        error_to_response(AppError::InternalError("secret database credentials".into())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "Internal server Error");
}

#[tokio::test]
async fn store_backend_error_is_sanitized() {
    let (status, json) = error_to_response(AppError::Store(StoreError::UnsupportedUrl(
        "mongodb".into(),
    )))
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "Internal server Error");
}

// ---------------------------------------------------------------------------
// Routing-level failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_id_is_a_cast_failure() {
    let t = build_test_app();

    let response = t.get("/api/projects/not-a-uuid").await;

    let message = expect_error(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(message, "Resource not found with this id. Invalid _id");
}

#[tokio::test]
async fn malformed_json_uses_the_envelope() {
    let t = build_test_app();
    let cookie = t.session_cookie().await;

    let mut req = request(Method::POST, "/api/projects/create", Some(&cookie), None);
    req.headers_mut()
        .insert(header::CONTENT_TYPE, "application/json".parse().unwrap());
    *req.body_mut() = Body::from("{ not json");

    let response = t.send(req).await;

    expect_error(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn body_over_the_cap_is_413() {
    let t = build_test_app();
    let cookie = t.session_cookie().await;
    // The test config caps bodies at 1 MiB.
    let oversized = "x".repeat(2 * 1024 * 1024);

    let response = t
        .post_json_auth(
            "/api/projects/create",
            &cookie,
            serde_json::json!({ "name": oversized }),
        )
        .await;

    expect_error(response, StatusCode::PAYLOAD_TOO_LARGE).await;
    assert!(t.media.uploaded().is_empty());
}

#[tokio::test]
async fn body_under_the_cap_is_admitted() {
    let t = build_test_app();
    let cookie = t.session_cookie().await;
    let content = "x".repeat(512 * 1024);

    let response = t
        .post_json_auth(
            "/api/projects/create",
            &cookie,
            serde_json::json!({
                "name": "Atlas",
                "category": "Web",
                "description": "A mapping tool",
                "content": content,
                "mainImage": "cover.png",
                "images": ["one.png"],
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn unsupported_content_type_is_415() {
    let t = build_test_app();
    let cookie = t.session_cookie().await;

    let mut req = request(Method::POST, "/api/projects/create", Some(&cookie), None);
    req.headers_mut()
        .insert(header::CONTENT_TYPE, "text/plain".parse().unwrap());
    *req.body_mut() = Body::from("name=Atlas");

    let response = t.send(req).await;

    expect_error(response, StatusCode::UNSUPPORTED_MEDIA_TYPE).await;
}

#[tokio::test]
async fn panicking_handler_returns_500_envelope() {
    async fn boom() -> &'static str {
        panic!("handler exploded")
    }
    let app = Router::new()
        .route("/boom", get(boom))
        .layer(CatchPanicLayer::custom(handle_panic));

    let response = app
        .oneshot(request(Method::GET, "/boom", None, None))
        .await
        .unwrap();

    let message = expect_error(response, StatusCode::INTERNAL_SERVER_ERROR).await;
    assert_eq!(message, "Internal server Error");
}

// ---------------------------------------------------------------------------
// Root routes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn root_banner_and_health() {
    let t = build_test_app();

    let response = t.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"Hello World!");

    let json = body_json(t.get("/health").await).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["storeHealthy"], true);
}

#[tokio::test]
async fn list_routes_accept_a_trailing_slash() {
    let t = build_test_app();

    for (uri, key) in [
        ("/api/projects/", "projects"),
        ("/api/blogs/", "blogPosts"),
        ("/api/services/", "services"),
    ] {
        let response = t.get(uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert!(json[key].is_array(), "{uri}");
    }

    let response = t.get("/health/").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn trailing_slash_on_a_protected_route_still_hits_the_gate() {
    let t = build_test_app();

    let response = t
        .post_json("/api/projects/create/", serde_json::json!({ "name": "Atlas" }))
        .await;

    expect_error(response, StatusCode::UNAUTHORIZED).await;
}
