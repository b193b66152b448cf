#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, HeaderValue, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use tower::ServiceExt;

use showcase_api::auth::cookie::CookieConfig;
use showcase_api::auth::jwt::{generate_token, Claims, JwtConfig};
use showcase_api::auth::password::hash_password;
use showcase_api::config::ServerConfig;
use showcase_api::router::build_app_router;
use showcase_api::state::AppState;
use showcase_db::memory::MemoryDocumentStore;
use showcase_db::models::user::User;
use showcase_db::repositories::UserRepo;
use showcase_db::DbStore;
use showcase_media::cloudinary::CloudinaryConfig;
use showcase_media::{MediaError, MediaUploader, UploadOptions, UploadedAsset};

pub const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(allow_registration: bool) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        body_limit_bytes: 1024 * 1024,
        database_url: "memory://".to_string(),
        allow_registration,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            expiry_secs: 3600,
        },
        cookie: CookieConfig {
            secure: false,
            lifetime_days: 90,
        },
        media: CloudinaryConfig {
            cloud_name: "test".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            timeout_secs: 5,
        },
    }
}

// ---------------------------------------------------------------------------
// Fake media host
// ---------------------------------------------------------------------------

/// Records every upload and destroy. Sources containing `"fail"` are
/// rejected the way the media host rejects an unreadable file.
#[derive(Default)]
pub struct FakeUploader {
    pub uploaded: Mutex<Vec<String>>,
    pub destroyed: Mutex<Vec<String>>,
}

impl FakeUploader {
    pub fn uploaded(&self) -> Vec<String> {
        self.uploaded.lock().unwrap().clone()
    }

    pub fn destroyed(&self) -> Vec<String> {
        let mut destroyed = self.destroyed.lock().unwrap().clone();
        destroyed.sort();
        destroyed
    }
}

#[async_trait]
impl MediaUploader for FakeUploader {
    async fn upload(
        &self,
        source: &str,
        options: &UploadOptions,
    ) -> Result<UploadedAsset, MediaError> {
        if source.contains("fail") {
            return Err(MediaError::Rejected {
                status: 400,
                message: "Invalid image file".to_string(),
            });
        }
        self.uploaded.lock().unwrap().push(source.to_string());
        Ok(UploadedAsset {
            url: format!("https://cdn.test/{}/{source}", options.folder),
            public_id: format!("{}/{source}", options.folder),
            asset_id: format!("asset-{source}"),
            resource_type: options.resource_type.as_str().to_string(),
        })
    }

    async fn destroy(&self, asset: &UploadedAsset) -> Result<(), MediaError> {
        self.destroyed.lock().unwrap().push(asset.public_id.clone());
        Ok(())
    }

    fn document_url(&self, asset: &UploadedAsset) -> String {
        format!("https://cdn.test/download/{}", asset.asset_id)
    }
}

// ---------------------------------------------------------------------------
// App harness
// ---------------------------------------------------------------------------

pub struct TestApp {
    pub app: Router,
    pub store: DbStore,
    pub media: Arc<FakeUploader>,
}

/// Build the full application router over an in-memory store and a fake
/// media host. This is the same middleware stack `main.rs` serves.
pub fn build_test_app() -> TestApp {
    build_test_app_with(test_config(false))
}

pub fn build_test_app_with(config: ServerConfig) -> TestApp {
    let store: DbStore = Arc::new(MemoryDocumentStore::with_default_indexes());
    let media = Arc::new(FakeUploader::default());

    let state = AppState {
        store: Arc::clone(&store),
        media: media.clone(),
        config: Arc::new(config),
    };

    TestApp {
        app: build_app_router(state),
        store,
        media,
    }
}

impl TestApp {
    /// Store an account directly and return it.
    pub async fn seed_user(&self, username: &str, password: &str) -> User {
        let hash = hash_password(password).expect("hashing should succeed");
        let user = User::new(username.to_string(), hash);
        UserRepo::create(&self.store, &user)
            .await
            .expect("user creation should succeed");
        user
    }

    /// A `Cookie` header value carrying a valid session for a fresh account.
    pub async fn session_cookie(&self) -> String {
        let user = self.seed_user("admin", "admin-password").await;
        cookie_for(&user)
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(request(Method::GET, uri, None, None)).await
    }

    pub async fn get_auth(&self, uri: &str, cookie: &str) -> Response<Body> {
        self.send(request(Method::GET, uri, Some(cookie), None)).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> Response<Body> {
        self.send(request(Method::POST, uri, None, Some(body))).await
    }

    pub async fn post_json_auth(&self, uri: &str, cookie: &str, body: Value) -> Response<Body> {
        self.send(request(Method::POST, uri, Some(cookie), Some(body)))
            .await
    }

    pub async fn put_json_auth(&self, uri: &str, cookie: &str, body: Value) -> Response<Body> {
        self.send(request(Method::PUT, uri, Some(cookie), Some(body)))
            .await
    }

    pub async fn delete_auth(&self, uri: &str, cookie: &str) -> Response<Body> {
        self.send(request(Method::DELETE, uri, Some(cookie), None))
            .await
    }
}

/// Mint a `token=<jwt>` cookie for `user` with the test secret.
pub fn cookie_for(user: &User) -> String {
    let config = JwtConfig {
        secret: TEST_SECRET.to_string(),
        expiry_secs: 3600,
    };
    let token = generate_token(user.id, &config).expect("token generation should succeed");
    format!("token={token}")
}

/// Mint a `token=<jwt>` cookie for `user` that expired five minutes ago.
pub fn expired_cookie_for(user: &User) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user.id,
        iat: now - 600,
        exp: now - 300,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("encoding should succeed");
    format!("token={token}")
}

pub fn request(
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read the full response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the failure envelope and return its message.
pub async fn expect_error(response: Response<Body>, status: StatusCode) -> String {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    json["message"].as_str().unwrap().to_string()
}
