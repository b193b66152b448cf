//! Cloudinary upload API client.
//!
//! Requests are signed: the signed parameters are sorted by name, joined as
//! `k=v&k=v`, suffixed with the API secret, and hashed with SHA-256.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::Form;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::{MediaError, MediaUploader, UploadOptions, UploadedAsset};

const API_BASE: &str = "https://api.cloudinary.com/v1_1";
const CONSOLE_BASE: &str = "https://res-console.cloudinary.com";

/// Default HTTP timeout for media host calls, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Credentials and client settings for one Cloudinary account.
#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub timeout_secs: u64,
}

impl fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

pub struct CloudinaryUploader {
    config: CloudinaryConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
    asset_id: String,
    resource_type: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Compute the request signature for `params`.
fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, MediaError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| format!("Media host returned {status}"));
    Err(MediaError::Rejected {
        status: status.as_u16(),
        message,
    })
}

impl CloudinaryUploader {
    pub fn new(config: CloudinaryConfig) -> Result<Self, MediaError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    fn endpoint(&self, resource_type: &str, action: &str) -> String {
        format!(
            "{API_BASE}/{}/{resource_type}/{action}",
            self.config.cloud_name
        )
    }

    /// Build a signed multipart form carrying `signed` plus the credentials.
    fn signed_form(&self, signed: &[(&str, &str)]) -> Form {
        let signature = sign(signed, &self.config.api_secret);
        signed
            .iter()
            .fold(Form::new(), |form, (k, v)| form.text(k.to_string(), v.to_string()))
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256")
    }
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    async fn upload(
        &self,
        source: &str,
        options: &UploadOptions,
    ) -> Result<UploadedAsset, MediaError> {
        if source.trim().is_empty() {
            return Err(MediaError::EmptySource);
        }

        let timestamp = Utc::now().timestamp().to_string();
        let form = self
            .signed_form(&[
                ("folder", options.folder.as_str()),
                ("timestamp", timestamp.as_str()),
            ])
            .text("file", source.to_string());

        let response = self
            .client
            .post(self.endpoint(options.resource_type.as_str(), "upload"))
            .multipart(form)
            .send()
            .await?;
        let uploaded: UploadResponse = read_json(response).await?;

        tracing::debug!(
            public_id = %uploaded.public_id,
            folder = %options.folder,
            "Uploaded asset"
        );

        Ok(UploadedAsset {
            url: uploaded.secure_url,
            public_id: uploaded.public_id,
            asset_id: uploaded.asset_id,
            resource_type: uploaded.resource_type,
        })
    }

    async fn destroy(&self, asset: &UploadedAsset) -> Result<(), MediaError> {
        let timestamp = Utc::now().timestamp().to_string();
        let form = self.signed_form(&[
            ("public_id", asset.public_id.as_str()),
            ("timestamp", timestamp.as_str()),
        ]);

        let response = self
            .client
            .post(self.endpoint(&asset.resource_type, "destroy"))
            .multipart(form)
            .send()
            .await?;
        let outcome: DestroyResponse = read_json(response).await?;

        match outcome.result.as_str() {
            "ok" | "not found" => Ok(()),
            other => Err(MediaError::Rejected {
                status: 200,
                message: format!("Destroy of {} returned '{other}'", asset.public_id),
            }),
        }
    }

    fn document_url(&self, asset: &UploadedAsset) -> String {
        format!(
            "{CONSOLE_BASE}/{}/media_explorer_thumbnails/{}/download",
            self.config.cloud_name, asset.asset_id
        )
    }
}
