//! Media hosting for uploaded images and documents.
//!
//! - [`MediaUploader`] -- the provider seam (upload, destroy, link building).
//! - [`cloudinary`] -- the Cloudinary implementation.
//! - [`batch::UploadBatch`] -- tracks uploads made during one request and
//!   destroys them if the request fails.

pub mod batch;
pub mod cloudinary;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use batch::UploadBatch;

/// Shared handle to the configured uploader.
pub type SharedUploader = Arc<dyn MediaUploader>;

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Missing required parameter - file")]
    EmptySource,

    /// The media host answered with an error status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Media host request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// How the media host should treat an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Image,
    /// Let the host detect the type (PDFs and other documents).
    Auto,
}

impl ResourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Image => "image",
            ResourceType::Auto => "auto",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub folder: String,
    pub resource_type: ResourceType,
}

/// A durable asset on the media host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedAsset {
    /// Public HTTPS URL of the asset.
    pub url: String,
    pub public_id: String,
    pub asset_id: String,
    /// Resource type the host stored the asset under (`image`, `raw`, ...).
    pub resource_type: String,
}

#[async_trait]
pub trait MediaUploader: Send + Sync {
    /// Upload `source` (a data URI or a remote URL) and return the hosted asset.
    async fn upload(
        &self,
        source: &str,
        options: &UploadOptions,
    ) -> Result<UploadedAsset, MediaError>;

    /// Remove a previously uploaded asset.
    async fn destroy(&self, asset: &UploadedAsset) -> Result<(), MediaError>;

    /// The link stored for an uploaded document. Defaults to the asset URL.
    fn document_url(&self, asset: &UploadedAsset) -> String {
        asset.url.clone()
    }
}
