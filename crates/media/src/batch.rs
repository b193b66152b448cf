//! Compensating-action tracking for multi-asset requests.
//!
//! Every successful upload made through an [`UploadBatch`] is recorded. If the
//! surrounding operation fails, [`UploadBatch::settle`] destroys the recorded
//! assets so no orphans are left on the media host.

use futures::future::join_all;

use crate::{MediaError, ResourceType, SharedUploader, UploadOptions, UploadedAsset};

pub struct UploadBatch {
    uploader: SharedUploader,
    folder: String,
    uploaded: Vec<UploadedAsset>,
}

impl UploadBatch {
    pub fn new(uploader: SharedUploader, folder: impl Into<String>) -> Self {
        Self {
            uploader,
            folder: folder.into(),
            uploaded: Vec::new(),
        }
    }

    fn options(&self, resource_type: ResourceType) -> UploadOptions {
        UploadOptions {
            folder: self.folder.clone(),
            resource_type,
        }
    }

    /// Upload one image and return its hosted URL.
    pub async fn image(&mut self, source: &str) -> Result<String, MediaError> {
        let options = self.options(ResourceType::Image);
        let asset = self.uploader.upload(source, &options).await?;
        let url = asset.url.clone();
        self.uploaded.push(asset);
        Ok(url)
    }

    /// Upload several images concurrently, preserving order.
    ///
    /// All uploads run to completion; successes are recorded even when a
    /// sibling fails, so a later rollback covers them.
    pub async fn images(&mut self, sources: &[String]) -> Result<Vec<String>, MediaError> {
        let options = self.options(ResourceType::Image);
        let results = join_all(
            sources
                .iter()
                .map(|source| self.uploader.upload(source, &options)),
        )
        .await;

        let mut urls = Vec::with_capacity(results.len());
        let mut first_error = None;
        for result in results {
            match result {
                Ok(asset) => {
                    urls.push(asset.url.clone());
                    self.uploaded.push(asset);
                }
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(urls),
        }
    }

    /// Upload a document (PDF) and return the link to store for it.
    pub async fn document(&mut self, source: &str) -> Result<String, MediaError> {
        let options = self.options(ResourceType::Auto);
        let asset = self.uploader.upload(source, &options).await?;
        let link = self.uploader.document_url(&asset);
        self.uploaded.push(asset);
        Ok(link)
    }

    pub fn len(&self) -> usize {
        self.uploaded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uploaded.is_empty()
    }

    /// Destroy every recorded upload. Failures are logged, not returned.
    pub async fn rollback(self) {
        if self.uploaded.is_empty() {
            return;
        }
        tracing::info!(
            count = self.uploaded.len(),
            folder = %self.folder,
            "Rolling back uploads"
        );

        let results = join_all(self.uploaded.iter().map(|a| self.uploader.destroy(a))).await;
        for (asset, result) in self.uploaded.iter().zip(results) {
            if let Err(e) = result {
                tracing::warn!(
                    public_id = %asset.public_id,
                    error = %e,
                    "Failed to destroy orphaned upload"
                );
            }
        }
    }

    /// Keep the uploads if `outcome` succeeded, otherwise roll them back.
    pub async fn settle<T, E>(self, outcome: Result<T, E>) -> Result<T, E> {
        if outcome.is_err() {
            self.rollback().await;
        }
        outcome
    }
}
