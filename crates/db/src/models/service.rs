//! Service entity model and DTOs.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use showcase_core::error::CoreError;
use showcase_core::fields::{require, require_text};
use showcase_core::patch::Patch;
use showcase_core::types::{new_doc_id, DocId, Timestamp};

use super::Entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(rename = "_id")]
    pub id: DocId,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub tags: Vec<String>,
    pub link: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Entity for Service {
    const COLLECTION: &'static str = "services";
    const NAME: &'static str = "Service";

    fn id(&self) -> DocId {
        self.id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// DTO for creating a service. `imageUrl` carries the upload source.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateService {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub link: Option<String>,
}

impl CreateService {
    pub fn into_service(self) -> Result<Service, CoreError> {
        let entity = Service::NAME;
        let now = Utc::now();
        Ok(Service {
            id: new_doc_id(),
            title: require_text(entity, "title", self.title)?,
            description: require_text(entity, "description", self.description)?,
            image_url: require_text(entity, "imageUrl", self.image_url)?,
            tags: require(entity, "tags", self.tags)?,
            link: require_text(entity, "link", self.link)?,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateService {
    pub title: Patch<String>,
    pub description: Patch<String>,
    pub tags: Patch<Vec<String>>,
    pub link: Patch<String>,
    pub image_url: Patch<String>,
}

impl UpdateService {
    /// Apply the text fields; returns the image patch.
    pub fn apply_text(self, service: &mut Service) -> Patch<String> {
        self.title.apply(&mut service.title);
        self.description.apply(&mut service.description);
        self.tags.apply(&mut service.tags);
        self.link.apply(&mut service.link);
        self.image_url
    }
}
