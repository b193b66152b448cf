//! Project entity model and DTOs.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use showcase_core::error::CoreError;
use showcase_core::fields::require_text;
use showcase_core::patch::Patch;
use showcase_core::types::{new_doc_id, DocId, Timestamp};

use super::Entity;

/// A portfolio project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: DocId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub content: String,
    /// Hosted URL of the cover image.
    pub main_image: String,
    /// Hosted URLs of the gallery images.
    #[serde(default)]
    pub images: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Entity for Project {
    const COLLECTION: &'static str = "projects";
    const NAME: &'static str = "Project";

    fn id(&self) -> DocId {
        self.id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// DTO for creating a project. Image fields carry upload sources (data URIs
/// or remote URLs), not hosted URLs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub main_image: Option<String>,
    pub images: Option<Vec<String>>,
}

impl CreateProject {
    /// Check required fields and build a project whose image fields still
    /// hold the upload sources.
    pub fn into_project(self) -> Result<Project, CoreError> {
        let entity = Project::NAME;
        let now = Utc::now();
        Ok(Project {
            id: new_doc_id(),
            name: require_text(entity, "name", self.name)?,
            category: require_text(entity, "category", self.category)?,
            description: require_text(entity, "description", self.description)?,
            content: require_text(entity, "content", self.content)?,
            main_image: require_text(entity, "mainImage", self.main_image)?,
            images: self.images.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }
}

/// DTO for updating a project. Every field is a [`Patch`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProject {
    pub name: Patch<String>,
    pub category: Patch<String>,
    pub description: Patch<String>,
    pub content: Patch<String>,
    pub main_image: Patch<String>,
    pub images: Patch<Vec<String>>,
}

/// Image changes left over after [`UpdateProject::apply_text`].
#[derive(Debug, Clone)]
pub struct ProjectImagePatch {
    pub main_image: Patch<String>,
    pub images: Patch<Vec<String>>,
}

impl UpdateProject {
    /// Apply the text fields and hand back the image patches, which need an
    /// upload before they can be applied.
    pub fn apply_text(self, project: &mut Project) -> ProjectImagePatch {
        self.name.apply(&mut project.name);
        self.category.apply(&mut project.category);
        self.description.apply(&mut project.description);
        self.content.apply(&mut project.content);
        ProjectImagePatch {
            main_image: self.main_image,
            images: self.images,
        }
    }
}
