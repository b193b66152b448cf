//! Blog post entity model and DTOs.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use showcase_core::error::CoreError;
use showcase_core::fields::{non_blank, require, require_text};
use showcase_core::patch::Patch;
use showcase_core::types::{new_doc_id, DocId, Timestamp};

use super::Entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(rename = "_id")]
    pub id: DocId,
    pub title: String,
    pub description: String,
    pub content: String,
    /// Hosted URL of the header image.
    pub image: String,
    pub tags: Vec<String>,
    /// Download link for the PDF edition, if one was uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Entity for BlogPost {
    const COLLECTION: &'static str = "blog_posts";
    const NAME: &'static str = "Blog post";

    fn id(&self) -> DocId {
        self.id
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// DTO for creating a blog post. `image` and `pdfUrl` carry upload sources.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogPost {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub pdf_url: Option<String>,
}

impl CreateBlogPost {
    pub fn into_blog_post(self) -> Result<BlogPost, CoreError> {
        let entity = BlogPost::NAME;
        let now = Utc::now();
        Ok(BlogPost {
            id: new_doc_id(),
            title: require_text(entity, "title", self.title)?,
            description: require_text(entity, "description", self.description)?,
            content: require_text(entity, "content", self.content)?,
            image: require_text(entity, "image", self.image)?,
            tags: require(entity, "tags", self.tags)?,
            pdf_url: non_blank(self.pdf_url),
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateBlogPost {
    pub title: Patch<String>,
    pub description: Patch<String>,
    pub content: Patch<String>,
    pub tags: Patch<Vec<String>>,
    pub image: Patch<String>,
    pub pdf_url: Patch<String>,
}

/// Asset changes left over after [`UpdateBlogPost::apply_text`].
#[derive(Debug, Clone)]
pub struct BlogPostAssetPatch {
    pub image: Patch<String>,
    pub pdf_url: Patch<String>,
}

impl UpdateBlogPost {
    pub fn apply_text(self, post: &mut BlogPost) -> BlogPostAssetPatch {
        self.title.apply(&mut post.title);
        self.description.apply(&mut post.description);
        self.content.apply(&mut post.content);
        self.tags.apply(&mut post.tags);
        BlogPostAssetPatch {
            image: self.image,
            pdf_url: self.pdf_url,
        }
    }
}
