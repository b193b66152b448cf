//! Handlers for the `/blogs` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use showcase_core::error::CoreError;
use showcase_core::patch::Patch;
use showcase_core::types::parse_doc_id;
use showcase_db::models::blog_post::{BlogPost, BlogPostAssetPatch, CreateBlogPost, UpdateBlogPost};
use showcase_db::models::Entity;
use showcase_db::repositories::BlogPostRepo;
use showcase_media::UploadBatch;

use crate::error::{AppError, AppResult};
use crate::extract::AppBody;
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

const FOLDER: &str = "blog_posts";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostList {
    pub success: bool,
    pub blog_posts: Vec<BlogPost>,
}

fn not_found() -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: BlogPost::NAME,
    })
}

/// GET /api/blogs
pub async fn list(State(state): State<AppState>) -> AppResult<Json<BlogPostList>> {
    let blog_posts = BlogPostRepo::list(&state.store).await?;
    Ok(Json(BlogPostList {
        success: true,
        blog_posts,
    }))
}

/// POST /api/blogs/create
///
/// `image` is uploaded as an image; `pdfUrl`, when given, is uploaded as a
/// document and replaced by its download link.
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppBody(input): AppBody<CreateBlogPost>,
) -> AppResult<(StatusCode, Json<BlogPost>)> {
    let mut post = input.into_blog_post()?;

    let mut uploads = UploadBatch::new(state.media.clone(), FOLDER);
    let outcome = upload_and_insert(&state, &mut uploads, &mut post).await;
    uploads.settle(outcome).await?;

    tracing::info!(blog_post_id = %post.id, user_id = %user.id, "Blog post created");
    Ok((StatusCode::CREATED, Json(post)))
}

async fn upload_and_insert(
    state: &AppState,
    uploads: &mut UploadBatch,
    post: &mut BlogPost,
) -> AppResult<()> {
    let image = uploads.image(&post.image).await?;
    post.image = image;
    if let Some(source) = post.pdf_url.take() {
        post.pdf_url = Some(uploads.document(&source).await?);
    }
    BlogPostRepo::create(&state.store, post).await?;
    Ok(())
}

/// PUT /api/blogs/{id}
pub async fn update(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(id): Path<String>,
    AppBody(input): AppBody<UpdateBlogPost>,
) -> AppResult<Json<BlogPost>> {
    let id = parse_doc_id(&id)?;
    let mut post = BlogPostRepo::find_by_id(&state.store, id)
        .await?
        .ok_or_else(not_found)?;

    let assets = input.apply_text(&mut post);

    let mut uploads = UploadBatch::new(state.media.clone(), FOLDER);
    let outcome = upload_and_save(&state, &mut uploads, &mut post, assets).await;
    uploads.settle(outcome).await?;

    Ok(Json(post))
}

async fn upload_and_save(
    state: &AppState,
    uploads: &mut UploadBatch,
    post: &mut BlogPost,
    assets: BlogPostAssetPatch,
) -> AppResult<()> {
    if let Some(source) = assets.image.into_value() {
        post.image = uploads.image(&source).await?;
    }
    match assets.pdf_url.normalized() {
        Patch::Set(source) => post.pdf_url = Some(uploads.document(&source).await?),
        Patch::Null => post.pdf_url = None,
        Patch::Absent => {}
    }

    post.touch();
    if !BlogPostRepo::save(&state.store, post).await? {
        return Err(not_found());
    }
    Ok(())
}

/// DELETE /api/blogs/{id}
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_doc_id(&id)?;
    let post = BlogPostRepo::delete(&state.store, id)
        .await?
        .ok_or_else(not_found)?;
    tracing::info!(blog_post_id = %post.id, "Blog post deleted");
    Ok(Json(MessageResponse::ok("Blog post deleted successfully")))
}
