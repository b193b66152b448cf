//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use showcase_core::error::CoreError;
use showcase_core::patch::Patch;
use showcase_core::types::parse_doc_id;
use showcase_db::models::project::{CreateProject, Project, ProjectImagePatch, UpdateProject};
use showcase_db::models::Entity;
use showcase_db::repositories::ProjectRepo;
use showcase_media::UploadBatch;

use crate::error::{AppError, AppResult};
use crate::extract::AppBody;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Media host folder for project images.
const FOLDER: &str = "projects";

#[derive(Debug, Serialize)]
pub struct ProjectList {
    pub success: bool,
    pub projects: Vec<Project>,
}

fn not_found() -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: Project::NAME,
    })
}

/// GET /api/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ProjectList>> {
    let projects = ProjectRepo::list(&state.store).await?;
    Ok(Json(ProjectList {
        success: true,
        projects,
    }))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Project>> {
    let id = parse_doc_id(&id)?;
    let project = ProjectRepo::find_by_id(&state.store, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(project))
}

/// POST /api/projects/create
///
/// `mainImage` and `images` carry upload sources; the stored project holds
/// the hosted URLs.
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppBody(input): AppBody<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let mut project = input.into_project()?;

    let mut uploads = UploadBatch::new(state.media.clone(), FOLDER);
    let outcome = upload_and_insert(&state, &mut uploads, &mut project).await;
    uploads.settle(outcome).await?;

    tracing::info!(project_id = %project.id, user_id = %user.id, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

async fn upload_and_insert(
    state: &AppState,
    uploads: &mut UploadBatch,
    project: &mut Project,
) -> AppResult<()> {
    let main_image = uploads.image(&project.main_image).await?;
    let images = uploads.images(&project.images).await?;
    project.main_image = main_image;
    project.images = images;
    ProjectRepo::create(&state.store, project).await?;
    Ok(())
}

/// PUT /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(id): Path<String>,
    AppBody(input): AppBody<UpdateProject>,
) -> AppResult<Json<Project>> {
    let id = parse_doc_id(&id)?;
    let mut project = ProjectRepo::find_by_id(&state.store, id)
        .await?
        .ok_or_else(not_found)?;

    let images = input.apply_text(&mut project);

    let mut uploads = UploadBatch::new(state.media.clone(), FOLDER);
    let outcome = upload_and_save(&state, &mut uploads, &mut project, images).await;
    uploads.settle(outcome).await?;

    Ok(Json(project))
}

async fn upload_and_save(
    state: &AppState,
    uploads: &mut UploadBatch,
    project: &mut Project,
    images: ProjectImagePatch,
) -> AppResult<()> {
    if let Some(source) = images.main_image.into_value() {
        project.main_image = uploads.image(&source).await?;
    }
    match images.images.normalized() {
        Patch::Set(sources) => project.images = uploads.images(&sources).await?,
        Patch::Null => project.images.clear(),
        Patch::Absent => {}
    }

    project.touch();
    if !ProjectRepo::save(&state.store, project).await? {
        // Deleted while the uploads were in flight.
        return Err(not_found());
    }
    Ok(())
}

/// DELETE /api/projects/{id}
///
/// Responds with the deleted project.
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<Project>> {
    let id = parse_doc_id(&id)?;
    let project = ProjectRepo::delete(&state.store, id)
        .await?
        .ok_or_else(not_found)?;
    tracing::info!(project_id = %project.id, "Project deleted");
    Ok(Json(project))
}
