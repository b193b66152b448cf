//! Handlers for the `/services` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use showcase_core::error::CoreError;
use showcase_core::patch::Patch;
use showcase_core::types::parse_doc_id;
use showcase_db::models::service::{CreateService, Service, UpdateService};
use showcase_db::models::Entity;
use showcase_db::repositories::ServiceRepo;
use showcase_media::UploadBatch;

use crate::error::{AppError, AppResult};
use crate::extract::AppBody;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const FOLDER: &str = "services";

#[derive(Debug, Serialize)]
pub struct ServiceList {
    pub success: bool,
    pub services: Vec<Service>,
}

#[derive(Debug, Serialize)]
pub struct ServiceCreated {
    pub success: bool,
    pub message: &'static str,
    pub service: Service,
}

fn not_found() -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: Service::NAME,
    })
}

/// GET /api/services
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ServiceList>> {
    let services = ServiceRepo::list(&state.store).await?;
    Ok(Json(ServiceList {
        success: true,
        services,
    }))
}

/// POST /api/services/create
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppBody(input): AppBody<CreateService>,
) -> AppResult<(StatusCode, Json<ServiceCreated>)> {
    let mut service = input.into_service()?;

    let mut uploads = UploadBatch::new(state.media.clone(), FOLDER);
    let outcome = upload_and_insert(&state, &mut uploads, &mut service).await;
    uploads.settle(outcome).await?;

    tracing::info!(service_id = %service.id, user_id = %user.id, "Service created");
    Ok((
        StatusCode::CREATED,
        Json(ServiceCreated {
            success: true,
            message: "Service created successfully",
            service,
        }),
    ))
}

async fn upload_and_insert(
    state: &AppState,
    uploads: &mut UploadBatch,
    service: &mut Service,
) -> AppResult<()> {
    let image_url = uploads.image(&service.image_url).await?;
    service.image_url = image_url;
    ServiceRepo::create(&state.store, service).await?;
    Ok(())
}

/// PUT /api/services/{id}
pub async fn update(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(id): Path<String>,
    AppBody(input): AppBody<UpdateService>,
) -> AppResult<Json<Service>> {
    let id = parse_doc_id(&id)?;
    let mut service = ServiceRepo::find_by_id(&state.store, id)
        .await?
        .ok_or_else(not_found)?;

    let image = input.apply_text(&mut service);

    let mut uploads = UploadBatch::new(state.media.clone(), FOLDER);
    let outcome = upload_and_save(&state, &mut uploads, &mut service, image).await;
    uploads.settle(outcome).await?;

    Ok(Json(service))
}

async fn upload_and_save(
    state: &AppState,
    uploads: &mut UploadBatch,
    service: &mut Service,
    image: Patch<String>,
) -> AppResult<()> {
    if let Some(source) = image.into_value() {
        service.image_url = uploads.image(&source).await?;
    }

    service.touch();
    if !ServiceRepo::save(&state.store, service).await? {
        return Err(not_found());
    }
    Ok(())
}

/// DELETE /api/services/{id}
///
/// Responds with the deleted service.
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<Service>> {
    let id = parse_doc_id(&id)?;
    let service = ServiceRepo::delete(&state.store, id)
        .await?
        .ok_or_else(not_found)?;
    tracing::info!(service_id = %service.id, "Service deleted");
    Ok(Json(service))
}
