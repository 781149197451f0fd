// ============================================================================
// Dentalab API - Laboratory Handlers
// File: crates/dentalab-api/src/handlers/laboratory.rs
// ============================================================================
//! Laboratory HTTP handlers. Signup, get and list are public; profile
//! changes require the caller to be that laboratory.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::auth::CallerLaboratory;
use crate::dto::{LaboratoryRequest, LaboratoryResponse};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/laboratories
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<LaboratoryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<LaboratoryResponse>>), ApiError> {
    let Json(req) = payload?;
    let lab = state.laboratories.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(lab.into()))))
}

/// GET /api/v1/laboratories
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<LaboratoryResponse>>>, ApiError> {
    let labs = state.laboratories.list().await?;
    Ok(Json(ApiResponse::success(
        labs.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/v1/laboratories/{id}
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<LaboratoryResponse>>, ApiError> {
    let Path(id) = id?;
    let lab = state.laboratories.get(&id).await?;
    Ok(Json(ApiResponse::success(lab.into())))
}

/// PUT /api/v1/laboratories/{id}
pub async fn update(
    State(state): State<AppState>,
    CallerLaboratory(caller): CallerLaboratory,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<LaboratoryRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<LaboratoryResponse>>, ApiError> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let lab = state.laboratories.update(&caller, &id, req.into()).await?;
    Ok(Json(ApiResponse::success(lab.into())))
}

/// DELETE /api/v1/laboratories/{id}
pub async fn delete(
    State(state): State<AppState>,
    CallerLaboratory(caller): CallerLaboratory,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.laboratories.delete(&caller, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
