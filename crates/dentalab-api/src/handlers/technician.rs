//! Technician HTTP handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::auth::CallerLaboratory;
use crate::dto::{TechnicianListQuery, TechnicianRequest, TechnicianResponse};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    CallerLaboratory(caller): CallerLaboratory,
    payload: Result<Json<TechnicianRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<TechnicianResponse>>), ApiError> {
    let Json(req) = payload?;
    let technician = state.technicians.create(&caller, req.into_profile()?).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(technician.into()))))
}

pub async fn list(
    State(state): State<AppState>,
    CallerLaboratory(caller): CallerLaboratory,
    query: Result<Query<TechnicianListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<TechnicianResponse>>>, ApiError> {
    let Query(query) = query?;
    let rows = state.technicians.list(&caller, query.role()?).await?;
    Ok(Json(ApiResponse::success(
        rows.into_iter().map(Into::into).collect(),
    )))
}

pub async fn get(
    State(state): State<AppState>,
    CallerLaboratory(caller): CallerLaboratory,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<TechnicianResponse>>, ApiError> {
    let Path(id) = id?;
    let technician = state.technicians.get(&caller, &id).await?;
    Ok(Json(ApiResponse::success(technician.into())))
}

pub async fn update(
    State(state): State<AppState>,
    CallerLaboratory(caller): CallerLaboratory,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<TechnicianRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<TechnicianResponse>>, ApiError> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let technician = state
        .technicians
        .update(&caller, &id, req.into_profile()?)
        .await?;
    Ok(Json(ApiResponse::success(technician.into())))
}

pub async fn delete(
    State(state): State<AppState>,
    CallerLaboratory(caller): CallerLaboratory,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.technicians.delete(&caller, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
