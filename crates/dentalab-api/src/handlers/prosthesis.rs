//! Prosthesis catalog HTTP handlers

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
use crate::dto::{ProsthesisListQuery, ProsthesisRequest, ProsthesisResponse};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    CallerLaboratory(caller): CallerLaboratory,
    payload: Result<Json<ProsthesisRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ProsthesisResponse>>), ApiError> {
    let Json(req) = payload?;
    let prosthesis = state.prostheses.create(&caller, req.into_spec()?).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(prosthesis.into()))))
}

pub async fn list(
    State(state): State<AppState>,
    CallerLaboratory(caller): CallerLaboratory,
    query: Result<Query<ProsthesisListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<ProsthesisResponse>>>, ApiError> {
    let Query(query) = query?;
    let rows = state.prostheses.list(&caller, query.into_filter()?).await?;
    Ok(Json(ApiResponse::success(
        rows.into_iter().map(Into::into).collect(),
    )))
}

pub async fn get(
    State(state): State<AppState>,
    CallerLaboratory(caller): CallerLaboratory,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<ProsthesisResponse>>, ApiError> {
    let Path(id) = id?;
    let prosthesis = state.prostheses.get(&caller, &id).await?;
    Ok(Json(ApiResponse::success(prosthesis.into())))
}

pub async fn update(
    State(state): State<AppState>,
    CallerLaboratory(caller): CallerLaboratory,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ProsthesisRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ProsthesisResponse>>, ApiError> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let prosthesis = state
        .prostheses
        .update(&caller, &id, req.into_spec()?)
        .await?;
    Ok(Json(ApiResponse::success(prosthesis.into())))
}

pub async fn delete(
    State(state): State<AppState>,
    CallerLaboratory(caller): CallerLaboratory,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.prostheses.delete(&caller, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
