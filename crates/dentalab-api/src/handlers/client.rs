//! Client HTTP handlers

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
use crate::dto::{ClientRequest, ClientResponse, OrderResponse};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    CallerLaboratory(caller): CallerLaboratory,
    payload: Result<Json<ClientRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ClientResponse>>), ApiError> {
    let Json(req) = payload?;
    let client = state.clients.create(&caller, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(client.into()))))
}

pub async fn list(
    State(state): State<AppState>,
    CallerLaboratory(caller): CallerLaboratory,
) -> Result<Json<ApiResponse<Vec<ClientResponse>>>, ApiError> {
    let clients = state.clients.list(&caller).await?;
    Ok(Json(ApiResponse::success(
        clients.into_iter().map(Into::into).collect(),
    )))
}

pub async fn get(
    State(state): State<AppState>,
    CallerLaboratory(caller): CallerLaboratory,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<ClientResponse>>, ApiError> {
    let Path(id) = id?;
    let client = state.clients.get(&caller, &id).await?;
    Ok(Json(ApiResponse::success(client.into())))
}

pub async fn update(
    State(state): State<AppState>,
    CallerLaboratory(caller): CallerLaboratory,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ClientRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ClientResponse>>, ApiError> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let client = state.clients.update(&caller, &id, req.into()).await?;
    Ok(Json(ApiResponse::success(client.into())))
}

pub async fn delete(
    State(state): State<AppState>,
    CallerLaboratory(caller): CallerLaboratory,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.clients.delete(&caller, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/clients/{id}/orders
pub async fn list_orders(
    State(state): State<AppState>,
    CallerLaboratory(caller): CallerLaboratory,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<Vec<OrderResponse>>>, ApiError> {
    let Path(id) = id?;
    let orders = state.orders.list_by_client(&caller, &id).await?;
    Ok(Json(ApiResponse::success(
        orders.into_iter().map(Into::into).collect(),
    )))
}
