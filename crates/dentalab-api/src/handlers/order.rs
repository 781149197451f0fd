// ============================================================================
// Dentalab API - Order Handlers
// File: crates/dentalab-api/src/handlers/order.rs
// ============================================================================
//! Work order HTTP handlers. Status changes have their own endpoint; the
//! general update only replaces line items.

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
use crate::dto::{CreateOrderRequest, OrderResponse, UpdateOrderRequest, UpdateOrderStatusRequest};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/orders
pub async fn create(
    State(state): State<AppState>,
    CallerLaboratory(caller): CallerLaboratory,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<OrderResponse>>), ApiError> {
    let Json(req) = payload?;
    let (client_id, items) = req.into_parts()?;
    let order = state.orders.create(&caller, &client_id, items).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(order.into()))))
}

/// GET /api/v1/orders
pub async fn list(
    State(state): State<AppState>,
    CallerLaboratory(caller): CallerLaboratory,
) -> Result<Json<ApiResponse<Vec<OrderResponse>>>, ApiError> {
    let orders = state.orders.list(&caller).await?;
    Ok(Json(ApiResponse::success(
        orders.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/v1/orders/{id}
pub async fn get(
    State(state): State<AppState>,
    CallerLaboratory(caller): CallerLaboratory,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<OrderResponse>>, ApiError> {
    let Path(id) = id?;
    let order = state.orders.get(&caller, &id).await?;
    Ok(Json(ApiResponse::success(order.into())))
}

/// PUT /api/v1/orders/{id}
pub async fn update(
    State(state): State<AppState>,
    CallerLaboratory(caller): CallerLaboratory,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateOrderRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<OrderResponse>>, ApiError> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let order = state
        .orders
        .update_items(&caller, &id, req.into_items())
        .await?;
    Ok(Json(ApiResponse::success(order.into())))
}

/// PATCH /api/v1/orders/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    CallerLaboratory(caller): CallerLaboratory,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateOrderStatusRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<OrderResponse>>, ApiError> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let target = req.status()?;
    let order = state.orders.update_status(&caller, &id, target).await?;
    Ok(Json(ApiResponse::success(order.into())))
}

/// DELETE /api/v1/orders/{id}
pub async fn delete(
    State(state): State<AppState>,
    CallerLaboratory(caller): CallerLaboratory,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.orders.delete(&caller, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
