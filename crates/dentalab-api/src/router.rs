//! Route table

use axum::{
    http::HeaderValue,
    routing::{get, patch, post},
    Router,
};
use dentalab_shared::constants::API_PREFIX;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::warn;

use crate::handlers::{client, health, laboratory, order, prosthesis, technician};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors.allowed_origins);

    let api = Router::new()
        .route("/laboratories", post(laboratory::create).get(laboratory::list))
        .route(
            "/laboratories/{id}",
            get(laboratory::get)
                .put(laboratory::update)
                .delete(laboratory::delete),
        )
        .route("/clients", post(client::create).get(client::list))
        .route(
            "/clients/{id}",
            get(client::get).put(client::update).delete(client::delete),
        )
        .route("/clients/{id}/orders", get(client::list_orders))
        .route("/orders", post(order::create).get(order::list))
        .route(
            "/orders/{id}",
            get(order::get).put(order::update).delete(order::delete),
        )
        .route("/orders/{id}/status", patch(order::update_status))
        .route("/prostheses", post(prosthesis::create).get(prosthesis::list))
        .route(
            "/prostheses/{id}",
            get(prosthesis::get)
                .put(prosthesis::update)
                .delete(prosthesis::delete),
        )
        .route("/technicians", post(technician::create).get(technician::list))
        .route(
            "/technicians/{id}",
            get(technician::get)
                .put(technician::update)
                .delete(technician::delete),
        );

    Router::new()
        .route("/health", get(health::health_check))
        .nest(API_PREFIX, api)
        .with_state(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Empty list means any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(allowed))
}
