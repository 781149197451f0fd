// ============================================================================
// Dentalab API - Tenant Resolution
// File: crates/dentalab-api/src/auth.rs
// ============================================================================
//! Resolves which laboratory a request acts for.
//!
//! With `tenant_source = "token"` the laboratory comes from the signed
//! `laboratory_id` claim of a bearer JWT. With `"query"` it is taken from the
//! `laboratory_id` query parameter as-is. Either way it is only a claim; the
//! services still check ownership on every row.

use axum::{
    extract::{FromRequestParts, Query},
    http::{header::AUTHORIZATION, request::Parts},
};
use dentalab_security::JwtError;
use dentalab_shared::config::TenantSource;
use dentalab_shared::constants::LABORATORY_ID_QUERY;
use dentalab_shared::utils::parse_uuid;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// The laboratory the current request claims to act as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerLaboratory(pub Uuid);

#[derive(Debug, Deserialize)]
struct TenantQuery {
    laboratory_id: Option<String>,
}

impl FromRequestParts<AppState> for CallerLaboratory {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(cached) = parts.extensions.get::<CallerLaboratory>() {
            return Ok(*cached);
        }

        let caller = match state.config.auth.tenant_source {
            TenantSource::Token => from_token(parts, state)?,
            TenantSource::Query => from_query(parts)?,
        };

        debug!(laboratory_id = %caller.0, "Resolved caller laboratory");
        parts.extensions.insert(caller);
        Ok(caller)
    }
}

fn from_token(parts: &Parts, state: &AppState) -> Result<CallerLaboratory, ApiError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("missing authorization header".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("invalid authorization header format".to_string()))?;

    match state.jwt.resolve(token) {
        Ok(identity) => Ok(CallerLaboratory(identity.laboratory_id)),
        Err(JwtError::MissingTenant) => Err(ApiError::Forbidden(
            "token does not carry a laboratory".to_string(),
        )),
        Err(e) => Err(ApiError::Unauthorized(e.to_string())),
    }
}

fn from_query(parts: &Parts) -> Result<CallerLaboratory, ApiError> {
    let Query(query) = Query::<TenantQuery>::try_from_uri(&parts.uri)?;
    let raw = query
        .laboratory_id
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            ApiError::BadRequest(format!("{} query parameter is required", LABORATORY_ID_QUERY))
        })?;

    parse_uuid(raw.trim())
        .map(CallerLaboratory)
        .ok_or_else(|| ApiError::BadRequest(format!("{} is not a valid id", LABORATORY_ID_QUERY)))
}
