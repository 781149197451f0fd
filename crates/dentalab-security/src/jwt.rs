//! JWT token handling

use chrono::{Duration, Utc};
use dentalab_shared::utils::parse_uuid;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
    /// Authentic token that does not name a laboratory.
    #[error("Token carries no laboratory")]
    MissingTenant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laboratory_id: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

/// Who a verified request acts as. Only a claim, never proof of ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantIdentity {
    pub laboratory_id: Uuid,
}

pub struct JwtService {
    secret: String,
    leeway_secs: u64,
}

impl JwtService {
    pub fn new(secret: String, leeway_secs: u64) -> Self {
        Self { secret, leeway_secs }
    }

    /// Signs an HS256 token. Used by tests and local tooling; production
    /// tokens come from the identity provider sharing the secret.
    pub fn issue(
        &self,
        subject: &str,
        laboratory_id: Option<Uuid>,
        ttl_secs: i64,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            laboratory_id: laboratory_id.map(|id| id.to_string()),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| JwtError::CreationError(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::default();
        validation.leeway = self.leeway_secs;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::TokenExpired,
            _ => JwtError::ValidationError(e.to_string()),
        })
    }

    /// Validates `token` and extracts the laboratory it acts for.
    pub fn resolve(&self, token: &str) -> Result<TenantIdentity, JwtError> {
        let claims = self.validate_token(token)?;
        let laboratory_id = claims
            .laboratory_id
            .as_deref()
            .and_then(parse_uuid)
            .ok_or_else(|| {
                tracing::warn!(sub = %claims.sub, "Token without a usable laboratory_id claim");
                JwtError::MissingTenant
            })?;

        Ok(TenantIdentity { laboratory_id })
    }
}
