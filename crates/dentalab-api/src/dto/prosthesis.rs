use chrono::{DateTime, Utc};
use dentalab_core::domain::{Prosthesis, ProsthesisSpec, ProsthesisType, TenantOwned};
use dentalab_core::services::ProsthesisFilter;
use dentalab_core::DomainError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::merge_violations;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProsthesisRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub material: String,
    pub shade: Option<String>,
    pub specifications: Option<String>,
    pub notes: Option<String>,
}

impl ProsthesisRequest {
    pub fn into_spec(self) -> Result<ProsthesisSpec, DomainError> {
        let parsed = ProsthesisType::parse(&self.kind);
        let mut spec = ProsthesisSpec {
            kind: ProsthesisType::Crown,
            material: self.material,
            shade: self.shade.filter(|s| !s.trim().is_empty()),
            specifications: self.specifications.filter(|s| !s.trim().is_empty()),
            notes: self.notes.filter(|s| !s.trim().is_empty()),
        };

        match parsed {
            Ok(kind) => {
                spec.kind = kind;
                Ok(spec)
            }
            Err(e) => Err(merge_violations(e, Prosthesis::new(Uuid::nil(), spec))),
        }
    }
}

/// `GET /prostheses?type=..&material=..`
#[derive(Debug, Default, Deserialize)]
pub struct ProsthesisListQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub material: Option<String>,
}

impl ProsthesisListQuery {
    pub fn into_filter(self) -> Result<ProsthesisFilter, DomainError> {
        let kind = match self.kind.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(ProsthesisType::parse(raw)?),
            _ => None,
        };
        Ok(ProsthesisFilter {
            kind,
            material: self.material,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProsthesisResponse {
    pub id: Uuid,
    pub laboratory_id: Uuid,
    #[serde(rename = "type")]
    pub kind: ProsthesisType,
    pub material: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifications: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Prosthesis> for ProsthesisResponse {
    fn from(p: Prosthesis) -> Self {
        Self {
            id: p.id,
            laboratory_id: p.laboratory_id(),
            kind: p.kind,
            material: p.material,
            shade: p.shade,
            specifications: p.specifications,
            notes: p.notes,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
