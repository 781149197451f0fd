use chrono::{DateTime, Utc};
use dentalab_core::domain::{Technician, TechnicianProfile, TechnicianRole, TenantOwned};
use dentalab_core::DomainError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::merge_violations;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TechnicianRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub specializations: Vec<String>,
}

impl TechnicianRequest {
    pub fn into_profile(self) -> Result<TechnicianProfile, DomainError> {
        let parsed = TechnicianRole::parse(&self.role);
        let mut profile = TechnicianProfile {
            name: self.name,
            email: self.email,
            phone: self.phone,
            role: TechnicianRole::Technician,
            specializations: self.specializations,
        };

        match parsed {
            Ok(role) => {
                profile.role = role;
                Ok(profile)
            }
            Err(e) => Err(merge_violations(e, Technician::new(Uuid::nil(), profile))),
        }
    }
}

/// `GET /technicians?role=..`
#[derive(Debug, Default, Deserialize)]
pub struct TechnicianListQuery {
    pub role: Option<String>,
}

impl TechnicianListQuery {
    pub fn role(&self) -> Result<Option<TechnicianRole>, DomainError> {
        match self.role.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => TechnicianRole::parse(raw).map(Some),
            _ => Ok(None),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TechnicianResponse {
    pub id: Uuid,
    pub laboratory_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: TechnicianRole,
    pub specializations: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Technician> for TechnicianResponse {
    fn from(t: Technician) -> Self {
        Self {
            id: t.id,
            laboratory_id: t.laboratory_id(),
            name: t.name,
            email: t.email,
            phone: t.phone,
            role: t.role,
            specializations: t.specializations,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}
