use chrono::{DateTime, Utc};
use dentalab_core::domain::{Address, Laboratory, LaboratoryProfile};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /laboratories` and `PUT /laboratories/{id}`.
/// Missing fields are left blank and reported by validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LaboratoryRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
}

impl From<LaboratoryRequest> for LaboratoryProfile {
    fn from(req: LaboratoryRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            address: req.address,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LaboratoryResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Laboratory> for LaboratoryResponse {
    fn from(lab: Laboratory) -> Self {
        Self {
            id: lab.id,
            name: lab.name,
            email: lab.email,
            phone: lab.phone,
            address: lab.address,
            created_at: lab.created_at,
            updated_at: lab.updated_at,
        }
    }
}
