// ============================================================================
// Dentalab Core - Technician Entity
// File: crates/dentalab-core/src/domain/technician.rs
// Description: Laboratory technician with role and specializations
// ============================================================================

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Entity, TenantOwned};
use crate::error::{DomainError, FieldErrors};
use crate::validation::{is_blank, validate_email, validate_name, validate_phone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechnicianRole {
    SeniorTechnician,
    Technician,
    Apprentice,
}

impl TechnicianRole {
    pub const ALL: [TechnicianRole; 3] = [
        TechnicianRole::SeniorTechnician,
        TechnicianRole::Technician,
        TechnicianRole::Apprentice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TechnicianRole::SeniorTechnician => "senior_technician",
            TechnicianRole::Technician => "technician",
            TechnicianRole::Apprentice => "apprentice",
        }
    }

    /// Wire-boundary parse, reported as a `role` field violation.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let s = s.trim();
        if is_blank(s) {
            return Err(DomainError::InvalidInput(FieldErrors::single(
                "role",
                "role is required",
            )));
        }
        s.parse()
    }
}

impl FromStr for TechnicianRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TechnicianRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| {
                DomainError::InvalidInput(FieldErrors::single(
                    "role",
                    "invalid role. Must be one of: senior_technician, technician, apprentice",
                ))
            })
    }
}

impl fmt::Display for TechnicianRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicianProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: TechnicianRole,
    pub specializations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Technician {
    pub id: Uuid,
    laboratory_id: Uuid,

    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[validate(custom(function = "validate_email"))]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    pub role: TechnicianRole,
    pub specializations: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl Technician {
    pub fn new(laboratory_id: Uuid, profile: TechnicianProfile) -> Result<Self, DomainError> {
        let now = Utc::now();
        let mut technician = Self {
            id: dentalab_shared::new_id(),
            laboratory_id,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            role: profile.role,
            specializations: Vec::new(),
            created_at: now,
            updated_at: now,
            removed_at: None,
        };
        technician.apply(profile);

        technician.validate()?;
        Ok(technician)
    }

    pub fn update(&mut self, profile: TechnicianProfile) -> Result<(), DomainError> {
        let mut next = self.clone();
        next.apply(profile);
        next.updated_at = Utc::now();

        next.validate()?;
        *self = next;
        Ok(())
    }

    fn apply(&mut self, profile: TechnicianProfile) {
        self.name = profile.name.trim().to_string();
        self.email = profile.email.trim().to_string();
        self.phone = profile.phone.trim().to_string();
        self.role = profile.role;
        // Blank tags carry no meaning.
        self.specializations = profile
            .specializations
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
}

impl Entity for Technician {
    fn id(&self) -> Uuid {
        self.id
    }

    fn removed_at(&self) -> Option<DateTime<Utc>> {
        self.removed_at
    }

    fn soft_delete(&mut self) {
        self.removed_at = Some(Utc::now());
    }
}

impl TenantOwned for Technician {
    fn laboratory_id(&self) -> Uuid {
        self.laboratory_id
    }
}
