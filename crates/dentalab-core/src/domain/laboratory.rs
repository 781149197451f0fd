// ============================================================================
// Dentalab Core - Laboratory Entity
// File: crates/dentalab-core/src/domain/laboratory.rs
// Description: Laboratory (tenant root) with profile validation
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Address, Entity, TenantOwned};
use crate::error::DomainError;
use crate::validation::{validate_email, validate_name, validate_phone};

/// Mutable fields of a laboratory, shared by signup and profile edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaboratoryProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
}

/// A dental prosthesis laboratory. Every other business entity hangs off one.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Laboratory {
    pub id: Uuid,

    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[validate(custom(function = "validate_email"))]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(nested)]
    pub address: Address,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl Laboratory {
    pub fn new(profile: LaboratoryProfile) -> Result<Self, DomainError> {
        let now = Utc::now();
        let mut lab = Self {
            id: dentalab_shared::new_id(),
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: Address::default(),
            created_at: now,
            updated_at: now,
            removed_at: None,
        };
        lab.apply(profile);

        lab.validate()?;
        Ok(lab)
    }

    /// Overwrites the profile. On a validation failure `self` is left untouched.
    pub fn update(&mut self, profile: LaboratoryProfile) -> Result<(), DomainError> {
        let mut next = self.clone();
        next.apply(profile);
        next.updated_at = Utc::now();

        next.validate()?;
        *self = next;
        Ok(())
    }

    fn apply(&mut self, profile: LaboratoryProfile) {
        self.name = profile.name.trim().to_string();
        self.email = profile.email.trim().to_string();
        self.phone = profile.phone.trim().to_string();
        self.address = profile.address.trimmed();
    }
}

impl Entity for Laboratory {
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

/// A laboratory owns itself; this lets profile edits go through the same
/// tenant guard as every other entity.
impl TenantOwned for Laboratory {
    fn laboratory_id(&self) -> Uuid {
        self.id
    }
}
