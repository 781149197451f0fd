//! Client entity (a dentist or clinic served by a laboratory)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Address, Entity, TenantOwned};
use crate::error::DomainError;
use crate::validation::{validate_email, validate_name, validate_phone};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Client {
    pub id: Uuid,
    laboratory_id: Uuid,

    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[validate(custom(function = "validate_email"))]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(nested)]
    pub address: Address,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl Client {
    pub fn new(laboratory_id: Uuid, profile: ClientProfile) -> Result<Self, DomainError> {
        let now = Utc::now();
        let mut client = Self {
            id: dentalab_shared::new_id(),
            laboratory_id,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: Address::default(),
            created_at: now,
            updated_at: now,
            removed_at: None,
        };
        client.apply(profile);

        client.validate()?;
        Ok(client)
    }

    /// Replaces the mutable fields. The owning laboratory never changes.
    pub fn update(&mut self, profile: ClientProfile) -> Result<(), DomainError> {
        let mut next = self.clone();
        next.apply(profile);
        next.updated_at = Utc::now();

        next.validate()?;
        *self = next;
        Ok(())
    }

    fn apply(&mut self, profile: ClientProfile) {
        self.name = profile.name.trim().to_string();
        self.email = profile.email.trim().to_string();
        self.phone = profile.phone.trim().to_string();
        self.address = profile.address.trimmed();
    }
}

impl Entity for Client {
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

impl TenantOwned for Client {
    fn laboratory_id(&self) -> Uuid {
        self.laboratory_id
    }
}
