// ============================================================================
// Dentalab Core - Work Order Entity
// File: crates/dentalab-core/src/domain/order.rs
// Description: Work order with embedded prosthesis line items
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Entity, OrderStatus, TenantOwned};
use crate::error::DomainError;
use crate::validation::validate_required;

/// One product requested by an order. Not addressable on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProsthesisItem {
    /// Free-text category, unlike the catalog's closed [`ProsthesisType`](crate::domain::ProsthesisType).
    #[serde(rename = "type")]
    #[validate(custom(function = "validate_required"))]
    pub kind: String,

    #[validate(custom(function = "validate_required"))]
    pub material: String,

    #[serde(default)]
    pub shade: Option<String>,

    #[validate(range(min = 1, message = "quantity must be greater than 0"))]
    pub quantity: i32,

    #[serde(default)]
    pub notes: Option<String>,
}

impl ProsthesisItem {
    fn trimmed(self) -> Self {
        Self {
            kind: self.kind.trim().to_string(),
            material: self.material.trim().to_string(),
            ..self
        }
    }
}

/// A client's work order.
///
/// `laboratory_id` is copied from the client when the order is created and
/// `status` only moves through [`Order::transition_to`]; neither has a setter.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Order {
    pub id: Uuid,
    client_id: Uuid,
    laboratory_id: Uuid,
    status: OrderStatus,

    #[validate(
        length(min = 1, message = "at least one prosthesis item is required"),
        nested
    )]
    prosthesis: Vec<ProsthesisItem>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn new(
        client_id: Uuid,
        laboratory_id: Uuid,
        items: Vec<ProsthesisItem>,
    ) -> Result<Self, DomainError> {
        let now = Utc::now();
        let order = Self {
            id: dentalab_shared::new_id(),
            client_id,
            laboratory_id,
            status: OrderStatus::Received,
            prosthesis: items.into_iter().map(ProsthesisItem::trimmed).collect(),
            created_at: now,
            updated_at: now,
            removed_at: None,
        };

        order.validate()?;
        Ok(order)
    }

    pub fn client_id(&self) -> Uuid {
        self.client_id
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn prosthesis(&self) -> &[ProsthesisItem] {
        &self.prosthesis
    }

    /// Replaces the line items. Allowed in every status and never moves the workflow.
    pub fn update_items(&mut self, items: Vec<ProsthesisItem>) -> Result<(), DomainError> {
        let mut next = self.clone();
        next.prosthesis = items.into_iter().map(ProsthesisItem::trimmed).collect();
        next.updated_at = Utc::now();

        next.validate()?;
        *self = next;
        Ok(())
    }

    /// The only way the status changes.
    pub fn transition_to(&mut self, target: OrderStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(target) {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl Entity for Order {
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

impl TenantOwned for Order {
    fn laboratory_id(&self) -> Uuid {
        self.laboratory_id
    }
}
