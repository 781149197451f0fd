use chrono::{DateTime, Utc};
use dentalab_core::domain::{Order, OrderStatus, ProsthesisItem, TenantOwned};
use dentalab_core::{DomainError, FieldErrors};
use dentalab_shared::utils::parse_uuid;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::merge_violations;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProsthesisItemRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub material: String,
    pub shade: Option<String>,
    pub quantity: i32,
    pub notes: Option<String>,
}

impl From<ProsthesisItemRequest> for ProsthesisItem {
    fn from(req: ProsthesisItemRequest) -> Self {
        Self {
            kind: req.kind,
            material: req.material,
            shade: req.shade.filter(|s| !s.trim().is_empty()),
            quantity: req.quantity,
            notes: req.notes.filter(|s| !s.trim().is_empty()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateOrderRequest {
    pub client_id: String,
    pub prosthesis: Vec<ProsthesisItemRequest>,
}

impl CreateOrderRequest {
    /// Client id and line items. A bad `client_id` is reported together with
    /// every line-item violation.
    pub fn into_parts(self) -> Result<(Uuid, Vec<ProsthesisItem>), DomainError> {
        let client_id = self.client_id();
        let items: Vec<ProsthesisItem> = self.prosthesis.into_iter().map(Into::into).collect();
        match client_id {
            Ok(id) => Ok((id, items)),
            Err(e) => Err(merge_violations(e, Order::new(Uuid::nil(), Uuid::nil(), items))),
        }
    }

    fn client_id(&self) -> Result<Uuid, DomainError> {
        if self.client_id.trim().is_empty() {
            return Err(DomainError::InvalidInput(FieldErrors::single(
                "client_id",
                "client_id is required",
            )));
        }
        parse_uuid(&self.client_id).ok_or_else(|| {
            DomainError::InvalidInput(FieldErrors::single("client_id", "invalid client_id"))
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateOrderRequest {
    pub prosthesis: Vec<ProsthesisItemRequest>,
}

impl UpdateOrderRequest {
    pub fn into_items(self) -> Vec<ProsthesisItem> {
        self.prosthesis.into_iter().map(Into::into).collect()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

impl UpdateOrderStatusRequest {
    /// Unknown strings are rejected here and never reach the workflow.
    pub fn status(&self) -> Result<OrderStatus, DomainError> {
        let raw = self.status.trim();
        if raw.is_empty() {
            return Err(DomainError::InvalidInput(FieldErrors::single(
                "status",
                "status is required",
            )));
        }
        OrderStatus::parse(raw)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub client_id: Uuid,
    pub laboratory_id: Uuid,
    pub status: OrderStatus,
    pub prosthesis: Vec<ProsthesisItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            client_id: order.client_id(),
            laboratory_id: order.laboratory_id(),
            status: order.status(),
            prosthesis: order.prosthesis().to_vec(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}
