//! Order repository trait (port)
//!
//! Orders are never written back whole. Every change goes through
//! `update_with`, which applies an edit to the stored row under the storage
//! lock, so a status change cannot be overwritten by a concurrent item edit.

use async_trait::async_trait;
use uuid::Uuid;

use super::StorageError;
use crate::domain::Order;
use crate::error::DomainError;

/// Change applied to the live stored order. Returning an error leaves the row
/// untouched.
pub type OrderEdit = Box<dyn FnOnce(&mut Order) -> Result<(), DomainError> + Send>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, order: &Order) -> Result<(), StorageError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Order>, StorageError>;
    /// Applies `edit` to the live row and returns the stored result.
    /// `NotFound` if the row is absent or deleted; `Rejected` if the edit fails.
    async fn update_with(&self, id: &Uuid, edit: OrderEdit) -> Result<Order, StorageError>;
    async fn delete(&self, id: &Uuid) -> Result<(), StorageError>;
    async fn list(&self, laboratory_id: &Uuid) -> Result<Vec<Order>, StorageError>;
    async fn list_by_client(&self, client_id: &Uuid) -> Result<Vec<Order>, StorageError>;
}
