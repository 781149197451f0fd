//! Laboratory repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use super::StorageError;
use crate::domain::Laboratory;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LaboratoryRepository: Send + Sync {
    async fn create(&self, laboratory: &Laboratory) -> Result<(), StorageError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Laboratory>, StorageError>;
    /// Case-insensitive match across every live laboratory.
    async fn find_by_email(&self, email: &str) -> Result<Option<Laboratory>, StorageError>;
    async fn update(&self, laboratory: &Laboratory) -> Result<(), StorageError>;
    /// Soft delete. `NotFound` if the row is absent or already deleted.
    async fn delete(&self, id: &Uuid) -> Result<(), StorageError>;
    async fn list(&self) -> Result<Vec<Laboratory>, StorageError>;
}
