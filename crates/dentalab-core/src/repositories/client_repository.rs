//! Client repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use super::StorageError;
use crate::domain::Client;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn create(&self, client: &Client) -> Result<(), StorageError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Client>, StorageError>;
    /// Case-insensitive match within one laboratory only.
    async fn find_by_email(
        &self,
        laboratory_id: &Uuid,
        email: &str,
    ) -> Result<Option<Client>, StorageError>;
    async fn update(&self, client: &Client) -> Result<(), StorageError>;
    async fn delete(&self, id: &Uuid) -> Result<(), StorageError>;
    async fn list(&self, laboratory_id: &Uuid) -> Result<Vec<Client>, StorageError>;
}
