//! Prosthesis catalog repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use super::StorageError;
use crate::domain::{Prosthesis, ProsthesisType};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProsthesisRepository: Send + Sync {
    async fn create(&self, prosthesis: &Prosthesis) -> Result<(), StorageError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Prosthesis>, StorageError>;
    async fn update(&self, prosthesis: &Prosthesis) -> Result<(), StorageError>;
    async fn delete(&self, id: &Uuid) -> Result<(), StorageError>;
    async fn list(&self, laboratory_id: &Uuid) -> Result<Vec<Prosthesis>, StorageError>;
    async fn find_by_type(
        &self,
        laboratory_id: &Uuid,
        kind: ProsthesisType,
    ) -> Result<Vec<Prosthesis>, StorageError>;
    /// Case-insensitive exact match on material.
    async fn find_by_material(
        &self,
        laboratory_id: &Uuid,
        material: &str,
    ) -> Result<Vec<Prosthesis>, StorageError>;
}
