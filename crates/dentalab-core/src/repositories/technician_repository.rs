//! Technician repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use super::StorageError;
use crate::domain::{Technician, TechnicianRole};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TechnicianRepository: Send + Sync {
    async fn create(&self, technician: &Technician) -> Result<(), StorageError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Technician>, StorageError>;
    async fn find_by_email(
        &self,
        laboratory_id: &Uuid,
        email: &str,
    ) -> Result<Option<Technician>, StorageError>;
    async fn update(&self, technician: &Technician) -> Result<(), StorageError>;
    async fn delete(&self, id: &Uuid) -> Result<(), StorageError>;
    async fn list(&self, laboratory_id: &Uuid) -> Result<Vec<Technician>, StorageError>;
    async fn list_by_role(
        &self,
        laboratory_id: &Uuid,
        role: TechnicianRole,
    ) -> Result<Vec<Technician>, StorageError>;
}
