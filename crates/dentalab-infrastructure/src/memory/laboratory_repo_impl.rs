// ============================================================================
// Dentalab Infrastructure - In-Memory Laboratory Repository
// File: crates/dentalab-infrastructure/src/memory/laboratory_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use dentalab_core::domain::Laboratory;
use dentalab_core::repositories::{LaboratoryRepository, StorageError};

use super::{same_email, MemoryTable};

#[derive(Default)]
pub struct InMemoryLaboratoryRepository {
    table: MemoryTable<Laboratory>,
}

impl InMemoryLaboratoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> &MemoryTable<Laboratory> {
        &self.table
    }
}

#[async_trait]
impl LaboratoryRepository for InMemoryLaboratoryRepository {
    async fn create(&self, laboratory: &Laboratory) -> Result<(), StorageError> {
        self.table.insert_unless(
            laboratory,
            |lab| same_email(&lab.email, &laboratory.email),
            || StorageError::DuplicateEmail(laboratory.email.clone()),
        )?;
        debug!(laboratory_id = %laboratory.id, "Stored laboratory");
        Ok(())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Laboratory>, StorageError> {
        Ok(self.table.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Laboratory>, StorageError> {
        Ok(self.table.find(|lab| same_email(&lab.email, email)))
    }

    async fn update(&self, laboratory: &Laboratory) -> Result<(), StorageError> {
        self.table.replace_unless(
            laboratory,
            |lab| same_email(&lab.email, &laboratory.email),
            || StorageError::DuplicateEmail(laboratory.email.clone()),
        )
    }

    async fn delete(&self, id: &Uuid) -> Result<(), StorageError> {
        self.table.soft_delete(id)
    }

    async fn list(&self) -> Result<Vec<Laboratory>, StorageError> {
        Ok(self.table.select(|_| true))
    }
}
