use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use dentalab_core::domain::{Technician, TechnicianRole, TenantOwned};
use dentalab_core::repositories::{StorageError, TechnicianRepository};

use super::{same_email, MemoryTable};

#[derive(Default)]
pub struct InMemoryTechnicianRepository {
    table: MemoryTable<Technician>,
}

impl InMemoryTechnicianRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> &MemoryTable<Technician> {
        &self.table
    }
}

#[async_trait]
impl TechnicianRepository for InMemoryTechnicianRepository {
    async fn create(&self, technician: &Technician) -> Result<(), StorageError> {
        self.table.insert_unless(
            technician,
            |t| same_scope(t, technician),
            || StorageError::DuplicateEmail(technician.email.clone()),
        )?;
        debug!(technician_id = %technician.id, "Stored technician");
        Ok(())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Technician>, StorageError> {
        Ok(self.table.get(id))
    }

    async fn find_by_email(
        &self,
        laboratory_id: &Uuid,
        email: &str,
    ) -> Result<Option<Technician>, StorageError> {
        Ok(self
            .table
            .find(|t| t.laboratory_id() == *laboratory_id && same_email(&t.email, email)))
    }

    async fn update(&self, technician: &Technician) -> Result<(), StorageError> {
        self.table.replace_unless(
            technician,
            |t| same_scope(t, technician),
            || StorageError::DuplicateEmail(technician.email.clone()),
        )
    }

    async fn delete(&self, id: &Uuid) -> Result<(), StorageError> {
        self.table.soft_delete(id)
    }

    async fn list(&self, laboratory_id: &Uuid) -> Result<Vec<Technician>, StorageError> {
        Ok(self.table.select(|t| t.laboratory_id() == *laboratory_id))
    }

    async fn list_by_role(
        &self,
        laboratory_id: &Uuid,
        role: TechnicianRole,
    ) -> Result<Vec<Technician>, StorageError> {
        Ok(self
            .table
            .select(|t| t.laboratory_id() == *laboratory_id && t.role == role))
    }
}

/// Same laboratory and same email.
fn same_scope(stored: &Technician, wanted: &Technician) -> bool {
    stored.laboratory_id() == wanted.laboratory_id() && same_email(&stored.email, &wanted.email)
}
