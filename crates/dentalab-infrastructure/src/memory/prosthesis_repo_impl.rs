use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use dentalab_core::domain::{Prosthesis, ProsthesisType, TenantOwned};
use dentalab_core::repositories::{ProsthesisRepository, StorageError};

use super::MemoryTable;

#[derive(Default)]
pub struct InMemoryProsthesisRepository {
    table: MemoryTable<Prosthesis>,
}

impl InMemoryProsthesisRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> &MemoryTable<Prosthesis> {
        &self.table
    }
}

#[async_trait]
impl ProsthesisRepository for InMemoryProsthesisRepository {
    async fn create(&self, prosthesis: &Prosthesis) -> Result<(), StorageError> {
        self.table.insert(prosthesis)?;
        debug!(prosthesis_id = %prosthesis.id, "Stored prosthesis");
        Ok(())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Prosthesis>, StorageError> {
        Ok(self.table.get(id))
    }

    async fn update(&self, prosthesis: &Prosthesis) -> Result<(), StorageError> {
        self.table.replace(prosthesis)
    }

    async fn delete(&self, id: &Uuid) -> Result<(), StorageError> {
        self.table.soft_delete(id)
    }

    async fn list(&self, laboratory_id: &Uuid) -> Result<Vec<Prosthesis>, StorageError> {
        Ok(self.table.select(|p| p.laboratory_id() == *laboratory_id))
    }

    async fn find_by_type(
        &self,
        laboratory_id: &Uuid,
        kind: ProsthesisType,
    ) -> Result<Vec<Prosthesis>, StorageError> {
        Ok(self
            .table
            .select(|p| p.laboratory_id() == *laboratory_id && p.kind == kind))
    }

    async fn find_by_material(
        &self,
        laboratory_id: &Uuid,
        material: &str,
    ) -> Result<Vec<Prosthesis>, StorageError> {
        let material = material.trim();
        Ok(self.table.select(|p| {
            p.laboratory_id() == *laboratory_id && p.material.eq_ignore_ascii_case(material)
        }))
    }
}
