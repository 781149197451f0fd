// ============================================================================
// Dentalab Infrastructure - In-Memory Client Repository
// File: crates/dentalab-infrastructure/src/memory/client_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use dentalab_core::domain::{Client, TenantOwned};
use dentalab_core::repositories::{ClientRepository, StorageError};

use super::{same_email, MemoryTable};

#[derive(Default)]
pub struct InMemoryClientRepository {
    table: MemoryTable<Client>,
}

impl InMemoryClientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> &MemoryTable<Client> {
        &self.table
    }
}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
    async fn create(&self, client: &Client) -> Result<(), StorageError> {
        self.table.insert_unless(
            client,
            |c| same_scope(c, client),
            || StorageError::DuplicateEmail(client.email.clone()),
        )?;
        debug!(client_id = %client.id, "Stored client");
        Ok(())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Client>, StorageError> {
        Ok(self.table.get(id))
    }

    async fn find_by_email(
        &self,
        laboratory_id: &Uuid,
        email: &str,
    ) -> Result<Option<Client>, StorageError> {
        Ok(self
            .table
            .find(|c| c.laboratory_id() == *laboratory_id && same_email(&c.email, email)))
    }

    async fn update(&self, client: &Client) -> Result<(), StorageError> {
        self.table.replace_unless(
            client,
            |c| same_scope(c, client),
            || StorageError::DuplicateEmail(client.email.clone()),
        )
    }

    async fn delete(&self, id: &Uuid) -> Result<(), StorageError> {
        self.table.soft_delete(id)
    }

    async fn list(&self, laboratory_id: &Uuid) -> Result<Vec<Client>, StorageError> {
        Ok(self.table.select(|c| c.laboratory_id() == *laboratory_id))
    }
}

/// Same laboratory and same email.
fn same_scope(stored: &Client, wanted: &Client) -> bool {
    stored.laboratory_id() == wanted.laboratory_id() && same_email(&stored.email, &wanted.email)
}
