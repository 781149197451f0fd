use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use dentalab_core::domain::{Order, TenantOwned};
use dentalab_core::repositories::{OrderEdit, OrderRepository, StorageError};

use super::MemoryTable;

#[derive(Default)]
pub struct InMemoryOrderRepository {
    table: MemoryTable<Order>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> &MemoryTable<Order> {
        &self.table
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: &Order) -> Result<(), StorageError> {
        self.table.insert(order)?;
        debug!(order_id = %order.id, status = %order.status(), "Stored order");
        Ok(())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Order>, StorageError> {
        Ok(self.table.get(id))
    }

    async fn update_with(&self, id: &Uuid, edit: OrderEdit) -> Result<Order, StorageError> {
        let order = self
            .table
            .modify(id, |order| edit(order).map_err(StorageError::Rejected))?;
        debug!(order_id = %order.id, status = %order.status(), "Stored order edit");
        Ok(order)
    }

    async fn delete(&self, id: &Uuid) -> Result<(), StorageError> {
        self.table.soft_delete(id)
    }

    async fn list(&self, laboratory_id: &Uuid) -> Result<Vec<Order>, StorageError> {
        Ok(self.table.select(|o| o.laboratory_id() == *laboratory_id))
    }

    async fn list_by_client(&self, client_id: &Uuid) -> Result<Vec<Order>, StorageError> {
        Ok(self.table.select(|o| o.client_id() == *client_id))
    }
}
