// ============================================================================
// Dentalab Core - Order Service
// File: crates/dentalab-core/src/services/order_service.rs
// ============================================================================
//! Work order use cases and the status workflow

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{Order, OrderStatus, ProsthesisItem, TenantOwned};
use crate::error::DomainError;
use crate::repositories::{ClientRepository, OrderRepository};
use crate::tenancy;

pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
    clients: Arc<dyn ClientRepository>,
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrderRepository>, clients: Arc<dyn ClientRepository>) -> Self {
        Self { repo, clients }
    }

    /// The order's laboratory comes from the client, never from the request.
    pub async fn create(
        &self,
        caller: &Uuid,
        client_id: &Uuid,
        items: Vec<ProsthesisItem>,
    ) -> Result<Order, DomainError> {
        let client = tenancy::scoped(self.clients.find_by_id(client_id).await?, *caller)?;
        let order = Order::new(client.id, client.laboratory_id(), items)?;

        self.repo.create(&order).await?;
        info!(
            order_id = %order.id,
            client_id = %client.id,
            laboratory_id = %order.laboratory_id(),
            "Order created"
        );
        Ok(order)
    }

    pub async fn get(&self, caller: &Uuid, id: &Uuid) -> Result<Order, DomainError> {
        tenancy::scoped(self.repo.find_by_id(id).await?, *caller)
    }

    pub async fn list(&self, caller: &Uuid) -> Result<Vec<Order>, DomainError> {
        Ok(self.repo.list(caller).await?)
    }

    pub async fn list_by_client(
        &self,
        caller: &Uuid,
        client_id: &Uuid,
    ) -> Result<Vec<Order>, DomainError> {
        let client = tenancy::scoped(self.clients.find_by_id(client_id).await?, *caller)?;
        let orders = self.repo.list_by_client(&client.id).await?;
        Ok(orders
            .into_iter()
            .filter(|o| o.laboratory_id() == *caller)
            .collect())
    }

    /// Replaces line items. The edit runs against the stored row, so a status
    /// change that lands first is kept.
    pub async fn update_items(
        &self,
        caller: &Uuid,
        id: &Uuid,
        items: Vec<ProsthesisItem>,
    ) -> Result<Order, DomainError> {
        let caller = *caller;
        let order = self
            .repo
            .update_with(
                id,
                Box::new(move |order: &mut Order| {
                    tenancy::ensure_scoped(order, caller)?;
                    order.update_items(items)
                }),
            )
            .await?;
        info!(order_id = %order.id, items = order.prosthesis().len(), "Order items updated");
        Ok(order)
    }

    pub async fn update_status(
        &self,
        caller: &Uuid,
        id: &Uuid,
        target: OrderStatus,
    ) -> Result<Order, DomainError> {
        let caller = *caller;
        let result = self
            .repo
            .update_with(
                id,
                Box::new(move |order: &mut Order| {
                    tenancy::ensure_scoped(order, caller)?;
                    order.transition_to(target)
                }),
            )
            .await
            .map_err(DomainError::from);

        match result {
            Ok(order) => {
                info!(order_id = %order.id, to = %target, "Order status changed");
                Ok(order)
            }
            Err(err) => {
                if let DomainError::InvalidStatusTransition { from, to } = &err {
                    warn!(order_id = %id, from = %from, to = %to, "Status transition rejected");
                }
                Err(err)
            }
        }
    }

    pub async fn delete(&self, caller: &Uuid, id: &Uuid) -> Result<(), DomainError> {
        let order = self.get(caller, id).await?;
        self.repo.delete(&order.id).await?;
        info!(order_id = %order.id, "Order deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Entity;
    use crate::repositories::{MockClientRepository, MockOrderRepository, StorageError};
    use crate::services::fixtures;

    /// Order store holding one row; edits run against a fresh copy of it.
    fn stored(order: Order) -> MockOrderRepository {
        let mut repo = MockOrderRepository::new();
        repo.expect_update_with().returning(move |_, edit| {
            let mut row = order.clone();
            edit(&mut row).map_err(StorageError::Rejected)?;
            Ok(row)
        });
        repo
    }

    #[tokio::test]
    async fn test_create_takes_laboratory_from_client() {
        let lab = Uuid::new_v4();
        let client = fixtures::client(lab);
        let client_id = client.id;

        let mut clients = MockClientRepository::new();
        clients
            .expect_find_by_id()
            .returning(move |_| Ok(Some(client.clone())));
        let mut repo = MockOrderRepository::new();
        repo.expect_create()
            .withf(move |o| o.laboratory_id() == lab && o.status() == OrderStatus::Received)
            .times(1)
            .returning(|_| Ok(()));

        let service = OrderService::new(Arc::new(repo), Arc::new(clients));
        let order = service
            .create(&lab, &client_id, vec![fixtures::item(1)])
            .await
            .unwrap();
        assert_eq!(order.client_id(), client_id);
    }

    #[tokio::test]
    async fn test_create_for_foreign_client_is_not_found() {
        let client = fixtures::client(Uuid::new_v4());
        let client_id = client.id;

        let mut clients = MockClientRepository::new();
        clients
            .expect_find_by_id()
            .returning(move |_| Ok(Some(client.clone())));
        let mut repo = MockOrderRepository::new();
        repo.expect_create().never();

        let service = OrderService::new(Arc::new(repo), Arc::new(clients));
        let err = service
            .create(&Uuid::new_v4(), &client_id, vec![fixtures::item(1)])
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[tokio::test]
    async fn test_create_for_deleted_client_is_not_found() {
        let lab = Uuid::new_v4();
        let mut client = fixtures::client(lab);
        client.soft_delete();
        let client_id = client.id;

        let mut clients = MockClientRepository::new();
        clients
            .expect_find_by_id()
            .returning(move |_| Ok(Some(client.clone())));

        let service = OrderService::new(Arc::new(MockOrderRepository::new()), Arc::new(clients));
        let err = service
            .create(&lab, &client_id, vec![fixtures::item(1)])
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[tokio::test]
    async fn test_invalid_transition_is_rejected() {
        let lab = Uuid::new_v4();
        let order = fixtures::order(&fixtures::client(lab));
        let id = order.id;

        let service = OrderService::new(Arc::new(stored(order)), Arc::new(MockClientRepository::new()));
        let err = service
            .update_status(&lab, &id, OrderStatus::Delivered)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidStatusTransition {
                from: OrderStatus::Received,
                to: OrderStatus::Delivered,
            }
        );
    }

    #[tokio::test]
    async fn test_valid_transition_is_applied_to_stored_row() {
        let lab = Uuid::new_v4();
        let order = fixtures::order(&fixtures::client(lab));
        let id = order.id;

        let service = OrderService::new(Arc::new(stored(order)), Arc::new(MockClientRepository::new()));
        let order = service
            .update_status(&lab, &id, OrderStatus::InProduction)
            .await
            .unwrap();
        assert_eq!(order.status(), OrderStatus::InProduction);
    }

    #[tokio::test]
    async fn test_foreign_order_status_change_is_not_found() {
        let order = fixtures::order(&fixtures::client(Uuid::new_v4()));
        let id = order.id;

        let service = OrderService::new(Arc::new(stored(order)), Arc::new(MockClientRepository::new()));
        let err = service
            .update_status(&Uuid::new_v4(), &id, OrderStatus::InProduction)
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[tokio::test]
    async fn test_update_items_rejects_zero_quantity() {
        let lab = Uuid::new_v4();
        let order = fixtures::order(&fixtures::client(lab));
        let id = order.id;

        let service = OrderService::new(Arc::new(stored(order)), Arc::new(MockClientRepository::new()));
        let err = service
            .update_items(&lab, &id, vec![fixtures::item(0)])
            .await
            .unwrap_err();

        let DomainError::InvalidInput(errors) = err else {
            panic!("expected InvalidInput");
        };
        assert!(errors.has_field("prosthesis[0].quantity"));
    }

    #[tokio::test]
    async fn test_update_items_keeps_stored_status() {
        let lab = Uuid::new_v4();
        let mut order = fixtures::order(&fixtures::client(lab));
        order.transition_to(OrderStatus::InProduction).unwrap();
        let id = order.id;

        let service = OrderService::new(Arc::new(stored(order)), Arc::new(MockClientRepository::new()));
        let updated = service
            .update_items(&lab, &id, vec![fixtures::item(3)])
            .await
            .unwrap();

        assert_eq!(updated.status(), OrderStatus::InProduction);
        assert_eq!(updated.prosthesis()[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_update_of_missing_order_is_not_found() {
        let mut repo = MockOrderRepository::new();
        repo.expect_update_with()
            .returning(|_, _| Err(StorageError::NotFound));

        let service = OrderService::new(Arc::new(repo), Arc::new(MockClientRepository::new()));
        let err = service
            .update_items(&Uuid::new_v4(), &Uuid::new_v4(), vec![fixtures::item(1)])
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[tokio::test]
    async fn test_list_by_foreign_client_is_not_found() {
        let client = fixtures::client(Uuid::new_v4());
        let client_id = client.id;

        let mut clients = MockClientRepository::new();
        clients
            .expect_find_by_id()
            .returning(move |_| Ok(Some(client.clone())));
        let mut repo = MockOrderRepository::new();
        repo.expect_list_by_client().never();

        let service = OrderService::new(Arc::new(repo), Arc::new(clients));
        let err = service
            .list_by_client(&Uuid::new_v4(), &client_id)
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }
}
