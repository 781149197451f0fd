//! Services wired to the in-memory adapters.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dentalab_core::domain::*;
use dentalab_core::repositories::{ClientRepository, OrderEdit, OrderRepository, StorageError};
use dentalab_core::services::{
    ClientService, LaboratoryService, OrderService, ProsthesisFilter, ProsthesisService,
    TechnicianService,
};
use dentalab_core::DomainError;
use dentalab_infrastructure::*;
use uuid::Uuid;

struct Harness {
    labs: Arc<InMemoryLaboratoryRepository>,
    clients: Arc<InMemoryClientRepository>,
    orders: Arc<InMemoryOrderRepository>,
    prostheses: Arc<InMemoryProsthesisRepository>,
    technicians: Arc<InMemoryTechnicianRepository>,
    laboratory: LaboratoryService,
    client: ClientService,
    order: OrderService,
    prosthesis: ProsthesisService,
    technician: TechnicianService,
}

fn harness() -> Harness {
    let labs = Arc::new(InMemoryLaboratoryRepository::new());
    let clients = Arc::new(InMemoryClientRepository::new());
    let orders = Arc::new(InMemoryOrderRepository::new());
    let prostheses = Arc::new(InMemoryProsthesisRepository::new());
    let technicians = Arc::new(InMemoryTechnicianRepository::new());

    Harness {
        laboratory: LaboratoryService::new(labs.clone()),
        client: ClientService::new(clients.clone(), labs.clone()),
        order: OrderService::new(orders.clone(), clients.clone()),
        prosthesis: ProsthesisService::new(prostheses.clone(), labs.clone()),
        technician: TechnicianService::new(technicians.clone(), labs.clone()),
        labs,
        clients,
        orders,
        prostheses,
        technicians,
    }
}

fn address() -> Address {
    Address {
        street: "10 Downing St".to_string(),
        city: "London".to_string(),
        state: "LDN".to_string(),
        postal_code: "SW1A 2AA".to_string(),
        country: "UK".to_string(),
    }
}

async fn signup(h: &Harness, email: &str) -> Laboratory {
    h.laboratory
        .create(LaboratoryProfile {
            name: "Lab".to_string(),
            email: email.to_string(),
            phone: "+442071234567".to_string(),
            address: address(),
        })
        .await
        .unwrap()
}

fn client_profile(email: &str) -> ClientProfile {
    ClientProfile {
        name: "Dr. Who".to_string(),
        email: email.to_string(),
        phone: "+447700900000".to_string(),
        address: address(),
    }
}

fn item(quantity: i32) -> ProsthesisItem {
    ProsthesisItem {
        kind: "crown".to_string(),
        material: "zirconia".to_string(),
        shade: Some("A1".to_string()),
        quantity,
        notes: None,
    }
}

fn tech_profile(email: &str) -> TechnicianProfile {
    TechnicianProfile {
        name: "Tess".to_string(),
        email: email.to_string(),
        phone: "+447700900111".to_string(),
        role: TechnicianRole::SeniorTechnician,
        specializations: vec![],
    }
}

#[tokio::test]
async fn order_lifecycle_end_to_end() {
    use dentalab_core::domain::OrderStatus::*;

    let h = harness();
    let lab = signup(&h, "l1@lab.com").await;
    let client = h.client.create(&lab.id, client_profile("c1@clinic.com")).await.unwrap();

    let order = h.order.create(&lab.id, &client.id, vec![item(1)]).await.unwrap();
    assert_eq!(order.status(), Received);
    assert_eq!(order.laboratory_id(), lab.id);

    h.order.update_status(&lab.id, &order.id, InProduction).await.unwrap();
    let err = h.order.update_status(&lab.id, &order.id, Delivered).await.unwrap_err();
    assert_eq!(
        err,
        DomainError::InvalidStatusTransition { from: InProduction, to: Delivered }
    );

    for status in [QualityCheck, Ready, Delivered] {
        h.order.update_status(&lab.id, &order.id, status).await.unwrap();
    }
    assert!(h.order.update_status(&lab.id, &order.id, Revision).await.is_err());
    assert_eq!(h.order.get(&lab.id, &order.id).await.unwrap().status(), Delivered);
}

#[tokio::test]
async fn cross_tenant_access_looks_like_missing() {
    let h = harness();
    let l1 = signup(&h, "l1@lab.com").await;
    let l2 = signup(&h, "l2@lab.com").await;

    let client = h.client.create(&l1.id, client_profile("c@clinic.com")).await.unwrap();
    let order = h.order.create(&l1.id, &client.id, vec![item(2)]).await.unwrap();
    let prosthesis = h
        .prosthesis
        .create(
            &l1.id,
            ProsthesisSpec {
                kind: ProsthesisType::Implant,
                material: "titanium".to_string(),
                shade: None,
                specifications: None,
                notes: None,
            },
        )
        .await
        .unwrap();
    let tech = h.technician.create(&l1.id, tech_profile("t@lab.com")).await.unwrap();

    let missing = Uuid::new_v4();
    let not_found = Err::<(), _>(DomainError::NotFound);

    assert_eq!(h.client.get(&l2.id, &client.id).await.map(|_| ()), not_found);
    assert_eq!(h.client.get(&l1.id, &missing).await.map(|_| ()), not_found);
    assert_eq!(
        h.client
            .update(&l2.id, &client.id, client_profile("hijack@clinic.com"))
            .await
            .map(|_| ()),
        not_found
    );
    assert_eq!(h.client.delete(&l2.id, &client.id).await, not_found);

    assert_eq!(h.order.get(&l2.id, &order.id).await.map(|_| ()), not_found);
    assert_eq!(
        h.order.update_items(&l2.id, &order.id, vec![item(1)]).await.map(|_| ()),
        not_found
    );
    assert_eq!(
        h.order
            .update_status(&l2.id, &order.id, OrderStatus::InProduction)
            .await
            .map(|_| ()),
        not_found
    );
    assert_eq!(h.order.delete(&l2.id, &order.id).await, not_found);
    assert_eq!(
        h.order.create(&l2.id, &client.id, vec![item(1)]).await.map(|_| ()),
        not_found
    );
    assert_eq!(h.order.list_by_client(&l2.id, &client.id).await.map(|_| ()), not_found);

    assert_eq!(h.prosthesis.get(&l2.id, &prosthesis.id).await.map(|_| ()), not_found);
    assert_eq!(
        h.prosthesis
            .update(
                &l2.id,
                &prosthesis.id,
                ProsthesisSpec {
                    kind: ProsthesisType::Crown,
                    material: "resin".to_string(),
                    shade: None,
                    specifications: None,
                    notes: None,
                },
            )
            .await
            .map(|_| ()),
        not_found
    );
    assert_eq!(h.prosthesis.delete(&l2.id, &prosthesis.id).await, not_found);

    assert_eq!(h.technician.get(&l2.id, &tech.id).await.map(|_| ()), not_found);
    assert_eq!(
        h.technician
            .update(&l2.id, &tech.id, tech_profile("hijack@lab.com"))
            .await
            .map(|_| ()),
        not_found
    );
    assert_eq!(h.technician.delete(&l2.id, &tech.id).await, not_found);

    assert_eq!(
        h.laboratory
            .update(
                &l2.id,
                &l1.id,
                LaboratoryProfile {
                    name: "Hijacked".to_string(),
                    email: "l1@lab.com".to_string(),
                    phone: "+442071234567".to_string(),
                    address: address(),
                },
            )
            .await
            .map(|_| ()),
        not_found
    );
    assert_eq!(h.laboratory.delete(&l2.id, &l1.id).await, not_found);

    // Stored rows are exactly what the owner wrote.
    let stored = h.clients.table().stored(&client.id).unwrap();
    assert_eq!(stored.email, "c@clinic.com");
    assert!(!stored.is_deleted());
    let stored = h.prostheses.table().stored(&prosthesis.id).unwrap();
    assert_eq!((stored.kind, stored.material.as_str()), (ProsthesisType::Implant, "titanium"));
    assert!(!stored.is_deleted());
    let stored = h.technicians.table().stored(&tech.id).unwrap();
    assert_eq!(stored.email, "t@lab.com");
    assert!(!stored.is_deleted());
    let stored = h.orders.table().stored(&order.id).unwrap();
    assert_eq!(stored.status(), OrderStatus::Received);
    assert!(!stored.is_deleted());
    let stored = h.labs.table().stored(&l1.id).unwrap();
    assert_eq!(stored.name, "Lab");
    assert!(!stored.is_deleted());

    // Lists filter instead of failing.
    assert!(h.client.list(&l2.id).await.unwrap().is_empty());
    assert!(h.order.list(&l2.id).await.unwrap().is_empty());
    assert!(h
        .prosthesis
        .list(&l2.id, ProsthesisFilter::default())
        .await
        .unwrap()
        .is_empty());
    assert!(h.technician.list(&l2.id, None).await.unwrap().is_empty());

    // Owner still sees everything untouched.
    assert_eq!(h.order.get(&l1.id, &order.id).await.unwrap().prosthesis()[0].quantity, 2);
}

#[tokio::test]
async fn soft_delete_hides_but_retains() {
    let h = harness();
    let lab = signup(&h, "l1@lab.com").await;
    let client = h.client.create(&lab.id, client_profile("c@clinic.com")).await.unwrap();

    h.client.delete(&lab.id, &client.id).await.unwrap();

    assert_eq!(h.client.get(&lab.id, &client.id).await.unwrap_err(), DomainError::NotFound);
    assert!(h.client.list(&lab.id).await.unwrap().is_empty());
    assert_eq!(h.client.delete(&lab.id, &client.id).await, Err(DomainError::NotFound));
    assert!(h.clients.table().stored(&client.id).unwrap().is_deleted());

    // The email is free again.
    h.client.create(&lab.id, client_profile("c@clinic.com")).await.unwrap();
    assert_eq!(h.clients.table().stored_len(), 2);
}

#[tokio::test]
async fn email_uniqueness_scopes() {
    let h = harness();
    let l1 = signup(&h, "l1@lab.com").await;
    let l2 = signup(&h, "l2@lab.com").await;

    h.client.create(&l1.id, client_profile("same@clinic.com")).await.unwrap();
    h.client.create(&l2.id, client_profile("same@clinic.com")).await.unwrap();
    let dup = h.client.create(&l1.id, client_profile("SAME@clinic.com")).await;
    assert!(matches!(dup, Err(DomainError::DuplicateEmail(_))));

    h.technician.create(&l1.id, tech_profile("t@lab.com")).await.unwrap();
    h.technician.create(&l2.id, tech_profile("t@lab.com")).await.unwrap();
    let dup = h.technician.create(&l2.id, tech_profile("t@lab.com")).await;
    assert!(matches!(dup, Err(DomainError::DuplicateEmail(_))));

    // Laboratory emails are global.
    let dup = h
        .laboratory
        .create(LaboratoryProfile {
            name: "Copycat".to_string(),
            email: "L1@lab.com".to_string(),
            phone: "+442071234567".to_string(),
            address: address(),
        })
        .await;
    assert!(matches!(dup, Err(DomainError::DuplicateEmail(_))));

    // Deleted laboratories release their email.
    h.laboratory.delete(&l1.id, &l1.id).await.unwrap();
    signup(&h, "l1@lab.com").await;
    assert_eq!(h.labs.table().stored_len(), 3);
}

#[tokio::test]
async fn invalid_orders_are_rejected_with_every_violation() {
    let h = harness();
    let lab = signup(&h, "l1@lab.com").await;
    let client = h.client.create(&lab.id, client_profile("c@clinic.com")).await.unwrap();

    let Err(DomainError::InvalidInput(errors)) = h.order.create(&lab.id, &client.id, vec![]).await
    else {
        panic!("expected InvalidInput");
    };
    assert_eq!(
        errors.message_for("prosthesis"),
        Some("at least one prosthesis item is required")
    );

    let Err(DomainError::InvalidInput(errors)) =
        h.order.create(&lab.id, &client.id, vec![item(0)]).await
    else {
        panic!("expected InvalidInput");
    };
    assert_eq!(
        errors.message_for("prosthesis[0].quantity"),
        Some("quantity must be greater than 0")
    );
    assert!(h.order.list(&lab.id).await.unwrap().is_empty());
    assert_eq!(h.orders.table().stored_len(), 0);
}

#[tokio::test]
async fn returned_values_are_independent_copies() {
    let h = harness();
    let lab = signup(&h, "l1@lab.com").await;
    let client = h.client.create(&lab.id, client_profile("c@clinic.com")).await.unwrap();

    let mut copy = h.client.get(&lab.id, &client.id).await.unwrap();
    copy.name = "Mallory".to_string();

    assert_eq!(h.client.get(&lab.id, &client.id).await.unwrap().name, "Dr. Who");
}

#[tokio::test]
async fn filtered_lists() {
    let h = harness();
    let lab = signup(&h, "l1@lab.com").await;

    for (kind, material) in [
        (ProsthesisType::Crown, "Zirconia"),
        (ProsthesisType::Crown, "gold"),
        (ProsthesisType::Veneer, "zirconia"),
    ] {
        h.prosthesis
            .create(
                &lab.id,
                ProsthesisSpec {
                    kind,
                    material: material.to_string(),
                    shade: None,
                    specifications: None,
                    notes: None,
                },
            )
            .await
            .unwrap();
    }

    let crowns = h
        .prosthesis
        .list(&lab.id, ProsthesisFilter { kind: Some(ProsthesisType::Crown), material: None })
        .await
        .unwrap();
    assert_eq!(crowns.len(), 2);

    let zirconia = h
        .prosthesis
        .list(&lab.id, ProsthesisFilter { kind: None, material: Some("ZIRCONIA".to_string()) })
        .await
        .unwrap();
    assert_eq!(zirconia.len(), 2);

    h.technician.create(&lab.id, tech_profile("a@lab.com")).await.unwrap();
    h.technician
        .create(
            &lab.id,
            TechnicianProfile { role: TechnicianRole::Apprentice, ..tech_profile("b@lab.com") },
        )
        .await
        .unwrap();
    let apprentices = h
        .technician
        .list(&lab.id, Some(TechnicianRole::Apprentice))
        .await
        .unwrap();
    assert_eq!(apprentices.len(), 1);

    let client = h.client.create(&lab.id, client_profile("c@clinic.com")).await.unwrap();
    let other = h.client.create(&lab.id, client_profile("d@clinic.com")).await.unwrap();
    h.order.create(&lab.id, &client.id, vec![item(1)]).await.unwrap();
    h.order.create(&lab.id, &other.id, vec![item(1)]).await.unwrap();
    assert_eq!(h.order.list_by_client(&lab.id, &client.id).await.unwrap().len(), 1);
    assert_eq!(h.order.list(&lab.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn deleted_laboratory_cannot_own_new_rows() {
    let h = harness();
    let lab = signup(&h, "l1@lab.com").await;
    h.laboratory.delete(&lab.id, &lab.id).await.unwrap();

    assert_eq!(
        h.client.create(&lab.id, client_profile("c@clinic.com")).await.unwrap_err(),
        DomainError::NotFound
    );
    assert_eq!(
        h.technician.create(&lab.id, tech_profile("t@lab.com")).await.unwrap_err(),
        DomainError::NotFound
    );
}

/// Order store that lands a status change on the row just before the next
/// edit is applied, as a concurrent request would.
struct TransitionLandsFirst {
    inner: Arc<InMemoryOrderRepository>,
    target: OrderStatus,
    fired: AtomicBool,
}

#[async_trait]
impl OrderRepository for TransitionLandsFirst {
    async fn create(&self, order: &Order) -> Result<(), StorageError> {
        self.inner.create(order).await
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Order>, StorageError> {
        self.inner.find_by_id(id).await
    }

    async fn update_with(&self, id: &Uuid, edit: OrderEdit) -> Result<Order, StorageError> {
        if !self.fired.swap(true, Ordering::SeqCst) {
            let target = self.target;
            self.inner
                .update_with(id, Box::new(move |order: &mut Order| order.transition_to(target)))
                .await?;
        }
        self.inner.update_with(id, edit).await
    }

    async fn delete(&self, id: &Uuid) -> Result<(), StorageError> {
        self.inner.delete(id).await
    }

    async fn list(&self, laboratory_id: &Uuid) -> Result<Vec<Order>, StorageError> {
        self.inner.list(laboratory_id).await
    }

    async fn list_by_client(&self, client_id: &Uuid) -> Result<Vec<Order>, StorageError> {
        self.inner.list_by_client(client_id).await
    }
}

#[tokio::test]
async fn item_edit_keeps_status_changed_under_it() {
    let h = harness();
    let lab = signup(&h, "l1@lab.com").await;
    let client = h.client.create(&lab.id, client_profile("c@clinic.com")).await.unwrap();
    let order = h.order.create(&lab.id, &client.id, vec![item(1)]).await.unwrap();

    let racing = OrderService::new(
        Arc::new(TransitionLandsFirst {
            inner: h.orders.clone(),
            target: OrderStatus::InProduction,
            fired: AtomicBool::new(false),
        }),
        h.clients.clone(),
    );
    let edited = racing.update_items(&lab.id, &order.id, vec![item(4)]).await.unwrap();

    assert_eq!(edited.status(), OrderStatus::InProduction);
    let stored = h.order.get(&lab.id, &order.id).await.unwrap();
    assert_eq!(stored.status(), OrderStatus::InProduction);
    assert_eq!(stored.prosthesis()[0].quantity, 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_item_edits_never_undo_transitions() {
    use dentalab_core::domain::OrderStatus::*;

    let h = Arc::new(harness());
    let lab = signup(&h, "l1@lab.com").await;
    let client = h.client.create(&lab.id, client_profile("c@clinic.com")).await.unwrap();
    let order = h.order.create(&lab.id, &client.id, vec![item(1)]).await.unwrap();
    let (lab_id, order_id) = (lab.id, order.id);

    let editors: Vec<_> = (0..4)
        .map(|n| {
            let h = h.clone();
            tokio::spawn(async move {
                for q in 1..=50 {
                    h.order
                        .update_items(&lab_id, &order_id, vec![item(n * 100 + q)])
                        .await
                        .unwrap();
                    tokio::task::yield_now().await;
                }
            })
        })
        .collect();

    for status in [InProduction, QualityCheck, Revision, InProduction, QualityCheck, Ready, Delivered] {
        h.order.update_status(&lab.id, &order.id, status).await.unwrap();
        tokio::task::yield_now().await;
    }
    for editor in editors {
        editor.await.unwrap();
    }

    assert_eq!(h.order.get(&lab.id, &order.id).await.unwrap().status(), Delivered);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_cannot_share_an_email() {
    let h = Arc::new(harness());
    let lab_id = signup(&h, "l1@lab.com").await.id;

    let attempts: Vec<_> = (0..8)
        .map(|_| {
            let h = h.clone();
            tokio::spawn(async move { h.client.create(&lab_id, client_profile("same@clinic.com")).await })
        })
        .collect();

    let mut created = 0;
    for attempt in attempts {
        match attempt.await.unwrap() {
            Ok(_) => created += 1,
            Err(err) => assert!(matches!(err, DomainError::DuplicateEmail(_))),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(h.client.list(&lab_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn storage_rejects_duplicate_emails_on_its_own() {
    let h = harness();
    let l1 = signup(&h, "l1@lab.com").await;
    let l2 = signup(&h, "l2@lab.com").await;

    let first = Client::new(l1.id, client_profile("dup@clinic.com")).unwrap();
    let second = Client::new(l1.id, client_profile("DUP@clinic.com")).unwrap();
    let elsewhere = Client::new(l2.id, client_profile("dup@clinic.com")).unwrap();

    h.clients.create(&first).await.unwrap();
    assert_eq!(
        h.clients.create(&second).await,
        Err(StorageError::DuplicateEmail("DUP@clinic.com".to_string()))
    );
    h.clients.create(&elsewhere).await.unwrap();

    // Moving a row onto a taken email is refused as well.
    let mut renamed = Client::new(l1.id, client_profile("other@clinic.com")).unwrap();
    h.clients.create(&renamed).await.unwrap();
    renamed.update(client_profile("dup@clinic.com")).unwrap();
    assert!(matches!(
        h.clients.update(&renamed).await,
        Err(StorageError::DuplicateEmail(_))
    ));
}
