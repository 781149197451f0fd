//! Client use cases, scoped to the caller's laboratory

use std::sync::Arc;

use dentalab_shared::utils::{mask_email, normalize_email};
use tracing::{info, warn};
use uuid::Uuid;

use super::require_laboratory;
use crate::domain::{Client, ClientProfile};
use crate::error::DomainError;
use crate::repositories::{ClientRepository, LaboratoryRepository};
use crate::tenancy;

pub struct ClientService {
    repo: Arc<dyn ClientRepository>,
    laboratories: Arc<dyn LaboratoryRepository>,
}

impl ClientService {
    pub fn new(
        repo: Arc<dyn ClientRepository>,
        laboratories: Arc<dyn LaboratoryRepository>,
    ) -> Self {
        Self { repo, laboratories }
    }

    pub async fn create(&self, caller: &Uuid, profile: ClientProfile) -> Result<Client, DomainError> {
        require_laboratory(self.laboratories.as_ref(), caller).await?;
        let client = Client::new(*caller, profile)?;

        if self
            .repo
            .find_by_email(caller, &normalize_email(&client.email))
            .await?
            .is_some()
        {
            warn!(laboratory_id = %caller, "Client email taken: {}", mask_email(&client.email));
            return Err(DomainError::DuplicateEmail(client.email));
        }

        self.repo.create(&client).await?;
        info!(client_id = %client.id, laboratory_id = %caller, "Client created");
        Ok(client)
    }

    pub async fn get(&self, caller: &Uuid, id: &Uuid) -> Result<Client, DomainError> {
        tenancy::scoped(self.repo.find_by_id(id).await?, *caller)
    }

    pub async fn list(&self, caller: &Uuid) -> Result<Vec<Client>, DomainError> {
        Ok(self.repo.list(caller).await?)
    }

    pub async fn update(
        &self,
        caller: &Uuid,
        id: &Uuid,
        profile: ClientProfile,
    ) -> Result<Client, DomainError> {
        let mut client = self.get(caller, id).await?;

        if normalize_email(&profile.email) != normalize_email(&client.email) {
            let taken = self
                .repo
                .find_by_email(caller, &normalize_email(&profile.email))
                .await?;
            if matches!(taken, Some(other) if other.id != client.id) {
                warn!(laboratory_id = %caller, "Client email taken: {}", mask_email(&profile.email));
                return Err(DomainError::DuplicateEmail(profile.email.trim().to_string()));
            }
        }

        client.update(profile)?;
        self.repo.update(&client).await?;
        info!(client_id = %client.id, "Client updated");
        Ok(client)
    }

    pub async fn delete(&self, caller: &Uuid, id: &Uuid) -> Result<(), DomainError> {
        let client = self.get(caller, id).await?;
        self.repo.delete(&client.id).await?;
        info!(client_id = %client.id, "Client deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Laboratory, TenantOwned};
    use crate::repositories::{MockClientRepository, MockLaboratoryRepository, StorageError};
    use crate::services::fixtures;

    fn labs_with(lab: Option<Laboratory>) -> MockLaboratoryRepository {
        let mut labs = MockLaboratoryRepository::new();
        labs.expect_find_by_id().returning(move |_| Ok(lab.clone()));
        labs
    }

    #[tokio::test]
    async fn test_create_under_caller_laboratory() {
        let lab = fixtures::laboratory();
        let caller = lab.id;
        let mut repo = MockClientRepository::new();
        repo.expect_find_by_email()
            .withf(move |l, email| *l == caller && email == "paulo@clinic.com")
            .returning(|_, _| Ok(None));
        repo.expect_create().times(1).returning(|_| Ok(()));

        let service = ClientService::new(Arc::new(repo), Arc::new(labs_with(Some(lab))));
        let client = service
            .create(&caller, fixtures::client_profile("Paulo@Clinic.com"))
            .await
            .unwrap();

        assert_eq!(client.laboratory_id(), caller);
    }

    #[tokio::test]
    async fn test_create_requires_live_laboratory() {
        let mut repo = MockClientRepository::new();
        repo.expect_create().never();

        let service = ClientService::new(Arc::new(repo), Arc::new(labs_with(None)));
        let err = service
            .create(&Uuid::new_v4(), fixtures::client_profile("a@b.com"))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[tokio::test]
    async fn test_create_duplicate_email_in_same_lab() {
        let lab = fixtures::laboratory();
        let caller = lab.id;
        let existing = fixtures::client(caller);
        let mut repo = MockClientRepository::new();
        repo.expect_find_by_email()
            .returning(move |_, _| Ok(Some(existing.clone())));
        repo.expect_create().never();

        let service = ClientService::new(Arc::new(repo), Arc::new(labs_with(Some(lab))));
        let err = service
            .create(&caller, fixtures::client_profile("paulo@clinic.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn test_foreign_client_matches_missing_client() {
        let owner = Uuid::new_v4();
        let client = fixtures::client(owner);
        let id = client.id;

        let mut repo = MockClientRepository::new();
        repo.expect_find_by_id()
            .returning(move |target| Ok((*target == id).then(|| client.clone())));
        repo.expect_update().never();
        repo.expect_delete().never();

        let service = ClientService::new(Arc::new(repo), Arc::new(MockLaboratoryRepository::new()));
        let intruder = Uuid::new_v4();

        let missing = service.get(&owner, &Uuid::new_v4()).await.unwrap_err();
        assert_eq!(service.get(&intruder, &id).await.unwrap_err(), missing);
        assert_eq!(
            service
                .update(&intruder, &id, fixtures::client_profile("x@y.com"))
                .await
                .unwrap_err(),
            missing
        );
        assert_eq!(service.delete(&intruder, &id).await.unwrap_err(), missing);
    }

    #[tokio::test]
    async fn test_update_to_taken_email() {
        let caller = Uuid::new_v4();
        let client = fixtures::client(caller);
        let other = Client::new(caller, fixtures::client_profile("taken@clinic.com")).unwrap();
        let id = client.id;

        let mut repo = MockClientRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(client.clone())));
        repo.expect_find_by_email()
            .returning(move |_, _| Ok(Some(other.clone())));
        repo.expect_update().never();

        let service = ClientService::new(Arc::new(repo), Arc::new(MockLaboratoryRepository::new()));
        let err = service
            .update(&caller, &id, fixtures::client_profile("taken@clinic.com"))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::DuplicateEmail("taken@clinic.com".to_string()));
    }

    #[tokio::test]
    async fn test_storage_failure_is_internal() {
        let mut repo = MockClientRepository::new();
        repo.expect_list()
            .returning(|_| Err(StorageError::Unavailable("lock poisoned".to_string())));

        let service = ClientService::new(Arc::new(repo), Arc::new(MockLaboratoryRepository::new()));
        let err = service.list(&Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
    }
}
