// ============================================================================
// Dentalab Core - Laboratory Service
// File: crates/dentalab-core/src/services/laboratory_service.rs
// ============================================================================
//! Laboratory signup and self-management

use std::sync::Arc;

use dentalab_shared::utils::{mask_email, normalize_email};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{Entity, Laboratory, LaboratoryProfile};
use crate::error::DomainError;
use crate::repositories::LaboratoryRepository;
use crate::tenancy;

pub struct LaboratoryService {
    repo: Arc<dyn LaboratoryRepository>,
}

impl LaboratoryService {
    pub fn new(repo: Arc<dyn LaboratoryRepository>) -> Self {
        Self { repo }
    }

    /// Signup. Email must be unique among live laboratories.
    pub async fn create(&self, profile: LaboratoryProfile) -> Result<Laboratory, DomainError> {
        let lab = Laboratory::new(profile)?;

        if self.repo.find_by_email(&normalize_email(&lab.email)).await?.is_some() {
            warn!("Laboratory signup rejected, email taken: {}", mask_email(&lab.email));
            return Err(DomainError::DuplicateEmail(lab.email));
        }

        self.repo.create(&lab).await?;
        info!(laboratory_id = %lab.id, "Laboratory created");
        Ok(lab)
    }

    pub async fn get(&self, id: &Uuid) -> Result<Laboratory, DomainError> {
        match self.repo.find_by_id(id).await? {
            Some(lab) if !lab.is_deleted() => Ok(lab),
            _ => Err(DomainError::NotFound),
        }
    }

    pub async fn list(&self) -> Result<Vec<Laboratory>, DomainError> {
        Ok(self.repo.list().await?)
    }

    /// Only the laboratory itself may edit its profile.
    pub async fn update(
        &self,
        caller: &Uuid,
        id: &Uuid,
        profile: LaboratoryProfile,
    ) -> Result<Laboratory, DomainError> {
        let mut lab = tenancy::scoped(self.repo.find_by_id(id).await?, *caller)?;

        if normalize_email(&profile.email) != normalize_email(&lab.email) {
            if let Some(other) = self.repo.find_by_email(&normalize_email(&profile.email)).await? {
                if other.id != lab.id {
                    warn!("Laboratory update rejected, email taken: {}", mask_email(&profile.email));
                    return Err(DomainError::DuplicateEmail(profile.email.trim().to_string()));
                }
            }
        }

        lab.update(profile)?;
        self.repo.update(&lab).await?;
        info!(laboratory_id = %lab.id, "Laboratory updated");
        Ok(lab)
    }

    pub async fn delete(&self, caller: &Uuid, id: &Uuid) -> Result<(), DomainError> {
        let lab = tenancy::scoped(self.repo.find_by_id(id).await?, *caller)?;
        self.repo.delete(&lab.id).await?;
        info!(laboratory_id = %lab.id, "Laboratory deleted");
        Ok(())
    }
}
