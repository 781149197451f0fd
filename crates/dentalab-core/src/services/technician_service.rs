//! Technician use cases

use std::sync::Arc;

use dentalab_shared::utils::{mask_email, normalize_email};
use tracing::{info, warn};
use uuid::Uuid;

use super::require_laboratory;
use crate::domain::{Technician, TechnicianProfile, TechnicianRole};
use crate::error::DomainError;
use crate::repositories::{LaboratoryRepository, TechnicianRepository};
use crate::tenancy;

pub struct TechnicianService {
    repo: Arc<dyn TechnicianRepository>,
    laboratories: Arc<dyn LaboratoryRepository>,
}

impl TechnicianService {
    pub fn new(
        repo: Arc<dyn TechnicianRepository>,
        laboratories: Arc<dyn LaboratoryRepository>,
    ) -> Self {
        Self { repo, laboratories }
    }

    pub async fn create(
        &self,
        caller: &Uuid,
        profile: TechnicianProfile,
    ) -> Result<Technician, DomainError> {
        require_laboratory(self.laboratories.as_ref(), caller).await?;
        let technician = Technician::new(*caller, profile)?;

        if self
            .repo
            .find_by_email(caller, &normalize_email(&technician.email))
            .await?
            .is_some()
        {
            warn!(laboratory_id = %caller, "Technician email taken: {}", mask_email(&technician.email));
            return Err(DomainError::DuplicateEmail(technician.email));
        }

        self.repo.create(&technician).await?;
        info!(technician_id = %technician.id, role = %technician.role, "Technician created");
        Ok(technician)
    }

    pub async fn get(&self, caller: &Uuid, id: &Uuid) -> Result<Technician, DomainError> {
        tenancy::scoped(self.repo.find_by_id(id).await?, *caller)
    }

    pub async fn list(
        &self,
        caller: &Uuid,
        role: Option<TechnicianRole>,
    ) -> Result<Vec<Technician>, DomainError> {
        let rows = match role {
            Some(role) => self.repo.list_by_role(caller, role).await?,
            None => self.repo.list(caller).await?,
        };
        Ok(rows)
    }

    pub async fn update(
        &self,
        caller: &Uuid,
        id: &Uuid,
        profile: TechnicianProfile,
    ) -> Result<Technician, DomainError> {
        let mut technician = self.get(caller, id).await?;

        if normalize_email(&profile.email) != normalize_email(&technician.email) {
            let taken = self
                .repo
                .find_by_email(caller, &normalize_email(&profile.email))
                .await?;
            if matches!(taken, Some(other) if other.id != technician.id) {
                warn!(laboratory_id = %caller, "Technician email taken: {}", mask_email(&profile.email));
                return Err(DomainError::DuplicateEmail(profile.email.trim().to_string()));
            }
        }

        technician.update(profile)?;
        self.repo.update(&technician).await?;
        info!(technician_id = %technician.id, "Technician updated");
        Ok(technician)
    }

    pub async fn delete(&self, caller: &Uuid, id: &Uuid) -> Result<(), DomainError> {
        let technician = self.get(caller, id).await?;
        self.repo.delete(&technician.id).await?;
        info!(technician_id = %technician.id, "Technician deleted");
        Ok(())
    }
}
