//! Prosthesis catalog use cases

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::require_laboratory;
use crate::domain::{Prosthesis, ProsthesisSpec, ProsthesisType};
use crate::error::DomainError;
use crate::repositories::{LaboratoryRepository, ProsthesisRepository};
use crate::tenancy;

/// Optional list filters. `kind` wins when both are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProsthesisFilter {
    pub kind: Option<ProsthesisType>,
    pub material: Option<String>,
}

pub struct ProsthesisService {
    repo: Arc<dyn ProsthesisRepository>,
    laboratories: Arc<dyn LaboratoryRepository>,
}

impl ProsthesisService {
    pub fn new(
        repo: Arc<dyn ProsthesisRepository>,
        laboratories: Arc<dyn LaboratoryRepository>,
    ) -> Self {
        Self { repo, laboratories }
    }

    pub async fn create(&self, caller: &Uuid, spec: ProsthesisSpec) -> Result<Prosthesis, DomainError> {
        require_laboratory(self.laboratories.as_ref(), caller).await?;
        let prosthesis = Prosthesis::new(*caller, spec)?;

        self.repo.create(&prosthesis).await?;
        info!(prosthesis_id = %prosthesis.id, kind = %prosthesis.kind, "Prosthesis created");
        Ok(prosthesis)
    }

    pub async fn get(&self, caller: &Uuid, id: &Uuid) -> Result<Prosthesis, DomainError> {
        tenancy::scoped(self.repo.find_by_id(id).await?, *caller)
    }

    pub async fn list(
        &self,
        caller: &Uuid,
        filter: ProsthesisFilter,
    ) -> Result<Vec<Prosthesis>, DomainError> {
        let material = filter
            .material
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty());

        let rows = match (filter.kind, material) {
            (Some(kind), _) => self.repo.find_by_type(caller, kind).await?,
            (None, Some(material)) => self.repo.find_by_material(caller, material).await?,
            (None, None) => self.repo.list(caller).await?,
        };
        Ok(rows)
    }

    pub async fn update(
        &self,
        caller: &Uuid,
        id: &Uuid,
        spec: ProsthesisSpec,
    ) -> Result<Prosthesis, DomainError> {
        let mut prosthesis = self.get(caller, id).await?;
        prosthesis.update(spec)?;
        self.repo.update(&prosthesis).await?;
        info!(prosthesis_id = %prosthesis.id, "Prosthesis updated");
        Ok(prosthesis)
    }

    pub async fn delete(&self, caller: &Uuid, id: &Uuid) -> Result<(), DomainError> {
        let prosthesis = self.get(caller, id).await?;
        self.repo.delete(&prosthesis.id).await?;
        info!(prosthesis_id = %prosthesis.id, "Prosthesis deleted");
        Ok(())
    }
}
