//! Domain services (use cases)
//!
//! Every method that takes a `caller` runs the tenant guard before touching
//! the row. Storage errors are converted to [`DomainError`] here and nowhere
//! else.

pub mod laboratory_service;
pub mod client_service;
pub mod order_service;
pub mod prosthesis_service;
pub mod technician_service;

pub use laboratory_service::LaboratoryService;
pub use client_service::ClientService;
pub use order_service::OrderService;
pub use prosthesis_service::{ProsthesisFilter, ProsthesisService};
pub use technician_service::TechnicianService;

use uuid::Uuid;

use crate::domain::{Entity, Laboratory};
use crate::error::DomainError;
use crate::repositories::LaboratoryRepository;

/// The caller's own laboratory must still exist before it can own new rows.
pub(crate) async fn require_laboratory(
    repo: &dyn LaboratoryRepository,
    laboratory_id: &Uuid,
) -> Result<Laboratory, DomainError> {
    match repo.find_by_id(laboratory_id).await? {
        Some(lab) if !lab.is_deleted() => Ok(lab),
        _ => {
            tracing::warn!(laboratory_id = %laboratory_id, "Caller laboratory does not exist");
            Err(DomainError::NotFound)
        }
    }
}
