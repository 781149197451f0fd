//! Repository traits (ports)
//!
//! Lookups and lists never return soft-deleted rows. Lab-scoped lists filter
//! by owner; id lookups are global and leave the tenant check to services.

pub mod laboratory_repository;
pub mod client_repository;
pub mod order_repository;
pub mod prosthesis_repository;
pub mod technician_repository;

pub use laboratory_repository::LaboratoryRepository;
pub use client_repository::ClientRepository;
pub use order_repository::{OrderEdit, OrderRepository};
pub use prosthesis_repository::ProsthesisRepository;
pub use technician_repository::TechnicianRepository;

#[cfg(test)]
pub use laboratory_repository::MockLaboratoryRepository;
#[cfg(test)]
pub use client_repository::MockClientRepository;
#[cfg(test)]
pub use order_repository::MockOrderRepository;
#[cfg(test)]
pub use prosthesis_repository::MockProsthesisRepository;
#[cfg(test)]
pub use technician_repository::MockTechnicianRepository;

use thiserror::Error;
use uuid::Uuid;

use crate::error::DomainError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No live row with that id.
    #[error("Row not found")]
    NotFound,

    #[error("Row already exists: {0}")]
    AlreadyExists(Uuid),

    /// Another live row in the same scope already uses this email.
    #[error("Email already stored: {0}")]
    DuplicateEmail(String),

    /// An in-place edit refused to apply; the row was left as it was.
    #[error("Edit rejected: {0}")]
    Rejected(DomainError),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => DomainError::NotFound,
            StorageError::DuplicateEmail(email) => DomainError::DuplicateEmail(email),
            StorageError::Rejected(err) => err,
            other => DomainError::Internal(other.to_string()),
        }
    }
}
