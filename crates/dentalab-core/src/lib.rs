//! # Dentalab Core
//! 
//! Domain entities, the order workflow, tenant isolation, repository traits
//! and use-case services for the dental lab backend.

pub mod domain;
pub mod validation;
pub mod tenancy;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::{DomainError, FieldError, FieldErrors};
