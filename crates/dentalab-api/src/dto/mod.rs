//! Request and response bodies

pub mod laboratory;
pub mod client;
pub mod order;
pub mod prosthesis;
pub mod technician;

pub use laboratory::{LaboratoryRequest, LaboratoryResponse};
pub use client::{ClientRequest, ClientResponse};
pub use order::{CreateOrderRequest, OrderResponse, UpdateOrderRequest, UpdateOrderStatusRequest};
pub use prosthesis::{ProsthesisListQuery, ProsthesisRequest, ProsthesisResponse};
pub use technician::{TechnicianListQuery, TechnicianRequest, TechnicianResponse};

use dentalab_core::DomainError;

/// Combines an enum parse failure with whatever else the domain would have
/// rejected, so one response lists every bad field.
pub(crate) fn merge_violations<T>(first: DomainError, rest: Result<T, DomainError>) -> DomainError {
    match (first, rest) {
        (DomainError::InvalidInput(mut errors), Err(DomainError::InvalidInput(more))) => {
            errors.extend(more);
            DomainError::InvalidInput(errors)
        }
        (first, _) => first,
    }
}
