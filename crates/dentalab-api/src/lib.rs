//! # Dentalab API
//! 
//! HTTP handlers, tenant resolution, DTOs and the response envelope.

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::{AppState, Repositories};
