//! # Dentalab Core - Domain Module
//! 
//! Domain entities for the dental lab backend.

pub mod entity;
pub mod address;
pub mod laboratory;
pub mod client;
pub mod order_status;
pub mod order;
pub mod prosthesis;
pub mod technician;

// Re-export all entities and enums
pub use entity::{Entity, TenantOwned};
pub use address::Address;
pub use laboratory::{Laboratory, LaboratoryProfile};
pub use client::{Client, ClientProfile};
pub use order_status::OrderStatus;
pub use order::{Order, ProsthesisItem};
pub use prosthesis::{Prosthesis, ProsthesisSpec, ProsthesisType};
pub use technician::{Technician, TechnicianProfile, TechnicianRole};
