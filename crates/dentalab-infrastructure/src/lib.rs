//! # Dentalab Infrastructure
//! 
//! Storage adapters for the repository ports.

pub mod memory;

pub use memory::{
    InMemoryClientRepository, InMemoryLaboratoryRepository, InMemoryOrderRepository,
    InMemoryProsthesisRepository, InMemoryTechnicianRepository, MemoryTable,
};
