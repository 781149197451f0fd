//! HTTP handlers

pub mod health;
pub mod laboratory;
pub mod client;
pub mod order;
pub mod prosthesis;
pub mod technician;
