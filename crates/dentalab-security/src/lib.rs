//! # Dentalab Security
//! 
//! Bearer-token verification that resolves a request to a tenant identity.

pub mod jwt;

pub use jwt::{Claims, JwtError, JwtService, TenantIdentity};
