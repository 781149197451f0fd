//! Tenant guard applied by every use case that addresses a row by id.
//!
//! Absent, soft-deleted and foreign rows all collapse into
//! [`DomainError::NotFound`] so a caller learns nothing about other laboratories.

use uuid::Uuid;

use crate::domain::{Entity, TenantOwned};
use crate::error::DomainError;

/// Keeps `found` only if it is live and `owner(&found) == caller`.
pub fn owned_by<T, F>(found: Option<T>, caller: Uuid, owner: F) -> Result<T, DomainError>
where
    T: Entity,
    F: Fn(&T) -> Uuid,
{
    let entity = found.ok_or(DomainError::NotFound)?;
    check(&entity, caller, owner(&entity))?;
    Ok(entity)
}

/// [`owned_by`] using the entity's own laboratory id.
pub fn scoped<T>(found: Option<T>, caller: Uuid) -> Result<T, DomainError>
where
    T: Entity + TenantOwned,
{
    owned_by(found, caller, T::laboratory_id)
}

/// [`scoped`] for a row that is being edited in place.
pub fn ensure_scoped<T>(entity: &T, caller: Uuid) -> Result<(), DomainError>
where
    T: Entity + TenantOwned,
{
    check(entity, caller, entity.laboratory_id())
}

fn check<T: Entity>(entity: &T, caller: Uuid, owner: Uuid) -> Result<(), DomainError> {
    if entity.is_deleted() {
        return Err(DomainError::NotFound);
    }
    if owner != caller {
        tracing::debug!(
            entity_id = %entity.id(),
            caller_laboratory = %caller,
            "Cross-tenant access reported as not found"
        );
        return Err(DomainError::NotFound);
    }
    Ok(())
}
