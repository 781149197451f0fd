//! Traits shared by every persisted entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A stored row with a global id and a soft-delete tombstone.
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;

    fn removed_at(&self) -> Option<DateTime<Utc>>;

    /// Sets the tombstone. Calling it again overwrites the timestamp.
    fn soft_delete(&mut self);

    fn is_deleted(&self) -> bool {
        self.removed_at().is_some()
    }
}

/// Rows that belong to exactly one laboratory.
pub trait TenantOwned {
    fn laboratory_id(&self) -> Uuid;
}
