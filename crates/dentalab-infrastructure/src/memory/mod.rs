//! In-memory adapters
//!
//! One [`MemoryTable`] per entity collection. Readers share the lock, writers
//! hold it exclusively, and nothing crosses the lock boundary by reference.

pub mod laboratory_repo_impl;
pub mod client_repo_impl;
pub mod order_repo_impl;
pub mod prosthesis_repo_impl;
pub mod technician_repo_impl;

pub use laboratory_repo_impl::InMemoryLaboratoryRepository;
pub use client_repo_impl::InMemoryClientRepository;
pub use order_repo_impl::InMemoryOrderRepository;
pub use prosthesis_repo_impl::InMemoryProsthesisRepository;
pub use technician_repo_impl::InMemoryTechnicianRepository;

use std::collections::HashMap;

use dentalab_core::domain::Entity;
use dentalab_core::repositories::StorageError;
use parking_lot::RwLock;
use uuid::Uuid;

struct Rows<T> {
    by_id: HashMap<Uuid, T>,
    // Insertion order, so lists are stable.
    order: Vec<Uuid>,
}

/// Soft-delete aware keyed store. Reads hand out clones, writes store clones.
pub struct MemoryTable<T: Entity> {
    rows: RwLock<Rows<T>>,
}

impl<T: Entity> Default for MemoryTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> MemoryTable<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Rows {
                by_id: HashMap::new(),
                order: Vec::new(),
            }),
        }
    }

    pub fn insert(&self, row: &T) -> Result<(), StorageError> {
        self.insert_unless(row, |_| false, || StorageError::AlreadyExists(row.id()))
    }

    /// Inserts `row` unless a live row matches `clash`. Check and insert share
    /// one write lock.
    pub fn insert_unless<P, E>(&self, row: &T, clash: P, conflict: E) -> Result<(), StorageError>
    where
        P: Fn(&T) -> bool,
        E: FnOnce() -> StorageError,
    {
        let mut rows = self.rows.write();
        let id = row.id();
        if rows.by_id.contains_key(&id) {
            return Err(StorageError::AlreadyExists(id));
        }
        if rows.by_id.values().any(|r| !r.is_deleted() && clash(r)) {
            return Err(conflict());
        }
        rows.by_id.insert(id, row.clone());
        rows.order.push(id);
        Ok(())
    }

    /// Live row by id.
    pub fn get(&self, id: &Uuid) -> Option<T> {
        self.rows
            .read()
            .by_id
            .get(id)
            .filter(|row| !row.is_deleted())
            .cloned()
    }

    /// First live row matching `pred`, in insertion order.
    pub fn find<P>(&self, pred: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        let rows = self.rows.read();
        rows.order
            .iter()
            .filter_map(|id| rows.by_id.get(id))
            .find(|row| !row.is_deleted() && pred(row))
            .cloned()
    }

    /// Every live row matching `pred`, in insertion order.
    pub fn select<P>(&self, pred: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        let rows = self.rows.read();
        rows.order
            .iter()
            .filter_map(|id| rows.by_id.get(id))
            .filter(|row| !row.is_deleted() && pred(row))
            .cloned()
            .collect()
    }

    /// Overwrites a live row.
    pub fn replace(&self, row: &T) -> Result<(), StorageError> {
        self.replace_unless(row, |_| false, || StorageError::NotFound)
    }

    /// Overwrites a live row unless another live row matches `clash`.
    pub fn replace_unless<P, E>(&self, row: &T, clash: P, conflict: E) -> Result<(), StorageError>
    where
        P: Fn(&T) -> bool,
        E: FnOnce() -> StorageError,
    {
        let mut rows = self.rows.write();
        let id = row.id();
        if rows
            .by_id
            .values()
            .any(|r| r.id() != id && !r.is_deleted() && clash(r))
        {
            return Err(conflict());
        }
        match rows.by_id.get_mut(&id) {
            Some(stored) if !stored.is_deleted() => {
                *stored = row.clone();
                Ok(())
            }
            _ => Err(StorageError::NotFound),
        }
    }

    /// Applies `edit` to a copy of the live row and stores it if the edit
    /// succeeds. Read, edit and write happen under one write lock.
    pub fn modify<F>(&self, id: &Uuid, edit: F) -> Result<T, StorageError>
    where
        F: FnOnce(&mut T) -> Result<(), StorageError>,
    {
        let mut rows = self.rows.write();
        match rows.by_id.get_mut(id) {
            Some(stored) if !stored.is_deleted() => {
                let mut next = stored.clone();
                edit(&mut next)?;
                *stored = next.clone();
                Ok(next)
            }
            _ => Err(StorageError::NotFound),
        }
    }

    /// Tombstones a live row. The row stays in the table.
    pub fn soft_delete(&self, id: &Uuid) -> Result<(), StorageError> {
        let mut rows = self.rows.write();
        match rows.by_id.get_mut(id) {
            Some(stored) if !stored.is_deleted() => {
                stored.soft_delete();
                Ok(())
            }
            _ => Err(StorageError::NotFound),
        }
    }

    /// Raw row including tombstones.
    pub fn stored(&self, id: &Uuid) -> Option<T> {
        self.rows.read().by_id.get(id).cloned()
    }

    /// Row count including tombstones.
    pub fn stored_len(&self) -> usize {
        self.rows.read().by_id.len()
    }
}

pub(crate) fn same_email(stored: &str, wanted: &str) -> bool {
    stored.trim().eq_ignore_ascii_case(wanted.trim())
}
