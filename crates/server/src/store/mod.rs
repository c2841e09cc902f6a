//! Generic entity persistence.
//!
//! The REST handlers talk to a narrow, object-safe [`EntityStore`] contract
//! rather than a concrete backend. The crate ships an in-memory
//! implementation ([`memory::InMemoryStore`]); anything that can satisfy the
//! five methods can be swapped in behind the same seam.

pub mod memory;

use thiserror::Error;

use shop_registry_core::Entity;

pub use memory::InMemoryStore;

/// Errors surfaced by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The interior lock was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    LockPoisoned,
    /// A save completed without assigning an identifier.
    #[error("store returned an entity without an id")]
    IdNotAssigned,
}

/// Requested ordering for [`EntityStore::find_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Fields a listing can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Id,
}

/// Ordering direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl Sort {
    /// Parse a `field,direction` query value such as `id,desc`.
    ///
    /// The direction defaults to ascending when omitted. Returns `None` for
    /// anything unrecognized; callers fall back to the default order.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.split(',');

        let field = match parts.next().map(str::trim) {
            Some(field) if field.eq_ignore_ascii_case("id") => SortField::Id,
            _ => return None,
        };

        let direction = match parts.next().map(str::trim) {
            None => SortDirection::Asc,
            Some(dir) if dir.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            Some(dir) if dir.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            Some(_) => return None,
        };

        if parts.next().is_some() {
            return None;
        }

        Some(Self { field, direction })
    }
}

/// Persistence contract for a single entity type.
///
/// Mirrors the classic repository surface: upsert-style save with id
/// generation, point lookups, full listing, existence probe, and idempotent
/// delete.
pub trait EntityStore<T: Entity>: Send + Sync {
    /// Persist an entity.
    ///
    /// An entity without an id is assigned the next generated one and
    /// inserted; an entity with an id overwrites any record stored under it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn save(&self, entity: T) -> Result<T, StoreError>;

    /// Look up an entity by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn find_by_id(&self, id: T::Id) -> Result<Option<T>, StoreError>;

    /// List every stored entity in the requested order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn find_all(&self, sort: Sort) -> Result<Vec<T>, StoreError>;

    /// Whether a record exists under the given id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn exists_by_id(&self, id: T::Id) -> Result<bool, StoreError>;

    /// Remove the record stored under the given id.
    ///
    /// Deleting an absent id is a no-op, so the operation is idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn delete_by_id(&self, id: T::Id) -> Result<(), StoreError>;
}
