//! The `Entity` trait for store-managed record types.
//!
//! An entity carries an optional identifier: `None` before its first save,
//! `Some` once a store has assigned one. Stores are generic over this trait
//! so the persistence seam stays independent of any concrete record type.

/// A record type whose identifier is assigned by a store.
pub trait Entity {
    /// The identifier type, convertible to and from the raw `i64` a store
    /// generates.
    type Id: Copy + Eq + Ord + From<i64> + Into<i64>;

    /// The identifier, if one has been assigned.
    fn id(&self) -> Option<Self::Id>;

    /// Assign an identifier. Called by stores on first save.
    fn set_id(&mut self, id: Self::Id);
}
