//! The `ShopTwo` entity.
//!
//! A flat record with a store-assigned identifier and four optional text
//! attributes. The wire shape is camelCase JSON; absent fields deserialize to
//! `None` and `None` serializes back to `null`.

use serde::{Deserialize, Serialize};

use shop_registry_core::{Entity, ShopTwoId};

/// A registered shop.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShopTwo {
    /// Store-assigned identifier. `None` until first save.
    pub id: Option<ShopTwoId>,
    /// Display name of the shop.
    pub shop_name: Option<String>,
    /// Name of the shop owner.
    pub owner: Option<String>,
    /// Free-form category label.
    pub category: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
}

impl ShopTwo {
    /// Merge a partial update into this stored record.
    ///
    /// Every non-null field of `patch` overwrites the stored value; null
    /// fields are left untouched. The stored identifier is always kept, so a
    /// patch can never re-key a record.
    #[must_use]
    pub fn merged_with(mut self, patch: Self) -> Self {
        if patch.shop_name.is_some() {
            self.shop_name = patch.shop_name;
        }
        if patch.owner.is_some() {
            self.owner = patch.owner;
        }
        if patch.category.is_some() {
            self.category = patch.category;
        }
        if patch.email.is_some() {
            self.email = patch.email;
        }
        self
    }
}

impl Entity for ShopTwo {
    type Id = ShopTwoId;

    fn id(&self) -> Option<ShopTwoId> {
        self.id
    }

    fn set_id(&mut self, id: ShopTwoId) {
        self.id = Some(id);
    }
}

/// Identifier equality: two records are equal iff both carry an id and the
/// ids match. An unsaved record (`id == None`) equals nothing, itself
/// included, which is why there is no `Eq` impl.
impl PartialEq for ShopTwo {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
