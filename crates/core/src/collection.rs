//! Per-user recipe collections: favorites and the shopping cart.
//!
//! An entry for (user, recipe, kind) is either absent or present. Adding a
//! present entry or removing an absent one is rejected, never repeated.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    Favorite,
    ShoppingCart,
}

impl CollectionKind {
    /// Human-readable name used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            CollectionKind::Favorite => "favorites",
            CollectionKind::ShoppingCart => "shopping cart",
        }
    }

    /// Error for adding a recipe that is already in the collection.
    pub fn already_present(self, recipe_id: DbId) -> CoreError {
        CoreError::Conflict(format!(
            "Recipe with id {recipe_id} is already in your {}.",
            self.label()
        ))
    }

    /// Error for removing a recipe that is not in the collection.
    pub fn not_present(self, recipe_id: DbId) -> CoreError {
        CoreError::Missing(format!(
            "Recipe with id {recipe_id} is not in your {}.",
            self.label()
        ))
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectionKind::Favorite => write!(f, "favorite"),
            CollectionKind::ShoppingCart => write!(f, "shopping_cart"),
        }
    }
}
