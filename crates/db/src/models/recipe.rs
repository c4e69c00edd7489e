//! Recipe rows, association projections and list filters.

use foodgram_core::shopping_list::ShoppingItem;
use foodgram_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::tag::Tag;
use crate::models::user::UserProfile;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `recipes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Recipe {
    pub id: DbId,
    pub author_id: DbId,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub image: String,
    pub created_at: Timestamp,
}

/// Compact representation used by collection toggles and author listings.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct RecipeSummary {
    pub id: DbId,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

/// An ingredient association joined with its reference row.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct RecipeIngredientInfo {
    #[serde(skip)]
    pub recipe_id: DbId,
    pub id: DbId,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// One cart association row feeding the shopping list.
#[derive(Debug, Clone, FromRow)]
pub struct CartIngredientRow {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl From<CartIngredientRow> for ShoppingItem {
    fn from(row: CartIngredientRow) -> Self {
        ShoppingItem::new(row.name, row.measurement_unit, i64::from(row.amount))
    }
}

// ---------------------------------------------------------------------------
// Read model
// ---------------------------------------------------------------------------

/// Full recipe representation as seen by a particular viewer.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    pub id: DbId,
    pub tags: Vec<Tag>,
    pub author: UserProfile,
    pub ingredients: Vec<RecipeIngredientInfo>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Query parameters and write outcomes
// ---------------------------------------------------------------------------

/// Filters for the recipe list. Empty `tag_slugs` means "any tag".
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub tag_slugs: Vec<String>,
    pub author_id: Option<DbId>,
    /// Restrict to recipes favorited by this user.
    pub favorited_by: Option<DbId>,
    /// Restrict to recipes in this user's shopping cart.
    pub in_cart_of: Option<DbId>,
}

/// Outcome of a transactional recipe write.
///
/// Unknown references are reported instead of raised so the caller can map
/// them onto field errors; the transaction is rolled back in those cases.
#[derive(Debug)]
pub enum RecipeWrite {
    Written(Recipe),
    UnknownTags(Vec<DbId>),
    UnknownIngredients(Vec<DbId>),
    /// Replace targeted a recipe id with no row.
    RecipeMissing(DbId),
}
