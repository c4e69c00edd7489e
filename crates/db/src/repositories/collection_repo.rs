//! Repository for the per-user recipe collections (`favorites` and
//! `shopping_cart_entries`).
//!
//! Both tables share the same shape and a `UNIQUE (user_id, recipe_id)`
//! constraint; duplicates are rejected by the database, never by a prior read.

use foodgram_core::collection::CollectionKind;
use foodgram_core::types::DbId;
use sqlx::PgPool;

use crate::models::recipe::CartIngredientRow;

/// Table backing a collection kind.
fn table(kind: CollectionKind) -> &'static str {
    match kind {
        CollectionKind::Favorite => "favorites",
        CollectionKind::ShoppingCart => "shopping_cart_entries",
    }
}

/// Provides add/remove and membership queries for recipe collections.
pub struct CollectionRepo;

impl CollectionRepo {
    /// Add a recipe to a user's collection.
    ///
    /// Returns `false` when the entry already existed (nothing inserted).
    pub async fn add(
        pool: &PgPool,
        kind: CollectionKind,
        user_id: DbId,
        recipe_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} (user_id, recipe_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, recipe_id) DO NOTHING",
            table(kind)
        );
        let result = sqlx::query(&query)
            .bind(user_id)
            .bind(recipe_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a recipe from a user's collection.
    ///
    /// Returns `false` when no entry existed.
    pub async fn remove(
        pool: &PgPool,
        kind: CollectionKind,
        user_id: DbId,
        recipe_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "DELETE FROM {} WHERE user_id = $1 AND recipe_id = $2",
            table(kind)
        );
        let result = sqlx::query(&query)
            .bind(user_id)
            .bind(recipe_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Which of `recipe_ids` are in the user's collection.
    pub async fn recipe_ids_in(
        pool: &PgPool,
        kind: CollectionKind,
        user_id: DbId,
        recipe_ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT recipe_id FROM {} WHERE user_id = $1 AND recipe_id = ANY($2)",
            table(kind)
        );
        sqlx::query_scalar(&query)
            .bind(user_id)
            .bind(recipe_ids)
            .fetch_all(pool)
            .await
    }

    /// Every ingredient association of every recipe in the user's cart.
    ///
    /// Rows are not aggregated here; summing happens in
    /// `foodgram_core::shopping_list`.
    pub async fn cart_ingredients(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<CartIngredientRow>, sqlx::Error> {
        sqlx::query_as::<_, CartIngredientRow>(
            "SELECT i.name, i.measurement_unit, ri.amount \
             FROM shopping_cart_entries c \
             JOIN recipe_ingredients ri ON ri.recipe_id = c.recipe_id \
             JOIN ingredients i ON i.id = ri.ingredient_id \
             WHERE c.user_id = $1",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
