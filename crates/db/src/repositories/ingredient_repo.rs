//! Repository for the `ingredients` table.

use foodgram_core::types::DbId;
use sqlx::PgPool;

use crate::models::ingredient::{CreateIngredient, Ingredient};
use crate::models::recipe::RecipeIngredientInfo;

/// Column list for `ingredients` queries.
const COLUMNS: &str = "id, name, measurement_unit";

/// Provides read access to ingredients plus seeding.
pub struct IngredientRepo;

impl IngredientRepo {
    /// Insert a new ingredient, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateIngredient,
    ) -> Result<Ingredient, sqlx::Error> {
        let query = format!(
            "INSERT INTO ingredients (name, measurement_unit) VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(&input.name)
            .bind(&input.measurement_unit)
            .fetch_one(pool)
            .await
    }

    /// Ingredients ordered by name, optionally restricted to a
    /// case-insensitive name prefix.
    pub async fn list(
        pool: &PgPool,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, sqlx::Error> {
        match name_prefix.map(str::trim).filter(|p| !p.is_empty()) {
            Some(prefix) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM ingredients \
                     WHERE name ILIKE $1 ESCAPE '\\' \
                     ORDER BY name, measurement_unit"
                );
                sqlx::query_as::<_, Ingredient>(&query)
                    .bind(format!("{}%", escape_like(prefix)))
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query =
                    format!("SELECT {COLUMNS} FROM ingredients ORDER BY name, measurement_unit");
                sqlx::query_as::<_, Ingredient>(&query).fetch_all(pool).await
            }
        }
    }

    /// Find an ingredient by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ingredient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ingredients WHERE id = $1");
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Ingredient associations of any of `recipe_ids`, ordered by recipe
    /// then ingredient name.
    pub async fn for_recipes(
        pool: &PgPool,
        recipe_ids: &[DbId],
    ) -> Result<Vec<RecipeIngredientInfo>, sqlx::Error> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, RecipeIngredientInfo>(
            "SELECT ri.recipe_id, i.id, i.name, i.measurement_unit, ri.amount \
             FROM recipe_ingredients ri \
             JOIN ingredients i ON i.id = ri.ingredient_id \
             WHERE ri.recipe_id = ANY($1) \
             ORDER BY ri.recipe_id, i.name",
        )
        .bind(recipe_ids)
        .fetch_all(pool)
        .await
    }
}

/// Escape `LIKE` wildcards so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
