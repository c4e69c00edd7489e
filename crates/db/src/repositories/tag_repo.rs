//! Repository for the `tags` table.

use foodgram_core::types::DbId;
use sqlx::PgPool;

use crate::models::tag::{CreateTag, RecipeTagRow, Tag};

/// Column list for `tags` queries.
const TAG_COLUMNS: &str = "id, name, color, slug";

/// Provides read access to tags plus seeding.
pub struct TagRepo;

impl TagRepo {
    /// Insert a new tag, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTag) -> Result<Tag, sqlx::Error> {
        let query = format!(
            "INSERT INTO tags (name, color, slug) VALUES ($1, $2, $3) RETURNING {TAG_COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(&input.name)
            .bind(&input.color)
            .bind(&input.slug)
            .fetch_one(pool)
            .await
    }

    /// All tags ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!("SELECT {TAG_COLUMNS} FROM tags ORDER BY name");
        sqlx::query_as::<_, Tag>(&query).fetch_all(pool).await
    }

    /// Find a tag by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {TAG_COLUMNS} FROM tags WHERE id = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Tags attached to any of `recipe_ids`, ordered by recipe then tag name.
    pub async fn for_recipes(
        pool: &PgPool,
        recipe_ids: &[DbId],
    ) -> Result<Vec<RecipeTagRow>, sqlx::Error> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, RecipeTagRow>(
            "SELECT rt.recipe_id, t.id, t.name, t.color, t.slug \
             FROM recipe_tags rt \
             JOIN tags t ON t.id = rt.tag_id \
             WHERE rt.recipe_id = ANY($1) \
             ORDER BY rt.recipe_id, t.name",
        )
        .bind(recipe_ids)
        .fetch_all(pool)
        .await
    }
}
