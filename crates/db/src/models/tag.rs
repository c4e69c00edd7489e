//! Tag reference data.

use foodgram_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tags` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub slug: String,
}

/// DTO for seeding a tag.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTag {
    pub name: String,
    pub color: String,
    pub slug: String,
}

/// A tag attached to a recipe, as returned by the batch tag lookup.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeTagRow {
    pub recipe_id: DbId,
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub slug: String,
}

impl From<RecipeTagRow> for Tag {
    fn from(row: RecipeTagRow) -> Self {
        Tag {
            id: row.id,
            name: row.name,
            color: row.color,
            slug: row.slug,
        }
    }
}
