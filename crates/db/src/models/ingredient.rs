//! Ingredient reference data.

use foodgram_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `ingredients` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Ingredient {
    pub id: DbId,
    pub name: String,
    pub measurement_unit: String,
}

/// DTO for seeding an ingredient.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateIngredient {
    pub name: String,
    pub measurement_unit: String,
}
