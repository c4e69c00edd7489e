//! User rows and the profile projections served by the API.

use foodgram_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::recipe::RecipeSummary;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: Timestamp,
}

/// DTO for provisioning a user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Public profile, with `is_subscribed` computed relative to a viewer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfile {
    pub email: String,
    pub id: DbId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

/// A followed author together with their recipes.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorWithRecipes {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub recipes: Vec<RecipeSummary>,
    pub recipes_count: i64,
}
