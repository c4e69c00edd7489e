//! Repository for the `users` table and viewer-relative profiles.

use foodgram_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User, UserProfile};

/// Column list for `users` queries.
const COLUMNS: &str = "id, email, username, first_name, last_name, created_at";

/// Profile columns for alias `u`, with `is_subscribed` relative to bind `$1`.
///
/// `$1` is nullable; an anonymous viewer is never subscribed.
const PROFILE_COLUMNS: &str = "\
    u.email, u.id, u.username, u.first_name, u.last_name, \
    EXISTS(SELECT 1 FROM subscriptions s \
           WHERE s.user_id = $1 AND s.author_id = u.id) AS is_subscribed";

/// Provides user lookups and profile projections.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, username, first_name, last_name) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.username)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .fetch_one(pool)
            .await
    }

    /// Find a user by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a user with this ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(exists)
    }

    /// Profile of `id` as seen by `viewer`.
    pub async fn profile(
        pool: &PgPool,
        id: DbId,
        viewer: Option<DbId>,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM users u WHERE u.id = $2");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(viewer)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Profiles for a set of user IDs as seen by `viewer`.
    pub async fn profiles_by_ids(
        pool: &PgPool,
        ids: &[DbId],
        viewer: Option<DbId>,
    ) -> Result<Vec<UserProfile>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {PROFILE_COLUMNS} FROM users u WHERE u.id = ANY($2)");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(viewer)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// One page of profiles ordered by ID.
    pub async fn list_profiles(
        pool: &PgPool,
        viewer: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserProfile>, sqlx::Error> {
        let query = format!(
            "SELECT {PROFILE_COLUMNS} FROM users u \
             ORDER BY u.id \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(viewer)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of users.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
