//! Repository for the `subscriptions` table.

use foodgram_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::UserProfile;

/// Provides follow/unfollow and followed-author listings.
pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// Follow `author_id`. Returns `false` if already following.
    pub async fn add(pool: &PgPool, user_id: DbId, author_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO subscriptions (user_id, author_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, author_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(author_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Unfollow `author_id`. Returns `false` if not following.
    pub async fn remove(
        pool: &PgPool,
        user_id: DbId,
        author_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE user_id = $1 AND author_id = $2")
            .bind(user_id)
            .bind(author_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(pool: &PgPool, user_id: DbId, author_id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM subscriptions WHERE user_id = $1 AND author_id = $2)",
        )
        .bind(user_id)
        .bind(author_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// One page of authors followed by `user_id`, most recent first.
    pub async fn list_authors(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserProfile>, sqlx::Error> {
        sqlx::query_as::<_, UserProfile>(
            "SELECT u.email, u.id, u.username, u.first_name, u.last_name, \
                    TRUE AS is_subscribed \
             FROM subscriptions s \
             JOIN users u ON u.id = s.author_id \
             WHERE s.user_id = $1 \
             ORDER BY s.created_at DESC, s.id DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Number of authors followed by `user_id`.
    pub async fn count_authors(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM subscriptions WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
