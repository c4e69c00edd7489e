//! Repository for the `recipes` table and its tag/ingredient associations.
//!
//! Writes are transactional: the recipe row and both association sets are
//! committed together, so readers never see a recipe without its tags or
//! ingredients. Referenced tags and ingredients are resolved with one bulk
//! lookup each, inside the same transaction, and share-locked until commit.

use std::collections::{HashMap, HashSet};

use foodgram_core::collection::CollectionKind;
use foodgram_core::recipe::{missing_ids, RecipeDraft};
use foodgram_core::types::DbId;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::recipe::{
    Recipe, RecipeDetail, RecipeFilter, RecipeIngredientInfo, RecipeSummary, RecipeWrite,
};
use crate::models::tag::Tag;
use crate::repositories::{CollectionRepo, IngredientRepo, TagRepo, UserRepo};

/// Column list for `recipes` queries.
const COLUMNS: &str = "id, author_id, name, text, cooking_time, image, created_at";

/// Same columns qualified with the `r` alias.
const R_COLUMNS: &str =
    "r.id, r.author_id, r.name, r.text, r.cooking_time, r.image, r.created_at";

/// Column list for [`RecipeSummary`].
const SUMMARY_COLUMNS: &str = "id, name, image, cooking_time";

/// Provides transactional writes and filtered reads for recipes.
pub struct RecipeRepo;

impl RecipeRepo {
    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Create a recipe with its tags and ingredients in one transaction.
    ///
    /// Returns `UnknownTags` / `UnknownIngredients` (and writes nothing) when
    /// any referenced id does not exist.
    pub async fn create(
        pool: &PgPool,
        author_id: DbId,
        draft: &RecipeDraft,
    ) -> Result<RecipeWrite, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if let Some(unknown) = Self::check_references(&mut tx, draft).await? {
            return Ok(unknown);
        }

        let query = format!(
            "INSERT INTO recipes (author_id, name, text, cooking_time, image) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let recipe = sqlx::query_as::<_, Recipe>(&query)
            .bind(author_id)
            .bind(&draft.name)
            .bind(&draft.text)
            .bind(draft.cooking_time)
            .bind(draft.image.as_deref().unwrap_or_default())
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_associations(&mut tx, recipe.id, draft).await?;

        tx.commit().await?;
        Ok(RecipeWrite::Written(recipe))
    }

    /// Replace a recipe's fields and both association sets.
    ///
    /// The recipe row is locked for the duration, so concurrent replaces of
    /// the same recipe serialize. An absent `draft.image` keeps the stored
    /// image.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        draft: &RecipeDraft,
    ) -> Result<RecipeWrite, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM recipes WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(RecipeWrite::RecipeMissing(id));
        }

        if let Some(unknown) = Self::check_references(&mut tx, draft).await? {
            return Ok(unknown);
        }

        sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "UPDATE recipes SET \
                name = $2, \
                text = $3, \
                cooking_time = $4, \
                image = COALESCE($5, image) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let recipe = sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .bind(&draft.name)
            .bind(&draft.text)
            .bind(draft.cooking_time)
            .bind(draft.image.as_deref())
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_associations(&mut tx, id, draft).await?;

        tx.commit().await?;
        Ok(RecipeWrite::Written(recipe))
    }

    /// Delete a recipe. Associations and collection entries cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Bulk-resolve tag and ingredient ids, share-locking the found rows.
    async fn check_references(
        tx: &mut Transaction<'_, Postgres>,
        draft: &RecipeDraft,
    ) -> Result<Option<RecipeWrite>, sqlx::Error> {
        let found_tags: Vec<DbId> =
            sqlx::query_scalar("SELECT id FROM tags WHERE id = ANY($1) FOR SHARE")
                .bind(&draft.tag_ids)
                .fetch_all(&mut **tx)
                .await?;
        let unknown = missing_ids(&draft.tag_ids, &found_tags);
        if !unknown.is_empty() {
            tracing::debug!(?unknown, "Recipe write references unknown tags");
            return Ok(Some(RecipeWrite::UnknownTags(unknown)));
        }

        let ingredient_ids = draft.ingredient_ids();
        let found_ingredients: Vec<DbId> =
            sqlx::query_scalar("SELECT id FROM ingredients WHERE id = ANY($1) FOR SHARE")
                .bind(&ingredient_ids)
                .fetch_all(&mut **tx)
                .await?;
        let unknown = missing_ids(&ingredient_ids, &found_ingredients);
        if !unknown.is_empty() {
            tracing::debug!(?unknown, "Recipe write references unknown ingredients");
            return Ok(Some(RecipeWrite::UnknownIngredients(unknown)));
        }

        Ok(None)
    }

    async fn insert_associations(
        tx: &mut Transaction<'_, Postgres>,
        recipe_id: DbId,
        draft: &RecipeDraft,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO recipe_tags (recipe_id, tag_id) \
             SELECT $1, tag_id FROM UNNEST($2::bigint[]) AS t(tag_id)",
        )
        .bind(recipe_id)
        .bind(&draft.tag_ids)
        .execute(&mut **tx)
        .await?;

        sqlx::query(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) \
             SELECT $1, t.ingredient_id, t.amount \
             FROM UNNEST($2::bigint[], $3::int[]) AS t(ingredient_id, amount)",
        )
        .bind(recipe_id)
        .bind(draft.ingredient_ids())
        .bind(draft.amounts())
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Find a recipe by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recipes WHERE id = $1");
        sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Compact summary of a recipe.
    pub async fn summary(pool: &PgPool, id: DbId) -> Result<Option<RecipeSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM recipes WHERE id = $1");
        sqlx::query_as::<_, RecipeSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of recipes matching `filter`, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &RecipeFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Recipe>, sqlx::Error> {
        let (where_clause, bind_idx) = filter_clause(filter);
        let query = format!(
            "SELECT {R_COLUMNS} FROM recipes r \
             {where_clause} \
             ORDER BY r.created_at DESC, r.id DESC \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );
        bind_filter(sqlx::query_as::<_, Recipe>(&query), filter)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Number of recipes matching `filter`.
    pub async fn count(pool: &PgPool, filter: &RecipeFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, _) = filter_clause(filter);
        let query = format!("SELECT COUNT(*) FROM recipes r {where_clause}");
        let (count,) = bind_filter(sqlx::query_as::<_, (i64,)>(&query), filter)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// An author's recipes, newest first, optionally capped.
    pub async fn summaries_by_author(
        pool: &PgPool,
        author_id: DbId,
        limit: Option<i64>,
    ) -> Result<Vec<RecipeSummary>, sqlx::Error> {
        // LIMIT NULL is LIMIT ALL.
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM recipes \
             WHERE author_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, RecipeSummary>(&query)
            .bind(author_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Total number of recipes by an author.
    pub async fn count_by_author(pool: &PgPool, author_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Expand recipe rows into full representations for `viewer`.
    ///
    /// Issues one batch query per association kind regardless of how many
    /// recipes are passed. Input order is preserved.
    pub async fn details(
        pool: &PgPool,
        recipes: Vec<Recipe>,
        viewer: Option<DbId>,
    ) -> Result<Vec<RecipeDetail>, sqlx::Error> {
        if recipes.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<DbId> = recipes.iter().map(|r| r.id).collect();
        let mut author_ids: Vec<DbId> = recipes.iter().map(|r| r.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let mut tags: HashMap<DbId, Vec<Tag>> = HashMap::new();
        for row in TagRepo::for_recipes(pool, &ids).await? {
            tags.entry(row.recipe_id).or_default().push(row.into());
        }

        let mut ingredients: HashMap<DbId, Vec<RecipeIngredientInfo>> = HashMap::new();
        for row in IngredientRepo::for_recipes(pool, &ids).await? {
            ingredients.entry(row.recipe_id).or_default().push(row);
        }

        let authors: HashMap<DbId, _> = UserRepo::profiles_by_ids(pool, &author_ids, viewer)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let (favorited, in_cart): (HashSet<DbId>, HashSet<DbId>) = match viewer {
            Some(user_id) => (
                CollectionRepo::recipe_ids_in(pool, CollectionKind::Favorite, user_id, &ids)
                    .await?
                    .into_iter()
                    .collect(),
                CollectionRepo::recipe_ids_in(pool, CollectionKind::ShoppingCart, user_id, &ids)
                    .await?
                    .into_iter()
                    .collect(),
            ),
            None => (HashSet::new(), HashSet::new()),
        };

        let mut details = Vec::with_capacity(recipes.len());
        for recipe in recipes {
            // Authors cascade-delete their recipes, so the profile is present.
            let Some(author) = authors.get(&recipe.author_id).cloned() else {
                return Err(sqlx::Error::RowNotFound);
            };
            details.push(RecipeDetail {
                id: recipe.id,
                tags: tags.remove(&recipe.id).unwrap_or_default(),
                author,
                ingredients: ingredients.remove(&recipe.id).unwrap_or_default(),
                is_favorited: favorited.contains(&recipe.id),
                is_in_shopping_cart: in_cart.contains(&recipe.id),
                name: recipe.name,
                image: recipe.image,
                text: recipe.text,
                cooking_time: recipe.cooking_time,
                created_at: recipe.created_at,
            });
        }
        Ok(details)
    }

    /// Full representation of a single recipe.
    pub async fn detail(
        pool: &PgPool,
        id: DbId,
        viewer: Option<DbId>,
    ) -> Result<Option<RecipeDetail>, sqlx::Error> {
        let Some(recipe) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        Ok(Self::details(pool, vec![recipe], viewer).await?.pop())
    }
}

// ---------------------------------------------------------------------------
// Filter helpers
// ---------------------------------------------------------------------------

/// Build the `WHERE` clause for `filter` over alias `r`.
///
/// Returns the clause and the next free bind index.
fn filter_clause(filter: &RecipeFilter) -> (String, u32) {
    let mut conditions = Vec::new();
    let mut bind_idx = 1u32;

    if !filter.tag_slugs.is_empty() {
        conditions.push(format!(
            "EXISTS (SELECT 1 FROM recipe_tags rt JOIN tags t ON t.id = rt.tag_id \
             WHERE rt.recipe_id = r.id AND t.slug = ANY(${bind_idx}))"
        ));
        bind_idx += 1;
    }
    if filter.author_id.is_some() {
        conditions.push(format!("r.author_id = ${bind_idx}"));
        bind_idx += 1;
    }
    if filter.favorited_by.is_some() {
        conditions.push(format!(
            "EXISTS (SELECT 1 FROM favorites f \
             WHERE f.recipe_id = r.id AND f.user_id = ${bind_idx})"
        ));
        bind_idx += 1;
    }
    if filter.in_cart_of.is_some() {
        conditions.push(format!(
            "EXISTS (SELECT 1 FROM shopping_cart_entries c \
             WHERE c.recipe_id = r.id AND c.user_id = ${bind_idx})"
        ));
        bind_idx += 1;
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (where_clause, bind_idx)
}

/// Bind `filter` values in the order [`filter_clause`] numbered them.
fn bind_filter<'q, O>(
    mut q: QueryAs<'q, Postgres, O, PgArguments>,
    filter: &'q RecipeFilter,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    if !filter.tag_slugs.is_empty() {
        q = q.bind(&filter.tag_slugs);
    }
    if let Some(author_id) = filter.author_id {
        q = q.bind(author_id);
    }
    if let Some(user_id) = filter.favorited_by {
        q = q.bind(user_id);
    }
    if let Some(user_id) = filter.in_cart_of {
        q = q.bind(user_id);
    }
    q
}
