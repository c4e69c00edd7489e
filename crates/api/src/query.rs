//! Shared query parameter types for API handlers.

use foodgram_core::pagination::{clamp_limit, clamp_page, page_offset, recipes_cap};
use foodgram_core::types::DbId;
use serde::Deserialize;

use crate::error::AppError;

/// Page-number pagination parameters (`?page=&limit=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Resolved page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
}

impl PaginationParams {
    /// Clamp the raw parameters into a page window.
    pub fn window(&self) -> PageWindow {
        let page = clamp_page(self.page);
        let limit = clamp_limit(self.limit);
        PageWindow {
            page,
            limit,
            offset: page_offset(page, limit),
        }
    }
}

/// `?recipes_limit=` cap on embedded author recipes.
#[derive(Debug, Default, Deserialize)]
pub struct RecipesLimitParams {
    pub recipes_limit: Option<i64>,
}

impl RecipesLimitParams {
    pub fn cap(&self) -> Option<i64> {
        recipes_cap(self.recipes_limit)
    }
}

/// Parameters of `GET /users/subscriptions`.
///
/// Spelled out rather than flattened: `serde_urlencoded` cannot parse numbers
/// through `#[serde(flatten)]`.
#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub recipes_limit: Option<i64>,
}

impl SubscriptionListParams {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            limit: self.limit,
        }
    }

    pub fn cap(&self) -> Option<i64> {
        recipes_cap(self.recipes_limit)
    }
}

/// `?name=` prefix filter for ingredients.
#[derive(Debug, Default, Deserialize)]
pub struct IngredientSearchParams {
    pub name: Option<String>,
}

/// Parameters of `GET /recipes`.
///
/// `tags` may repeat (`?tags=breakfast&tags=lunch`), which the derived
/// `Deserialize` of `Query` cannot express, so the pairs are parsed by hand.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RecipeListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub tags: Vec<String>,
    pub author: Option<DbId>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

impl RecipeListParams {
    /// Parse raw query pairs. Unknown keys are ignored.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, AppError> {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "page" => params.page = Some(parse_int(key, value)?),
                "limit" => params.limit = Some(parse_int(key, value)?),
                "author" => params.author = Some(parse_int(key, value)?),
                "tags" => {
                    let slug = value.trim();
                    if !slug.is_empty() && !params.tags.iter().any(|t| t == slug) {
                        params.tags.push(slug.to_string());
                    }
                }
                "is_favorited" => params.is_favorited = parse_flag(key, value)?,
                "is_in_shopping_cart" => params.is_in_shopping_cart = parse_flag(key, value)?,
                _ => {}
            }
        }
        Ok(params)
    }

    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            limit: self.limit,
        }
    }
}

fn parse_int(key: &str, value: &str) -> Result<i64, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("`{key}` must be an integer")))
}

/// Accepts `1`/`0` and `true`/`false`.
fn parse_flag(key: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" | "" => Ok(false),
        _ => Err(AppError::BadRequest(format!("`{key}` must be 0 or 1"))),
    }
}
