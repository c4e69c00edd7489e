//! Recipe write payloads and their validation.
//!
//! [`validate_recipe_input`] turns a raw [`RecipeInput`] into a
//! [`RecipeDraft`] that the persistence layer can write without further
//! checks. Every problem is collected into one [`FieldErrors`] map so a
//! client sees all offending fields at once.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::{FieldErrors, REQUIRED_MESSAGE};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a recipe name in characters.
pub const MAX_RECIPE_NAME_LENGTH: usize = 200;

const NAME_TOO_LONG_MESSAGE: &str = "Ensure this field has no more than 200 characters.";

/// Cooking time bounds in minutes.
pub const MIN_COOKING_TIME: i64 = 1;
pub const MAX_COOKING_TIME: i64 = 32_000;

/// Smallest accepted ingredient amount.
pub const MIN_INGREDIENT_AMOUNT: i64 = 1;

/// Largest accepted ingredient amount (the column is a 32-bit integer).
pub const MAX_INGREDIENT_AMOUNT: i64 = i32::MAX as i64;

/// Accepted image encoding: `data:image/<type>;base64,<payload>`.
const IMAGE_DATA_URI_PATTERN: &str =
    r"^data:image/(png|jpeg|jpg|gif|webp);base64,[A-Za-z0-9+/]+={0,2}$";

static IMAGE_DATA_URI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IMAGE_DATA_URI_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// One `{id, amount}` entry of a recipe payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngredientAmountInput {
    pub id: Option<DbId>,
    pub amount: Option<i64>,
}

/// Raw body of `POST /recipes` and `PUT|PATCH /recipes/{id}`.
///
/// Every field is optional at the type level; presence is checked by
/// [`validate_recipe_input`] so that a missing field becomes a field error
/// instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RecipeInput {
    pub name: Option<String>,
    pub text: Option<String>,
    #[validate(range(
        min = 1,
        max = 32000,
        message = "Cooking time must be between 1 and 32000 minutes."
    ))]
    pub cooking_time: Option<i64>,
    pub image: Option<String>,
    pub tags: Option<Vec<DbId>>,
    pub ingredients: Option<Vec<IngredientAmountInput>>,
}

/// Whether a payload creates a recipe or replaces an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Update,
}

/// A validated ingredient association.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    pub ingredient_id: DbId,
    pub amount: i32,
}

/// A fully validated recipe, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    /// `None` on update means "keep the stored image".
    pub image: Option<String>,
    /// Distinct tag ids in first-seen order.
    pub tag_ids: Vec<DbId>,
    /// Ingredient associations with pairwise distinct ids, in input order.
    pub ingredients: Vec<IngredientAmount>,
}

impl RecipeDraft {
    pub fn ingredient_ids(&self) -> Vec<DbId> {
        self.ingredients.iter().map(|i| i.ingredient_id).collect()
    }

    pub fn amounts(&self) -> Vec<i32> {
        self.ingredients.iter().map(|i| i.amount).collect()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a recipe payload.
///
/// Rules:
/// - `name`, `text`, `cooking_time`, `tags`, `ingredients` are required and
///   must be non-empty.
/// - `image` is required on create; on update it may be omitted.
/// - each ingredient entry needs an `id` and an `amount >= 1`.
/// - ingredient ids must not repeat, whatever their amounts.
/// - repeated tag ids collapse to one.
pub fn validate_recipe_input(
    input: &RecipeInput,
    mode: WriteMode,
) -> Result<RecipeDraft, CoreError> {
    let mut errors = FieldErrors::new();

    if let Err(rule_errors) = input.validate() {
        errors.merge_validator(&rule_errors);
    }

    let name = required_text(&mut errors, "name", input.name.as_deref()).filter(|name| {
        let fits = name.chars().count() <= MAX_RECIPE_NAME_LENGTH;
        if !fits {
            errors.add("name", NAME_TOO_LONG_MESSAGE);
        }
        fits
    });
    let text = required_text(&mut errors, "text", input.text.as_deref());

    let cooking_time = match input.cooking_time {
        None => {
            errors.add("cooking_time", REQUIRED_MESSAGE);
            None
        }
        // Out-of-range values were already reported by the derive rules.
        Some(minutes) if (MIN_COOKING_TIME..=MAX_COOKING_TIME).contains(&minutes) => {
            i32::try_from(minutes).ok()
        }
        Some(_) => None,
    };

    let image = validate_image(&mut errors, input.image.as_deref(), mode);
    let tag_ids = validate_tags(&mut errors, input.tags.as_deref());
    let ingredients = validate_ingredients(&mut errors, input.ingredients.as_deref());

    match (name, text, cooking_time, tag_ids, ingredients) {
        (Some(name), Some(text), Some(cooking_time), Some(tag_ids), Some(ingredients))
            if errors.is_empty() =>
        {
            Ok(RecipeDraft {
                name,
                text,
                cooking_time,
                image,
                tag_ids,
                ingredients,
            })
        }
        _ => Err(CoreError::Validation(errors)),
    }
}

/// Check that an image string is a base64 `data:image/...` URI.
pub fn is_valid_image_data(image: &str) -> bool {
    IMAGE_DATA_URI_RE.is_match(image)
}

/// Ids from `requested` that are absent from `found`, in request order.
///
/// Used after a bulk lookup to report which referenced rows do not exist.
pub fn missing_ids(requested: &[DbId], found: &[DbId]) -> Vec<DbId> {
    let found: HashSet<DbId> = found.iter().copied().collect();
    let mut seen = HashSet::new();
    requested
        .iter()
        .copied()
        .filter(|id| !found.contains(id) && seen.insert(*id))
        .collect()
}

/// Format a list of ids for an error message: `3, 7, 12`.
pub fn format_ids(ids: &[DbId]) -> String {
    ids.iter()
        .map(DbId::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn required_text(errors: &mut FieldErrors, field: &str, value: Option<&str>) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => {
            errors.add(field, REQUIRED_MESSAGE);
            None
        }
    }
}

fn validate_image(errors: &mut FieldErrors, image: Option<&str>, mode: WriteMode) -> Option<String> {
    match image {
        Some(data) if !data.is_empty() => {
            if is_valid_image_data(data) {
                Some(data.to_string())
            } else {
                errors.add(
                    "image",
                    "Upload a valid image encoded as data:image/<type>;base64,<data>.",
                );
                None
            }
        }
        _ => {
            if mode == WriteMode::Create {
                errors.add("image", REQUIRED_MESSAGE);
            }
            None
        }
    }
}

fn validate_tags(errors: &mut FieldErrors, tags: Option<&[DbId]>) -> Option<Vec<DbId>> {
    match tags {
        Some(tags) if !tags.is_empty() => {
            let mut seen = HashSet::new();
            Some(tags.iter().copied().filter(|id| seen.insert(*id)).collect())
        }
        _ => {
            errors.add("tags", REQUIRED_MESSAGE);
            None
        }
    }
}

fn validate_ingredients(
    errors: &mut FieldErrors,
    entries: Option<&[IngredientAmountInput]>,
) -> Option<Vec<IngredientAmount>> {
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            errors.add("ingredients", REQUIRED_MESSAGE);
            return None;
        }
    };

    let mut seen = HashSet::new();
    let mut validated = Vec::with_capacity(entries.len());
    let mut valid = true;

    for entry in entries {
        let (Some(id), Some(amount)) = (entry.id, entry.amount) else {
            errors.add("ingredients", "Each ingredient needs both `id` and `amount`.");
            valid = false;
            continue;
        };

        if amount < MIN_INGREDIENT_AMOUNT {
            errors.add("ingredients", "Ingredient amount must be at least 1.");
            valid = false;
        } else if amount > MAX_INGREDIENT_AMOUNT {
            errors.add(
                "ingredients",
                format!("Ingredient amount must not exceed {MAX_INGREDIENT_AMOUNT}."),
            );
            valid = false;
        }

        if !seen.insert(id) {
            errors.add(
                "ingredients",
                format!("Ingredient {id} is listed more than once."),
            );
            valid = false;
        }

        if valid {
            validated.push(IngredientAmount {
                ingredient_id: id,
                amount: amount as i32,
            });
        }
    }

    valid.then_some(validated)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
