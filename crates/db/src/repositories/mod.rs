//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod collection_repo;
pub mod ingredient_repo;
pub mod recipe_repo;
pub mod subscription_repo;
pub mod tag_repo;
pub mod user_repo;

pub use collection_repo::CollectionRepo;
pub use ingredient_repo::IngredientRepo;
pub use recipe_repo::RecipeRepo;
pub use subscription_repo::SubscriptionRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
