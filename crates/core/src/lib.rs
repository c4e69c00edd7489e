//! Domain logic for the recipe-sharing backend.
//!
//! Everything here is database-free so it can be unit-tested directly:
//! recipe payload validation, shopping-list aggregation, collection and
//! subscription rules, and pagination helpers.

pub mod collection;
pub mod error;
pub mod pagination;
pub mod recipe;
pub mod shopping_list;
pub mod subscription;
pub mod types;
pub mod validation;
