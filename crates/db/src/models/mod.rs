//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts where the table takes writes
//! - Read-side projections assembled by the repositories

pub mod ingredient;
pub mod recipe;
pub mod tag;
pub mod user;
