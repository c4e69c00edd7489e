//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the corresponding repository in `foodgram_db`,
//! apply domain rules from `foodgram_core`, and map errors via
//! [`AppError`](crate::error::AppError).

pub mod collections;
pub mod ingredients;
pub mod recipes;
pub mod tags;
pub mod users;
