//! Request extractors for the authenticated principal.
//!
//! - [`auth::AuthUser`] -- required principal; 401 without a valid token.
//! - [`auth::MaybeAuthUser`] -- optional principal for public reads.

pub mod auth;
