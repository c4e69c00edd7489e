//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token generation and validation.
//!
//! Credential handling (login, registration, password storage) belongs to
//! the identity service; this server only verifies the tokens it issues.

pub mod jwt;
