//! Shared response types for API handlers.

use serde::Serialize;

/// One page of a paginated listing.
///
/// ```json
/// { "count": 42, "page": 2, "limit": 6, "results": [ ... ] }
/// ```
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    /// Total number of items across all pages.
    pub count: i64,
    /// 1-based page number.
    pub page: i64,
    /// Page size actually applied.
    pub limit: i64,
    pub results: Vec<T>,
}
