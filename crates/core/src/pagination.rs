//! Page-number pagination helpers shared by list endpoints.

/// Page size used when the client does not send `limit`.
pub const DEFAULT_PAGE_SIZE: i64 = 6;

/// Upper bound for a client-provided `limit`.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a user-provided page size into `1..=MAX_PAGE_SIZE`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// Clamp a 1-based page number to at least 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Row offset of a 1-based page.
pub fn page_offset(page: i64, limit: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(limit)
}

/// Normalize an optional `recipes_limit` cap: negative values mean "no cap".
pub fn recipes_cap(recipes_limit: Option<i64>) -> Option<i64> {
    recipes_limit.filter(|limit| *limit >= 0)
}
