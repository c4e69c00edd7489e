//! Rules for following authors.

use crate::error::CoreError;
use crate::types::DbId;

/// Reject a follow where the follower and the author are the same user.
///
/// Checked before any lookup so self-subscription fails whatever the
/// current subscription state is.
pub fn ensure_not_self(follower_id: DbId, author_id: DbId) -> Result<(), CoreError> {
    if follower_id == author_id {
        return Err(CoreError::Conflict(
            "You cannot subscribe to yourself.".to_string(),
        ));
    }
    Ok(())
}

pub fn already_subscribed(author_id: DbId) -> CoreError {
    CoreError::Conflict(format!(
        "You are already subscribed to the author with id {author_id}."
    ))
}

pub fn not_subscribed(author_id: DbId) -> CoreError {
    CoreError::Conflict(format!(
        "You are not subscribed to the author with id {author_id}."
    ))
}
