//! Finds the query to classify in a conversation.

use lawbot_core::Turn;
use tracing::{debug, info};

/// Returns the text of the most recent end-user turn.
///
/// The scan stops at the first user-authored turn from the end, so an older
/// user turn is never used in place of a newer one without text.
pub fn latest_user_query(turns: &[Turn]) -> Option<&str> {
    let Some(turn) = turns.iter().rev().find(|t| t.is_user()) else {
        debug!("EXTRACTOR: No user turn in {} turns", turns.len());
        return None;
    };

    let query = turn.text.as_deref().filter(|t| !t.is_empty())?;
    info!(
        "EXTRACTOR: User query: {}...",
        query.chars().take(50).collect::<String>()
    );
    Some(query)
}
