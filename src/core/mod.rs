//! Core business logic - framework-agnostic operations for the fundraising domain.
//!
//! Each submodule owns one entity family. Functions take a `SeaORM` connection,
//! validate their inputs before touching the store, and return the crate `Result`.

/// Cause purchases
pub mod buyer;
/// Causes under a challenge
pub mod cause;
/// Challenges
pub mod challenge;
/// Leaderboard ranking
pub mod leaderboard;
/// Posts and comments
pub mod post;
/// Challenge progress and funding summaries
pub mod report;
/// Activity recording and cause settlement
pub mod runner;
/// URL slugs
pub mod slug;
/// Sponsor pledges
pub mod sponsor;
/// Users
pub mod user;

use crate::errors::{Error, Result};

/// Generates a fresh unique identifier for a new record.
#[must_use]
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Rejects values that are not finite numbers strictly above zero.
pub(crate) fn require_positive(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "{field} must be greater than zero, got {value}"
        )))
    }
}

/// Rejects negative or non-finite values; zero is allowed.
pub(crate) fn require_non_negative(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "{field} must be zero or more, got {value}"
        )))
    }
}

/// Trims `value` and rejects it when nothing is left.
pub(crate) fn require_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// Fails with [`Error::Forbidden`] unless `caller_id` owns the record.
pub(crate) fn require_owner(owner_id: &str, caller_id: &str, what: &str) -> Result<()> {
    if owner_id == caller_id {
        Ok(())
    } else {
        Err(Error::forbidden(format!("only the owner can modify this {what}")))
    }
}
