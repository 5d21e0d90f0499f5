//! Challenge report generation.
//!
//! Summarizes how far a challenge has come: distance covered across its causes, money
//! collected from cause purchases, money pledged by sponsors, and progress towards the
//! distance and money targets.

use crate::{entities::challenge, errors::Result};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::instrument;

/// Aggregated view of one challenge.
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeReport {
    /// The challenge being reported on
    pub challenge: challenge::Model,
    /// Number of causes under the challenge
    pub cause_count: usize,
    /// Sum of `distance_covered` over all causes, in km
    pub distance_covered: f64,
    /// Distance progress as a percentage of `distance_to_cover`
    pub distance_progress_percent: f64,
    /// Money collected from cause purchases
    pub funds_raised: f64,
    /// Money promised by challenge and cause sponsors
    pub pledged_amount: f64,
    /// Raised plus pledged money as a percentage of `target_amount`
    pub target_progress_percent: f64,
}

/// Builds the report for a challenge.
///
/// # Errors
/// [`crate::errors::Error::NotFound`] when the challenge does not exist.
#[instrument(skip(db))]
pub async fn generate_challenge_report(
    db: &DatabaseConnection,
    challenge_id: &str,
) -> Result<ChallengeReport> {
    let challenge = super::challenge::require_challenge(db, challenge_id).await?;
    let causes = super::cause::get_causes_by_challenge(db, challenge_id).await?;

    let distance_covered: f64 = causes.iter().map(|c| c.distance_covered).sum();
    let funds_raised: f64 = causes.iter().map(|c| c.fund_amount).sum();

    let mut pledged_amount = super::sponsor::challenge_pledge_total(db, challenge_id).await?;
    for cause in &causes {
        pledged_amount += super::sponsor::list_cause_pledges(db, &cause.id)
            .await?
            .iter()
            .map(|p| p.total_amount)
            .sum::<f64>();
    }

    Ok(ChallengeReport {
        cause_count: causes.len(),
        distance_progress_percent: calculate_progress(
            distance_covered,
            challenge.distance_to_cover,
        ),
        target_progress_percent: calculate_progress(
            funds_raised + pledged_amount,
            challenge.target_amount,
        ),
        distance_covered,
        funds_raised,
        pledged_amount,
        challenge,
    })
}

/// Calculates progress of `achieved` towards `goal` as a percentage.
///
/// A zero goal reports 0% rather than dividing by zero. Values above 100% mean the
/// goal was exceeded.
#[must_use]
pub fn calculate_progress(achieved: f64, goal: f64) -> f64 {
    if goal == 0.0 {
        return 0.0;
    }

    (achieved / goal) * 100.0
}
