//! Leaderboard ranking over recorded activities.
//!
//! A board lists runners by `distance_covered`, highest first, keeping only one entry
//! per participant: the first one in ranked order that has a recorded duration.
//! Runners without a duration (unfinished activities) never appear, even when they are
//! a participant's only record.

use crate::{entities::cause_runner, errors::Result};
use sea_orm::DatabaseConnection;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Ranks `runners` into a deduplicated leaderboard.
///
/// The sort is stable, so runners with equal distances keep their input order. The
/// function is pure: the same input always yields the same board.
#[must_use]
pub fn rank_runners(mut runners: Vec<cause_runner::Model>) -> Vec<cause_runner::Model> {
    runners.sort_by(|a, b| b.distance_covered.total_cmp(&a.distance_covered));

    let mut seen_owners = HashSet::new();
    runners
        .into_iter()
        .filter(|runner| !runner.duration.is_empty())
        .filter(|runner| seen_owners.insert(runner.owner_id.clone()))
        .collect()
}

/// Returns the first `no_of_winner` entries of a ranked board.
#[must_use]
pub fn top_winners(
    ranked: &[cause_runner::Model],
    no_of_winner: i32,
) -> Vec<cause_runner::Model> {
    let count = usize::try_from(no_of_winner).unwrap_or(0);
    ranked.iter().take(count).cloned().collect()
}

/// Ranks every runner in the store.
#[instrument(skip(db))]
pub async fn get_leaderboard(db: &DatabaseConnection) -> Result<Vec<cause_runner::Model>> {
    let runners = super::runner::list_runners(db).await?;
    debug!(runners = runners.len(), "Ranking all runners");
    Ok(rank_runners(runners))
}

/// Ranks the runners of one cause.
#[instrument(skip(db))]
pub async fn get_cause_leaderboard(
    db: &DatabaseConnection,
    cause_id: &str,
) -> Result<Vec<cause_runner::Model>> {
    let runners = super::runner::get_runners_by_cause(db, cause_id).await?;
    Ok(rank_runners(runners))
}

/// Ranks the runners of every cause under one challenge.
#[instrument(skip(db))]
pub async fn get_challenge_leaderboard(
    db: &DatabaseConnection,
    challenge_id: &str,
) -> Result<Vec<cause_runner::Model>> {
    let cause_ids = super::cause::get_causes_by_challenge(db, challenge_id)
        .await?
        .into_iter()
        .map(|cause| cause.id)
        .collect();
    let runners = super::runner::get_runners_by_causes(db, cause_ids).await?;
    Ok(rank_runners(runners))
}

/// Ranks a challenge's runners and keeps its configured number of winners.
pub async fn get_challenge_winners(
    db: &DatabaseConnection,
    challenge_id: &str,
) -> Result<Vec<cause_runner::Model>> {
    let challenge = super::challenge::require_challenge(db, challenge_id).await?;
    let board = get_challenge_leaderboard(db, challenge_id).await?;
    Ok(top_winners(&board, challenge.no_of_winner))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::Activity;
    use crate::test_utils::*;

    fn runner(id: &str, owner: &str, distance: f64, duration: &str) -> cause_runner::Model {
        let now = chrono::Utc::now();
        cause_runner::Model {
            id: id.to_string(),
            cause_id: "cause-1".to_string(),
            owner_id: owner.to_string(),
            activity: Activity::Running,
            distance_to_cover: 10.0,
            distance_covered: distance,
            duration: duration.to_string(),
            money_raised: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    fn ids(board: &[cause_runner::Model]) -> Vec<&str> {
        board.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(rank_runners(Vec::new()).is_empty());
    }

    #[test]
    fn test_orders_by_distance_descending() {
        let board = rank_runners(vec![
            runner("a", "u1", 3.0, "00:20:00"),
            runner("b", "u2", 9.5, "00:50:00"),
            runner("c", "u3", 6.0, "00:35:00"),
        ]);
        assert_eq!(ids(&board), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let board = rank_runners(vec![
            runner("a", "u1", 5.0, "00:30:00"),
            runner("b", "u2", 7.0, "00:40:00"),
            runner("c", "u3", 5.0, "00:31:00"),
            runner("d", "u4", 5.0, "00:29:00"),
        ]);
        assert_eq!(ids(&board), vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_one_entry_per_owner() {
        let board = rank_runners(vec![
            runner("a", "u1", 4.0, "00:25:00"),
            runner("b", "u1", 12.0, "01:10:00"),
            runner("c", "u1", 12.0, "01:05:00"),
            runner("d", "u2", 8.0, "00:45:00"),
        ]);
        assert_eq!(ids(&board), vec!["b", "d"]);
    }

    #[test]
    fn test_unfinished_runs_are_excluded() {
        let board = rank_runners(vec![
            runner("a", "u1", 20.0, ""),
            runner("b", "u1", 6.0, "00:40:00"),
            runner("c", "u2", 30.0, ""),
        ]);
        // u1's best run is unfinished, so their next finished run stands in
        assert_eq!(ids(&board), vec!["b"]);
    }

    #[test]
    fn test_only_empty_duration_counts_as_unfinished() {
        let board = rank_runners(vec![
            runner("a", "u1", 5.0, " "),
            runner("b", "u1", 3.0, "00:20:00"),
        ]);
        assert_eq!(ids(&board), vec!["a"]);
    }

    #[test]
    fn test_all_unfinished_yields_empty_board() {
        let board = rank_runners(vec![runner("a", "u1", 2.0, ""), runner("b", "u2", 3.0, "")]);
        assert!(board.is_empty());
    }

    #[test]
    fn test_ranking_is_idempotent() {
        let input = vec![
            runner("a", "u1", 2.0, "00:10:00"),
            runner("b", "u2", 2.0, "00:11:00"),
            runner("c", "u1", 9.0, "00:55:00"),
        ];
        let first = rank_runners(input.clone());
        let second = rank_runners(input);
        assert_eq!(first, second);
        assert_eq!(rank_runners(first.clone()), first);
    }

    #[test]
    fn test_top_winners() {
        let board = rank_runners(vec![
            runner("a", "u1", 3.0, "x"),
            runner("b", "u2", 2.0, "x"),
            runner("c", "u3", 1.0, "x"),
        ]);
        assert_eq!(ids(&top_winners(&board, 2)), vec!["a", "b"]);
        assert_eq!(top_winners(&board, 10).len(), 3);
        assert!(top_winners(&board, 0).is_empty());
        assert!(top_winners(&board, -1).is_empty());
    }

    #[tokio::test]
    async fn test_challenge_leaderboard_and_winners() -> Result<()> {
        let (db, challenge, cause) = setup_with_cause().await?;
        let other = create_test_cause(&db, &challenge.id, "Second Cause").await?;
        let elsewhere = create_test_challenge(&db, TEST_OWNER, "Elsewhere").await?;
        let unrelated = create_test_cause(&db, &elsewhere.id, "Far Cause").await?;

        record_test_activity(&db, &cause.id, "u1", 4.0, "00:25:00").await?;
        record_test_activity(&db, &other.id, "u2", 9.0, "00:50:00").await?;
        record_test_activity(&db, &other.id, "u1", 6.0, "00:33:00").await?;
        record_test_activity(&db, &unrelated.id, "u3", 50.0, "04:00:00").await?;

        let board = get_challenge_leaderboard(&db, &challenge.id).await?;
        let owners: Vec<_> = board.iter().map(|r| r.owner_id.as_str()).collect();
        assert_eq!(owners, vec!["u2", "u1"]);
        assert_eq!(board[1].distance_covered, 6.0);

        let cause_board = get_cause_leaderboard(&db, &cause.id).await?;
        assert_eq!(cause_board.len(), 1);

        let everyone = get_leaderboard(&db).await?;
        assert_eq!(everyone[0].owner_id, "u3");
        assert_eq!(everyone.len(), 3);

        // Test challenge has a single winner slot
        let winners = get_challenge_winners(&db, &challenge.id).await?;
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].owner_id, "u2");
        Ok(())
    }
}
