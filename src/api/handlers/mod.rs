//! Route handlers grouped by resource.

/// Causes, activity recording, purchases and leaderboards
pub mod causes;
/// Challenges, reports and challenge leaderboards
pub mod challenges;
/// Posts and comments
pub mod posts;
/// Sponsor pledges
pub mod sponsors;
/// Users
pub mod users;

use crate::entities::cause_runner;
use serde::Serialize;

/// One ranked row of a leaderboard response.
#[derive(Debug, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based position on the board
    pub rank: usize,
    /// The runner record occupying that position
    #[serde(flatten)]
    pub runner: cause_runner::Model,
}

/// Numbers a ranked board from 1 and cuts it at `limit` entries.
#[must_use]
pub fn to_entries(board: Vec<cause_runner::Model>, limit: usize) -> Vec<LeaderboardEntry> {
    board
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, runner)| LeaderboardEntry {
            rank: index + 1,
            runner,
        })
        .collect()
}
