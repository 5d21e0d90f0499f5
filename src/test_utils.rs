//! Shared test utilities for `StrideFund`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        cause::{self, NewCause},
        challenge::{self, NewChallenge},
        runner::{self, RecordActivity, Settlement},
    },
    entities::{self, Activity, ChallengeMode},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Owner used by the `setup_with_*` helpers.
pub const TEST_OWNER: &str = "owner-1";

/// Installs a tracing subscriber that writes through the test harness.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Challenge input with sensible defaults.
///
/// # Defaults
/// * `mode`: Free
/// * `distance_to_cover`: 100.0
/// * `target_amount`: 1000.0
/// * `target_amount_per_km`: 10.0
/// * `no_of_winner`: 1
#[must_use]
pub fn challenge_input(name: &str) -> NewChallenge {
    NewChallenge {
        name: name.to_string(),
        description: "Test challenge".to_string(),
        mode: ChallengeMode::Free,
        distance_to_cover: 100.0,
        target_amount: 1000.0,
        target_amount_per_km: 10.0,
        no_of_winner: 1,
    }
}

/// Cause input with sensible defaults (running, 50 km goal, 5.0 per piece).
#[must_use]
pub fn cause_input(name: &str) -> NewCause {
    NewCause {
        name: name.to_string(),
        activity: Activity::Running,
        distance_to_cover: 50.0,
        amount_per_piece: 5.0,
    }
}

/// Activity input for a run with the given distances and duration.
#[must_use]
pub fn activity_input(distance_to_cover: f64, distance_covered: f64, duration: &str) -> RecordActivity {
    RecordActivity {
        distance_to_cover,
        distance_covered,
        duration: duration.to_string(),
        activity: Activity::Running,
        money_raised: 0.0,
    }
}

/// Creates a test challenge with default settings.
pub async fn create_test_challenge(
    db: &DatabaseConnection,
    owner_id: &str,
    name: &str,
) -> Result<entities::challenge::Model> {
    challenge::create_challenge(db, owner_id, challenge_input(name)).await
}

/// Creates a test cause owned by [`TEST_OWNER`].
pub async fn create_test_cause(
    db: &DatabaseConnection,
    challenge_id: &str,
    name: &str,
) -> Result<entities::cause::Model> {
    cause::create_cause(db, challenge_id, TEST_OWNER, cause_input(name)).await
}

/// Records a finished activity where the target equals the covered distance.
pub async fn record_test_activity(
    db: &DatabaseConnection,
    cause_id: &str,
    owner_id: &str,
    distance: f64,
    duration: &str,
) -> Result<Settlement> {
    runner::record_activity(
        db,
        cause_id,
        owner_id,
        activity_input(distance, distance, duration),
    )
    .await
}

/// Sets up a complete test environment with a challenge.
/// Returns (db, challenge) for common test scenarios.
pub async fn setup_with_challenge() -> Result<(DatabaseConnection, entities::challenge::Model)> {
    let db = setup_test_db().await?;
    let challenge = create_test_challenge(&db, TEST_OWNER, "Test Challenge").await?;
    Ok((db, challenge))
}

/// Sets up a complete test environment with a challenge and one cause.
/// Returns (db, challenge, cause) for settlement and leaderboard tests.
pub async fn setup_with_cause() -> Result<(
    DatabaseConnection,
    entities::challenge::Model,
    entities::cause::Model,
)> {
    let (db, challenge) = setup_with_challenge().await?;
    let cause = create_test_cause(&db, &challenge.id, "Test Cause").await?;
    Ok((db, challenge, cause))
}
