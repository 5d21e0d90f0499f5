//! Activity recording - stores a participant's activity and settles it into the cause.
//!
//! Recording is two writes that are deliberately not wrapped in one transaction:
//!
//! 1. insert the `cause_runners` row;
//! 2. atomically add its `distance_covered` to the parent cause.
//!
//! If the first write fails nothing else happens. If the second fails the runner row
//! stays committed and the caller gets [`Error::PartialSettlement`] carrying its id, so
//! the failure can be reported without blindly retrying (which would double count).

use crate::{
    entities::{Activity, CauseRunner, cause, cause_runner},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

/// Input for recording an activity against a cause.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordActivity {
    /// Distance the participant set out to cover, in km; must be positive
    pub distance_to_cover: f64,
    /// Distance actually covered, in km; must be positive
    pub distance_covered: f64,
    /// Elapsed time; leave empty when the activity is not finished
    #[serde(default)]
    pub duration: String,
    /// Activity performed
    pub activity: Activity,
    /// Money raised by this activity, if already known
    #[serde(default)]
    pub money_raised: f64,
}

/// Outcome of a fully settled recording.
#[derive(Debug, Clone, Serialize)]
pub struct Settlement {
    /// The runner row that was created
    pub runner: cause_runner::Model,
    /// The cause after its aggregate distance was bumped
    pub cause: cause::Model,
}

/// Records an activity by `owner_id` against `cause_id` and adds its distance to the cause.
///
/// # Errors
/// - [`Error::Validation`] before any write when either distance is not strictly
///   positive or `money_raised` is negative.
/// - The insert error itself when the runner cannot be stored.
/// - [`Error::PartialSettlement`] when the runner was stored but the cause could not be
///   found or updated.
#[instrument(skip(db, input), fields(distance = input.distance_covered))]
pub async fn record_activity(
    db: &DatabaseConnection,
    cause_id: &str,
    owner_id: &str,
    input: RecordActivity,
) -> Result<Settlement> {
    super::require_positive("distance_to_cover", input.distance_to_cover)?;
    super::require_positive("distance_covered", input.distance_covered)?;
    super::require_non_negative("money_raised", input.money_raised)?;

    let now = chrono::Utc::now();
    let runner = cause_runner::ActiveModel {
        id: Set(super::new_id()),
        cause_id: Set(cause_id.to_string()),
        owner_id: Set(owner_id.to_string()),
        activity: Set(input.activity),
        distance_to_cover: Set(input.distance_to_cover),
        distance_covered: Set(input.distance_covered),
        duration: Set(input.duration),
        money_raised: Set(input.money_raised),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    info!(runner_id = %runner.id, "Runner recorded");

    match settle(db, &runner).await {
        Ok(cause) => Ok(Settlement { runner, cause }),
        Err(source) => {
            error!(
                runner_id = %runner.id,
                error = %source,
                "Runner stored but cause distance was not updated"
            );
            Err(Error::PartialSettlement {
                runner_id: runner.id,
                source: Box::new(source),
            })
        }
    }
}

async fn settle(db: &DatabaseConnection, runner: &cause_runner::Model) -> Result<cause::Model> {
    super::cause::require_cause(db, &runner.cause_id).await?;
    super::cause::add_distance_atomic(db, &runner.cause_id, runner.distance_covered).await
}

/// Sets the duration of an unfinished activity owned by `caller_id`.
///
/// This is how a runner becomes eligible for the leaderboard. The cause total is not
/// touched because the distance was already counted when the activity was recorded.
#[instrument(skip(db))]
pub async fn complete_runner(
    db: &DatabaseConnection,
    runner_id: &str,
    caller_id: &str,
    duration: &str,
) -> Result<cause_runner::Model> {
    let duration = super::require_text("duration", duration)?;
    let runner = get_runner_by_id(db, runner_id)
        .await?
        .ok_or_else(|| Error::not_found("runner", runner_id))?;
    super::require_owner(&runner.owner_id, caller_id, "runner")?;

    let mut model: cause_runner::ActiveModel = runner.into();
    model.duration = Set(duration);
    model.updated_at = Set(chrono::Utc::now());
    model.update(db).await.map_err(Into::into)
}

/// Finds a runner by id.
pub async fn get_runner_by_id(
    db: &DatabaseConnection,
    runner_id: &str,
) -> Result<Option<cause_runner::Model>> {
    CauseRunner::find_by_id(runner_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists every runner in the order they were recorded.
pub async fn list_runners(db: &DatabaseConnection) -> Result<Vec<cause_runner::Model>> {
    CauseRunner::find()
        .order_by_asc(cause_runner::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists the runners of one cause in the order they were recorded.
pub async fn get_runners_by_cause(
    db: &DatabaseConnection,
    cause_id: &str,
) -> Result<Vec<cause_runner::Model>> {
    CauseRunner::find()
        .filter(cause_runner::Column::CauseId.eq(cause_id))
        .order_by_asc(cause_runner::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists the runners of several causes in the order they were recorded.
pub async fn get_runners_by_causes(
    db: &DatabaseConnection,
    cause_ids: Vec<String>,
) -> Result<Vec<cause_runner::Model>> {
    if cause_ids.is_empty() {
        return Ok(Vec::new());
    }
    CauseRunner::find()
        .filter(cause_runner::Column::CauseId.is_in(cause_ids))
        .order_by_asc(cause_runner::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists the activities one participant has recorded.
pub async fn get_runners_by_owner(
    db: &DatabaseConnection,
    owner_id: &str,
) -> Result<Vec<cause_runner::Model>> {
    CauseRunner::find()
        .filter(cause_runner::Column::OwnerId.eq(owner_id))
        .order_by_desc(cause_runner::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}
