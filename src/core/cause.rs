//! Cause business logic - sub-campaigns attached to a challenge.
//!
//! `distance_covered` and `fund_amount` are never written here; they only move through
//! [`add_distance_atomic`] and [`add_funds_atomic`].

use crate::{
    entities::{Activity, Cause, cause},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::Expr};
use serde::Deserialize;
use tracing::{debug, info, instrument};

/// Input for creating a cause.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCause {
    /// Title, also the slug source
    pub name: String,
    /// Activity tracked by the cause
    pub activity: Activity,
    /// Distance goal in km
    pub distance_to_cover: f64,
    /// Price of one purchasable piece
    #[serde(default)]
    pub amount_per_piece: f64,
}

/// Partial update of a cause; aggregates are not editable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CauseChanges {
    /// New title (the slug is kept)
    pub name: Option<String>,
    /// New activity
    pub activity: Option<Activity>,
    /// New distance goal
    pub distance_to_cover: Option<f64>,
    /// New piece price
    pub amount_per_piece: Option<f64>,
}

/// Creates a cause under an existing challenge.
///
/// # Errors
/// [`Error::Validation`] for a blank name or a distance goal that is not positive,
/// [`Error::NotFound`] when the challenge does not exist.
#[instrument(skip(db, input), fields(name = %input.name))]
pub async fn create_cause(
    db: &DatabaseConnection,
    challenge_id: &str,
    owner_id: &str,
    input: NewCause,
) -> Result<cause::Model> {
    let name = super::require_text("name", &input.name)?;
    super::require_positive("distance_to_cover", input.distance_to_cover)?;
    super::require_non_negative("amount_per_piece", input.amount_per_piece)?;

    super::challenge::require_challenge(db, challenge_id).await?;

    let now = chrono::Utc::now();
    let model = cause::ActiveModel {
        id: Set(super::new_id()),
        challenge_id: Set(challenge_id.to_string()),
        owner_id: Set(owner_id.to_string()),
        slug: Set(super::slug::generate(&name)),
        name: Set(name),
        activity: Set(input.activity),
        distance_to_cover: Set(input.distance_to_cover),
        distance_covered: Set(0.0),
        amount_per_piece: Set(input.amount_per_piece),
        fund_amount: Set(0.0),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = model.insert(db).await?;
    info!(cause_id = %created.id, challenge_id, "Cause created");
    Ok(created)
}

/// Finds a cause by id.
pub async fn get_cause_by_id<C>(db: &C, cause_id: &str) -> Result<Option<cause::Model>>
where
    C: ConnectionTrait,
{
    Cause::find_by_id(cause_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a cause by id, failing with [`Error::NotFound`] on a miss.
pub async fn require_cause<C>(db: &C, cause_id: &str) -> Result<cause::Model>
where
    C: ConnectionTrait,
{
    get_cause_by_id(db, cause_id)
        .await?
        .ok_or_else(|| Error::not_found("cause", cause_id))
}

/// Finds a cause by slug.
pub async fn get_cause_by_slug(db: &DatabaseConnection, slug: &str) -> Result<Option<cause::Model>> {
    Cause::find()
        .filter(cause::Column::Slug.eq(slug))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists the causes of a challenge in creation order.
pub async fn get_causes_by_challenge(
    db: &DatabaseConnection,
    challenge_id: &str,
) -> Result<Vec<cause::Model>> {
    Cause::find()
        .filter(cause::Column::ChallengeId.eq(challenge_id))
        .order_by_asc(cause::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies `changes` to a cause owned by `caller_id`.
#[instrument(skip(db, changes))]
pub async fn update_cause(
    db: &DatabaseConnection,
    cause_id: &str,
    caller_id: &str,
    changes: CauseChanges,
) -> Result<cause::Model> {
    let existing = require_cause(db, cause_id).await?;
    super::require_owner(&existing.owner_id, caller_id, "cause")?;

    let name = changes
        .name
        .as_deref()
        .map(|n| super::require_text("name", n))
        .transpose()?;
    if let Some(distance) = changes.distance_to_cover {
        super::require_positive("distance_to_cover", distance)?;
    }
    if let Some(price) = changes.amount_per_piece {
        super::require_non_negative("amount_per_piece", price)?;
    }

    let mut model: cause::ActiveModel = existing.into();
    if let Some(name) = name {
        model.name = Set(name);
    }
    if let Some(activity) = changes.activity {
        model.activity = Set(activity);
    }
    if let Some(distance) = changes.distance_to_cover {
        model.distance_to_cover = Set(distance);
    }
    if let Some(price) = changes.amount_per_piece {
        model.amount_per_piece = Set(price);
    }
    model.updated_at = Set(chrono::Utc::now());

    model.update(db).await.map_err(Into::into)
}

/// Deletes a cause owned by `caller_id`. Runners, buyers and pledges are left in place.
#[instrument(skip(db))]
pub async fn delete_cause(db: &DatabaseConnection, cause_id: &str, caller_id: &str) -> Result<()> {
    let existing = require_cause(db, cause_id).await?;
    super::require_owner(&existing.owner_id, caller_id, "cause")?;
    existing.delete(db).await?;
    info!(cause_id, "Cause deleted");
    Ok(())
}

/// Adds `column += delta` on one cause in a single UPDATE statement.
async fn increment_column<C>(
    db: &C,
    cause_id: &str,
    column: cause::Column,
    delta: f64,
) -> Result<cause::Model>
where
    C: ConnectionTrait,
{
    let result = Cause::update_many()
        .col_expr(column, Expr::col(column).add(delta))
        .col_expr(cause::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
        .filter(cause::Column::Id.eq(cause_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::not_found("cause", cause_id));
    }

    debug!(cause_id, delta, "Cause aggregate incremented");
    require_cause(db, cause_id).await
}

/// Atomically adds `distance` to the cause's `distance_covered`.
///
/// Runs as `UPDATE causes SET distance_covered = distance_covered + ? WHERE id = ?`, so
/// concurrent recordings against the same cause cannot lose each other's updates.
pub async fn add_distance_atomic<C>(db: &C, cause_id: &str, distance: f64) -> Result<cause::Model>
where
    C: ConnectionTrait,
{
    increment_column(db, cause_id, cause::Column::DistanceCovered, distance).await
}

/// Atomically adds `amount` to the cause's `fund_amount`.
pub async fn add_funds_atomic<C>(db: &C, cause_id: &str, amount: f64) -> Result<cause::Model>
where
    C: ConnectionTrait,
{
    increment_column(db, cause_id, cause::Column::FundAmount, amount).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_cause_requires_challenge() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_cause(&db, "missing", "owner-1", cause_input("Wells")).await;
        assert!(matches!(
            result,
            Err(Error::NotFound { entity: "challenge", .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_cause_validation() -> Result<()> {
        let (db, challenge) = setup_with_challenge().await?;
        let mut input = cause_input("Wells");
        input.distance_to_cover = 0.0;
        let result = create_cause(&db, &challenge.id, "owner-1", input).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_list_causes() -> Result<()> {
        let (db, challenge) = setup_with_challenge().await?;
        let first = create_test_cause(&db, &challenge.id, "Clean Water").await?;
        let second = create_test_cause(&db, &challenge.id, "School Books").await?;

        assert_eq!(first.distance_covered, 0.0);
        assert_eq!(first.fund_amount, 0.0);
        assert!(first.slug.starts_with("clean-water-"));

        let causes = get_causes_by_challenge(&db, &challenge.id).await?;
        let ids: Vec<_> = causes.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);

        let by_slug = get_cause_by_slug(&db, &second.slug).await?.unwrap();
        assert_eq!(by_slug.id, second.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_atomic_increments() -> Result<()> {
        let (db, _challenge, cause) = setup_with_cause().await?;

        add_distance_atomic(&db, &cause.id, 5.0).await?;
        let updated = add_distance_atomic(&db, &cause.id, 8.2).await?;
        assert!((updated.distance_covered - 13.2).abs() < 1e-9);

        let funded = add_funds_atomic(&db, &cause.id, 40.0).await?;
        assert_eq!(funded.fund_amount, 40.0);

        let missing = add_distance_atomic(&db, "nope", 1.0).await;
        assert!(matches!(missing, Err(Error::NotFound { entity: "cause", .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_cause_keeps_aggregates() -> Result<()> {
        let (db, _challenge, cause) = setup_with_cause().await?;
        add_distance_atomic(&db, &cause.id, 3.0).await?;

        let changes = CauseChanges {
            activity: Some(Activity::Cycling),
            distance_to_cover: Some(120.0),
            ..Default::default()
        };
        assert!(matches!(
            update_cause(&db, &cause.id, "intruder", changes.clone()).await,
            Err(Error::Forbidden { .. })
        ));

        let updated = update_cause(&db, &cause.id, TEST_OWNER, changes).await?;
        assert_eq!(updated.activity, Activity::Cycling);
        assert_eq!(updated.distance_to_cover, 120.0);
        assert_eq!(updated.distance_covered, 3.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_cause() -> Result<()> {
        let (db, _challenge, cause) = setup_with_cause().await?;
        delete_cause(&db, &cause.id, TEST_OWNER).await?;
        assert!(get_cause_by_id(&db, &cause.id).await?.is_none());
        Ok(())
    }
}
