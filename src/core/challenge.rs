//! Challenge business logic - creating, finding, editing and removing challenges.
//!
//! Only the owner of a challenge may update or delete it. Deleting a challenge does
//! not touch its causes or pledges; those keep their `challenge_id` reference.

use crate::{
    entities::{Challenge, ChallengeMode, challenge},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::{info, instrument};

/// Input for creating a challenge.
#[derive(Debug, Clone, Deserialize)]
pub struct NewChallenge {
    /// Title, also the slug source
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Free or paid participation
    pub mode: ChallengeMode,
    /// Total distance goal in km
    pub distance_to_cover: f64,
    /// Money target
    pub target_amount: f64,
    /// Money target per km
    pub target_amount_per_km: f64,
    /// Number of leaderboard winners
    pub no_of_winner: i32,
}

/// Partial update of a challenge; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChallengeChanges {
    /// New title (the slug is kept)
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New participation mode
    pub mode: Option<ChallengeMode>,
    /// New distance goal
    pub distance_to_cover: Option<f64>,
    /// New money target
    pub target_amount: Option<f64>,
    /// New per-km target
    pub target_amount_per_km: Option<f64>,
    /// New winner count
    pub no_of_winner: Option<i32>,
}

fn validate_amounts(distance: f64, target: f64, per_km: f64) -> Result<()> {
    super::require_non_negative("distance_to_cover", distance)?;
    super::require_non_negative("target_amount", target)?;
    super::require_non_negative("target_amount_per_km", per_km)
}

fn validate_winners(no_of_winner: i32) -> Result<()> {
    if no_of_winner < 1 {
        return Err(Error::validation("no_of_winner must be at least 1"));
    }
    Ok(())
}

/// Creates a challenge owned by `owner_id`.
///
/// # Errors
/// Returns [`Error::Validation`] before any write when the name is blank, an amount is
/// negative or not finite, or `no_of_winner` is below one.
#[instrument(skip(db, input), fields(name = %input.name))]
pub async fn create_challenge(
    db: &DatabaseConnection,
    owner_id: &str,
    input: NewChallenge,
) -> Result<challenge::Model> {
    let name = super::require_text("name", &input.name)?;
    validate_amounts(
        input.distance_to_cover,
        input.target_amount,
        input.target_amount_per_km,
    )?;
    validate_winners(input.no_of_winner)?;

    let now = chrono::Utc::now();
    let model = challenge::ActiveModel {
        id: Set(super::new_id()),
        owner_id: Set(owner_id.to_string()),
        slug: Set(super::slug::generate(&name)),
        name: Set(name),
        description: Set(input.description.trim().to_string()),
        mode: Set(input.mode),
        distance_to_cover: Set(input.distance_to_cover),
        target_amount: Set(input.target_amount),
        target_amount_per_km: Set(input.target_amount_per_km),
        no_of_winner: Set(input.no_of_winner),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = model.insert(db).await?;
    info!(challenge_id = %created.id, slug = %created.slug, "Challenge created");
    Ok(created)
}

/// Finds a challenge by id.
pub async fn get_challenge_by_id(
    db: &DatabaseConnection,
    challenge_id: &str,
) -> Result<Option<challenge::Model>> {
    Challenge::find_by_id(challenge_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a challenge by id, failing with [`Error::NotFound`] on a miss.
pub async fn require_challenge(
    db: &DatabaseConnection,
    challenge_id: &str,
) -> Result<challenge::Model> {
    get_challenge_by_id(db, challenge_id)
        .await?
        .ok_or_else(|| Error::not_found("challenge", challenge_id))
}

/// Finds a challenge by slug.
pub async fn get_challenge_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<Option<challenge::Model>> {
    Challenge::find()
        .filter(challenge::Column::Slug.eq(slug))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists all challenges, newest first.
pub async fn list_challenges(db: &DatabaseConnection) -> Result<Vec<challenge::Model>> {
    Challenge::find()
        .order_by_desc(challenge::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists the challenges created by one user, newest first.
pub async fn list_challenges_by_owner(
    db: &DatabaseConnection,
    owner_id: &str,
) -> Result<Vec<challenge::Model>> {
    Challenge::find()
        .filter(challenge::Column::OwnerId.eq(owner_id))
        .order_by_desc(challenge::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds challenges whose name contains `term`.
pub async fn search_challenges(
    db: &DatabaseConnection,
    term: &str,
) -> Result<Vec<challenge::Model>> {
    Challenge::find()
        .filter(challenge::Column::Name.contains(term.trim()))
        .order_by_asc(challenge::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies `changes` to a challenge owned by `caller_id`.
///
/// # Errors
/// [`Error::NotFound`] for an unknown id, [`Error::Forbidden`] when the caller is not
/// the owner, and [`Error::Validation`] for invalid new values.
#[instrument(skip(db, changes))]
pub async fn update_challenge(
    db: &DatabaseConnection,
    challenge_id: &str,
    caller_id: &str,
    changes: ChallengeChanges,
) -> Result<challenge::Model> {
    let existing = require_challenge(db, challenge_id).await?;
    super::require_owner(&existing.owner_id, caller_id, "challenge")?;

    let name = changes
        .name
        .as_deref()
        .map(|n| super::require_text("name", n))
        .transpose()?;
    let distance = changes
        .distance_to_cover
        .unwrap_or(existing.distance_to_cover);
    let target = changes.target_amount.unwrap_or(existing.target_amount);
    let per_km = changes
        .target_amount_per_km
        .unwrap_or(existing.target_amount_per_km);
    validate_amounts(distance, target, per_km)?;
    let winners = changes.no_of_winner.unwrap_or(existing.no_of_winner);
    validate_winners(winners)?;

    let mut model: challenge::ActiveModel = existing.into();
    if let Some(name) = name {
        model.name = Set(name);
    }
    if let Some(description) = changes.description {
        model.description = Set(description.trim().to_string());
    }
    if let Some(mode) = changes.mode {
        model.mode = Set(mode);
    }
    model.distance_to_cover = Set(distance);
    model.target_amount = Set(target);
    model.target_amount_per_km = Set(per_km);
    model.no_of_winner = Set(winners);
    model.updated_at = Set(chrono::Utc::now());

    model.update(db).await.map_err(Into::into)
}

/// Deletes a challenge owned by `caller_id`.
#[instrument(skip(db))]
pub async fn delete_challenge(
    db: &DatabaseConnection,
    challenge_id: &str,
    caller_id: &str,
) -> Result<()> {
    let existing = require_challenge(db, challenge_id).await?;
    super::require_owner(&existing.owner_id, caller_id, "challenge")?;
    existing.delete(db).await?;
    info!(challenge_id, "Challenge deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_challenge_validation() -> Result<()> {
        // No query results appended: any store access would fail the test
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let mut input = challenge_input("   ");
        assert!(matches!(
            create_challenge(&db, "owner", input.clone()).await,
            Err(Error::Validation { .. })
        ));

        input.name = "Lagos 10k".to_string();
        input.distance_to_cover = -1.0;
        assert!(matches!(
            create_challenge(&db, "owner", input.clone()).await,
            Err(Error::Validation { .. })
        ));

        input.distance_to_cover = 10.0;
        input.no_of_winner = 0;
        assert!(matches!(
            create_challenge(&db, "owner", input).await,
            Err(Error::Validation { .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_lookup_challenge() -> Result<()> {
        let db = setup_test_db().await?;
        let challenge = create_test_challenge(&db, "owner-1", "Run for Water").await?;

        assert!(challenge.slug.starts_with("run-for-water-"));
        assert_eq!(challenge.mode, ChallengeMode::Free);

        let by_slug = get_challenge_by_slug(&db, &challenge.slug).await?.unwrap();
        assert_eq!(by_slug, challenge);

        let by_owner = list_challenges_by_owner(&db, "owner-1").await?;
        assert_eq!(by_owner.len(), 1);
        assert!(list_challenges_by_owner(&db, "someone-else").await?.is_empty());

        let found = search_challenges(&db, "Water").await?;
        assert_eq!(found.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_challenge_owner_only() -> Result<()> {
        let db = setup_test_db().await?;
        let challenge = create_test_challenge(&db, "owner-1", "Ride Out").await?;

        let changes = ChallengeChanges {
            target_amount: Some(2500.0),
            ..Default::default()
        };
        let result = update_challenge(&db, &challenge.id, "intruder", changes.clone()).await;
        assert!(matches!(result, Err(Error::Forbidden { .. })));

        let updated = update_challenge(&db, &challenge.id, "owner-1", changes).await?;
        assert_eq!(updated.target_amount, 2500.0);
        assert_eq!(updated.slug, challenge.slug);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_challenge() -> Result<()> {
        let db = setup_test_db().await?;
        let challenge = create_test_challenge(&db, "owner-1", "Walk It").await?;

        assert!(matches!(
            delete_challenge(&db, &challenge.id, "intruder").await,
            Err(Error::Forbidden { .. })
        ));
        delete_challenge(&db, &challenge.id, "owner-1").await?;
        assert!(get_challenge_by_id(&db, &challenge.id).await?.is_none());

        assert!(matches!(
            delete_challenge(&db, &challenge.id, "owner-1").await,
            Err(Error::NotFound { entity: "challenge", .. })
        ));
        Ok(())
    }
}
