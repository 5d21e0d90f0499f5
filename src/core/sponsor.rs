//! Sponsor pledges - money promised per kilometre against a challenge or a cause.
//!
//! A pledge's `total_amount` is `distance * amount_per_km`. It is computed when the
//! pledge is created and recomputed by the update functions whenever either operand
//! changes; nothing else ever writes it.

use crate::{
    entities::{SponsorCause, SponsorChallenge, sponsor_cause, sponsor_challenge},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::{info, instrument};

/// Pledge terms supplied by a sponsor.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PledgeTerms {
    /// Kilometres the sponsor pays for
    pub distance: f64,
    /// Money per kilometre
    pub amount_per_km: f64,
}

/// Partial change of pledge terms; `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PledgeChanges {
    /// New distance
    pub distance: Option<f64>,
    /// New rate
    pub amount_per_km: Option<f64>,
}

/// Total money committed by a linear per-km pledge.
#[must_use]
pub fn pledge_total(distance: f64, amount_per_km: f64) -> f64 {
    amount_per_km * distance
}

fn validate_terms(terms: PledgeTerms) -> Result<()> {
    super::require_positive("distance", terms.distance)?;
    super::require_positive("amount_per_km", terms.amount_per_km)
}

fn merge_terms(changes: PledgeChanges, distance: f64, amount_per_km: f64) -> Result<PledgeTerms> {
    let terms = PledgeTerms {
        distance: changes.distance.unwrap_or(distance),
        amount_per_km: changes.amount_per_km.unwrap_or(amount_per_km),
    };
    validate_terms(terms)?;
    Ok(terms)
}

/// Pledges money against a challenge.
///
/// # Errors
/// [`Error::Validation`] unless both terms are positive, [`Error::NotFound`] when the
/// challenge does not exist.
#[instrument(skip(db))]
pub async fn create_challenge_pledge(
    db: &DatabaseConnection,
    challenge_id: &str,
    sponsor_id: &str,
    terms: PledgeTerms,
) -> Result<sponsor_challenge::Model> {
    validate_terms(terms)?;
    super::challenge::require_challenge(db, challenge_id).await?;

    let now = chrono::Utc::now();
    let pledge = sponsor_challenge::ActiveModel {
        id: Set(super::new_id()),
        sponsor_id: Set(sponsor_id.to_string()),
        challenge_id: Set(challenge_id.to_string()),
        distance: Set(terms.distance),
        amount_per_km: Set(terms.amount_per_km),
        total_amount: Set(pledge_total(terms.distance, terms.amount_per_km)),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    info!(pledge_id = %pledge.id, total = pledge.total_amount, "Challenge pledge created");
    Ok(pledge)
}

/// Pledges money against a cause.
#[instrument(skip(db))]
pub async fn create_cause_pledge(
    db: &DatabaseConnection,
    cause_id: &str,
    sponsor_id: &str,
    terms: PledgeTerms,
) -> Result<sponsor_cause::Model> {
    validate_terms(terms)?;
    super::cause::require_cause(db, cause_id).await?;

    let now = chrono::Utc::now();
    let pledge = sponsor_cause::ActiveModel {
        id: Set(super::new_id()),
        sponsor_id: Set(sponsor_id.to_string()),
        cause_id: Set(cause_id.to_string()),
        distance: Set(terms.distance),
        amount_per_km: Set(terms.amount_per_km),
        total_amount: Set(pledge_total(terms.distance, terms.amount_per_km)),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    info!(pledge_id = %pledge.id, total = pledge.total_amount, "Cause pledge created");
    Ok(pledge)
}

/// Finds a challenge pledge by id, failing with [`Error::NotFound`] on a miss.
pub async fn get_challenge_pledge(
    db: &DatabaseConnection,
    pledge_id: &str,
) -> Result<sponsor_challenge::Model> {
    SponsorChallenge::find_by_id(pledge_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("challenge pledge", pledge_id))
}

/// Finds a cause pledge by id, failing with [`Error::NotFound`] on a miss.
pub async fn get_cause_pledge(
    db: &DatabaseConnection,
    pledge_id: &str,
) -> Result<sponsor_cause::Model> {
    SponsorCause::find_by_id(pledge_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("cause pledge", pledge_id))
}

/// Lists the pledges made against a challenge, largest first.
pub async fn list_challenge_pledges(
    db: &DatabaseConnection,
    challenge_id: &str,
) -> Result<Vec<sponsor_challenge::Model>> {
    SponsorChallenge::find()
        .filter(sponsor_challenge::Column::ChallengeId.eq(challenge_id))
        .order_by_desc(sponsor_challenge::Column::TotalAmount)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists the pledges made against a cause, largest first.
pub async fn list_cause_pledges(
    db: &DatabaseConnection,
    cause_id: &str,
) -> Result<Vec<sponsor_cause::Model>> {
    SponsorCause::find()
        .filter(sponsor_cause::Column::CauseId.eq(cause_id))
        .order_by_desc(sponsor_cause::Column::TotalAmount)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sum of every pledge total on a challenge.
pub async fn challenge_pledge_total(db: &DatabaseConnection, challenge_id: &str) -> Result<f64> {
    Ok(list_challenge_pledges(db, challenge_id)
        .await?
        .iter()
        .map(|p| p.total_amount)
        .sum())
}

/// Changes the terms of a challenge pledge and recomputes its total.
#[instrument(skip(db))]
pub async fn update_challenge_pledge(
    db: &DatabaseConnection,
    pledge_id: &str,
    caller_id: &str,
    changes: PledgeChanges,
) -> Result<sponsor_challenge::Model> {
    let pledge = get_challenge_pledge(db, pledge_id).await?;
    super::require_owner(&pledge.sponsor_id, caller_id, "pledge")?;
    let terms = merge_terms(changes, pledge.distance, pledge.amount_per_km)?;

    let mut model: sponsor_challenge::ActiveModel = pledge.into();
    model.distance = Set(terms.distance);
    model.amount_per_km = Set(terms.amount_per_km);
    model.total_amount = Set(pledge_total(terms.distance, terms.amount_per_km));
    model.updated_at = Set(chrono::Utc::now());
    model.update(db).await.map_err(Into::into)
}

/// Changes the terms of a cause pledge and recomputes its total.
#[instrument(skip(db))]
pub async fn update_cause_pledge(
    db: &DatabaseConnection,
    pledge_id: &str,
    caller_id: &str,
    changes: PledgeChanges,
) -> Result<sponsor_cause::Model> {
    let pledge = get_cause_pledge(db, pledge_id).await?;
    super::require_owner(&pledge.sponsor_id, caller_id, "pledge")?;
    let terms = merge_terms(changes, pledge.distance, pledge.amount_per_km)?;

    let mut model: sponsor_cause::ActiveModel = pledge.into();
    model.distance = Set(terms.distance);
    model.amount_per_km = Set(terms.amount_per_km);
    model.total_amount = Set(pledge_total(terms.distance, terms.amount_per_km));
    model.updated_at = Set(chrono::Utc::now());
    model.update(db).await.map_err(Into::into)
}

/// Withdraws a challenge pledge made by `caller_id`.
pub async fn delete_challenge_pledge(
    db: &DatabaseConnection,
    pledge_id: &str,
    caller_id: &str,
) -> Result<()> {
    let pledge = get_challenge_pledge(db, pledge_id).await?;
    super::require_owner(&pledge.sponsor_id, caller_id, "pledge")?;
    pledge.delete(db).await?;
    Ok(())
}

/// Withdraws a cause pledge made by `caller_id`.
pub async fn delete_cause_pledge(
    db: &DatabaseConnection,
    pledge_id: &str,
    caller_id: &str,
) -> Result<()> {
    let pledge = get_cause_pledge(db, pledge_id).await?;
    super::require_owner(&pledge.sponsor_id, caller_id, "pledge")?;
    pledge.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    const TERMS: PledgeTerms = PledgeTerms {
        distance: 10.5,
        amount_per_km: 5.0,
    };

    #[test]
    fn test_pledge_total() {
        assert_eq!(pledge_total(10.5, 5.0), 52.5);
        assert_eq!(pledge_total(0.0, 5.0), 0.0);
    }

    #[tokio::test]
    async fn test_zero_terms_rejected() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let zero_distance = PledgeTerms {
            distance: 0.0,
            amount_per_km: 5.0,
        };
        let zero_rate = PledgeTerms {
            distance: 3.0,
            amount_per_km: 0.0,
        };

        assert!(matches!(
            create_challenge_pledge(&db, "c", "s", zero_distance).await,
            Err(Error::Validation { .. })
        ));
        assert!(matches!(
            create_cause_pledge(&db, "c", "s", zero_rate).await,
            Err(Error::Validation { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_challenge_pledge_lifecycle() -> Result<()> {
        let (db, challenge) = setup_with_challenge().await?;

        let pledge = create_challenge_pledge(&db, &challenge.id, "sponsor-1", TERMS).await?;
        assert_eq!(pledge.total_amount, 52.5);

        create_challenge_pledge(
            &db,
            &challenge.id,
            "sponsor-2",
            PledgeTerms {
                distance: 2.0,
                amount_per_km: 1.5,
            },
        )
        .await?;
        assert_eq!(challenge_pledge_total(&db, &challenge.id).await?, 55.5);

        let changes = PledgeChanges {
            distance: Some(20.0),
            amount_per_km: None,
        };
        assert!(matches!(
            update_challenge_pledge(&db, &pledge.id, "sponsor-2", changes).await,
            Err(Error::Forbidden { .. })
        ));
        let updated = update_challenge_pledge(&db, &pledge.id, "sponsor-1", changes).await?;
        assert_eq!(updated.total_amount, 100.0);

        delete_challenge_pledge(&db, &pledge.id, "sponsor-1").await?;
        assert_eq!(list_challenge_pledges(&db, &challenge.id).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_cause_pledge_lifecycle() -> Result<()> {
        let (db, _challenge, cause) = setup_with_cause().await?;

        let missing = create_cause_pledge(&db, "nope", "sponsor-1", TERMS).await;
        assert!(matches!(missing, Err(Error::NotFound { entity: "cause", .. })));

        let pledge = create_cause_pledge(&db, &cause.id, "sponsor-1", TERMS).await?;
        assert_eq!(pledge.total_amount, 52.5);

        let updated = update_cause_pledge(
            &db,
            &pledge.id,
            "sponsor-1",
            PledgeChanges {
                distance: None,
                amount_per_km: Some(2.0),
            },
        )
        .await?;
        assert_eq!(updated.total_amount, 21.0);

        let invalid = update_cause_pledge(
            &db,
            &pledge.id,
            "sponsor-1",
            PledgeChanges {
                distance: Some(0.0),
                amount_per_km: None,
            },
        )
        .await;
        assert!(matches!(invalid, Err(Error::Validation { .. })));

        assert_eq!(list_cause_pledges(&db, &cause.id).await?, vec![updated]);
        delete_cause_pledge(&db, &pledge.id, "sponsor-1").await?;
        assert!(list_cause_pledges(&db, &cause.id).await?.is_empty());
        Ok(())
    }
}
