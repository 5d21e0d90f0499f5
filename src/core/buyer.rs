//! Cause purchases - one-off payments that add to a cause's `fund_amount`.
//!
//! Like activity recording, the purchase row and the fund increment are two separate
//! writes; a failed increment after a stored purchase is reported as an error and the
//! purchase row stays.

use crate::{
    entities::{CauseBuyer, cause_buyer},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Records that `buyer_id` bought `cause_id` for `amount` and adds it to the cause fund.
///
/// # Errors
/// [`crate::errors::Error::Validation`] for a non-positive amount and
/// [`crate::errors::Error::NotFound`] when the cause does not exist; both are
/// checked before anything is written.
#[instrument(skip(db))]
pub async fn buy_cause(
    db: &DatabaseConnection,
    cause_id: &str,
    buyer_id: &str,
    amount: f64,
) -> Result<cause_buyer::Model> {
    super::require_positive("amount", amount)?;
    super::cause::require_cause(db, cause_id).await?;

    let now = chrono::Utc::now();
    let purchase = cause_buyer::ActiveModel {
        id: Set(super::new_id()),
        buyer_id: Set(buyer_id.to_string()),
        cause_id: Set(cause_id.to_string()),
        amount: Set(amount),
        date_bought: Set(now),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    super::cause::add_funds_atomic(db, cause_id, amount).await?;
    info!(purchase_id = %purchase.id, amount, "Cause bought");
    Ok(purchase)
}

/// Lists the purchases of a cause, most recent first.
pub async fn get_buyers_by_cause(
    db: &DatabaseConnection,
    cause_id: &str,
) -> Result<Vec<cause_buyer::Model>> {
    CauseBuyer::find()
        .filter(cause_buyer::Column::CauseId.eq(cause_id))
        .order_by_desc(cause_buyer::Column::DateBought)
        .all(db)
        .await
        .map_err(Into::into)
}
