//! Cause runner entity - One participant's recorded activity against a cause.
//!
//! An empty `duration` means the activity has not been finished or recorded yet;
//! such rows never show up on a leaderboard.

use super::cause::Activity;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cause runner database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cause_runners")]
pub struct Model {
    /// Generated UUID
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Cause this activity counts towards
    pub cause_id: String,
    /// Participant who recorded it
    pub owner_id: String,
    /// Activity performed
    pub activity: Activity,
    /// Distance the participant set out to cover, in km
    pub distance_to_cover: f64,
    /// Distance actually covered, in km
    pub distance_covered: f64,
    /// Elapsed time as entered by the participant (e.g. `"00:42:10"`)
    pub duration: String,
    /// Money raised by this activity
    pub money_raised: f64,
    /// Creation time
    pub created_at: DateTimeUtc,
    /// Last modification time
    pub updated_at: DateTimeUtc,
}

/// Runners reference their cause by id only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
