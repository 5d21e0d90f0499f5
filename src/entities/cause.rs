//! Cause entity - A sub-campaign under a challenge.
//!
//! `distance_covered` and `fund_amount` are running aggregates: they are only
//! ever bumped by atomic increments when runners record activities or buyers
//! purchase the cause.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of physical activity tracked by a cause or a runner
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    /// Walking
    #[sea_orm(string_value = "walking")]
    Walking,
    /// Running
    #[sea_orm(string_value = "running")]
    Running,
    /// Cycling
    #[sea_orm(string_value = "cycling")]
    Cycling,
}

/// Cause database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "causes")]
pub struct Model {
    /// Generated UUID
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Parent challenge
    pub challenge_id: String,
    /// User who created the cause
    pub owner_id: String,
    /// Human-readable title
    pub name: String,
    /// Activity participants perform for this cause
    pub activity: Activity,
    /// Distance goal in km
    pub distance_to_cover: f64,
    /// Sum of every runner contribution recorded against this cause
    pub distance_covered: f64,
    /// Price of one purchasable piece of the cause
    pub amount_per_piece: f64,
    /// Money collected from buyers
    pub fund_amount: f64,
    /// URL-safe identifier derived from the name
    #[sea_orm(unique)]
    pub slug: String,
    /// Creation time
    pub created_at: DateTimeUtc,
    /// Last modification time
    pub updated_at: DateTimeUtc,
}

/// Causes reference their challenge by id only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
