//! Challenge entity - The top-level fundraising campaign owned by a user.
//!
//! A challenge sets an overall distance goal and money target. Causes hang off it
//! by `challenge_id`, and sponsors pledge against it per kilometre.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether joining a challenge costs money
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum ChallengeMode {
    /// Anyone can take part
    #[sea_orm(string_value = "free")]
    Free,
    /// Participation is bought
    #[sea_orm(string_value = "paid")]
    Paid,
}

/// Challenge database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "challenges")]
pub struct Model {
    /// Generated UUID
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// User who created the challenge
    pub owner_id: String,
    /// Human-readable title
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Free or paid participation
    pub mode: ChallengeMode,
    /// Total distance in km the challenge aims for
    pub distance_to_cover: f64,
    /// Money target for the whole challenge
    pub target_amount: f64,
    /// Money target expressed per kilometre
    pub target_amount_per_km: f64,
    /// How many leaderboard entries count as winners
    pub no_of_winner: i32,
    /// URL-safe identifier derived from the name
    #[sea_orm(unique)]
    pub slug: String,
    /// Creation time
    pub created_at: DateTimeUtc,
    /// Last modification time
    pub updated_at: DateTimeUtc,
}

/// Challenges are linked to causes and pledges by id only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
