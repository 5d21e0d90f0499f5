//! Sponsor pledge against a single cause.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cause pledge database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sponsor_causes")]
pub struct Model {
    /// Generated UUID
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// User making the pledge
    pub sponsor_id: String,
    /// Cause being sponsored
    pub cause_id: String,
    /// Kilometres the sponsor pays for
    pub distance: f64,
    /// Money per kilometre
    pub amount_per_km: f64,
    /// `distance * amount_per_km`, refreshed on every update
    pub total_amount: f64,
    /// Creation time
    pub created_at: DateTimeUtc,
    /// Last modification time
    pub updated_at: DateTimeUtc,
}

/// Pledges reference their cause by id only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
