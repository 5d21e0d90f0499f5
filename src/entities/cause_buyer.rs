//! Cause buyer entity - A one-off purchase of a cause.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase record
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cause_buyers")]
pub struct Model {
    /// Generated UUID
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// User who paid
    pub buyer_id: String,
    /// Cause that was bought
    pub cause_id: String,
    /// Amount paid
    pub amount: f64,
    /// When the purchase happened
    pub date_bought: DateTimeUtc,
    /// Creation time
    pub created_at: DateTimeUtc,
    /// Last modification time
    pub updated_at: DateTimeUtc,
}

/// Purchases reference their cause by id only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
