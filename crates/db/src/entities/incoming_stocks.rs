//! `SeaORM` Entity for the incoming-stock ledger.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One delivery of raw rubber bought from the field.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "incoming_stocks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub product_id: i64,
    /// Supplying incisor, when the delivery came from one of our own
    /// tappers rather than an outside supplier.
    pub incisor_id: Option<i64>,
    pub date: Date,
    pub no_po: Option<String>,
    pub supplier_name: Option<String>,
    pub qty_net: Decimal,
    /// Piece count (rubber slabs).
    pub keping: Option<i32>,
    pub quality: Option<String>,
    pub price_per_kg: Option<Decimal>,
    /// Purchase value; reports treat a missing value as zero.
    pub total_amount: Option<Decimal>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
