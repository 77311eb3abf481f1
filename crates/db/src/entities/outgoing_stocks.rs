//! `SeaORM` Entity for the outgoing-stock ledger.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One shipment of processed rubber sold to a buyer.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "outgoing_stocks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub product_id: i64,
    pub customer_id: Option<i64>,
    pub no_invoice: Option<String>,
    pub date: Date,
    pub qty_out: Decimal,
    pub keping_out: Option<i32>,
    pub quality_out: Option<String>,
    /// Shipping dates and received quantity, filled in as the delivery
    /// progresses.
    pub shipped_date: Option<Date>,
    pub arrived_date: Option<Date>,
    pub qty_arrived: Option<Decimal>,
    pub shipping_method: Option<String>,
    pub status: String,
    pub person_in_charge: Option<String>,
    pub selling_price: Decimal,
    pub pph_value: Option<Decimal>,
    pub ob_cost: Option<Decimal>,
    pub extra_cost: Option<Decimal>,
    /// Invoice value after tax and cost adjustments; the figure the bank
    /// ledger counts as sales income.
    pub grand_total: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
