//! `SeaORM` Entity for the manual financial-transaction ledger.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One manually entered income or expense row.
///
/// `trx_type` is `income`/`expense` and `source` is `cash`/`bank`; both
/// are parsed into core enums at the repository boundary.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "financial_transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub transaction_code: String,
    pub transaction_number: String,
    pub transaction_date: Date,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub trx_type: String,
    pub source: String,
    pub category: String,
    pub amount: Decimal,
    pub description: Option<String>,
    /// Debit/credit annotation carried over from the paper journal.
    pub db_cr: Option<String>,
    pub counterparty: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
