//! `SeaORM` Entity for cash advances.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Owner type string for advances handed to employees.
pub const OWNER_EMPLOYEE: &str = "employee";
/// Owner type string for advances handed to incisors.
pub const OWNER_INCISOR: &str = "incisor";

/// One cash advance (kasbon).
///
/// `owner_type`/`owner_id` point at either an employee or an incisor.
/// `transaction_date` is optional; consumers fall back to the creation
/// date, computed once at the repository boundary.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "kasbons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub owner_type: String,
    pub owner_id: i64,
    pub amount: Decimal,
    pub transaction_date: Option<Date>,
    /// `unpaid`/`partial`/`paid`, kept consistent with the payment sum.
    pub payment_status: String,
    pub paid_at: Option<DateTimeWithTimeZone>,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::kasbon_payments::Entity")]
    KasbonPayments,
}

impl Related<super::kasbon_payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::KasbonPayments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
