//! `SeaORM` Entity for advance repayments.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One repayment against a cash advance.
///
/// `payroll_id` links the payment to the payroll run that produced it,
/// so deleting a run can remove exactly its own payments by key. Manual
/// repayments leave it null.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "kasbon_payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub kasbon_id: i64,
    pub payroll_id: Option<i64>,
    pub amount: Decimal,
    pub payment_date: Date,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::kasbons::Entity",
        from = "Column::KasbonId",
        to = "super::kasbons::Column::Id"
    )]
    Kasbons,
    #[sea_orm(
        belongs_to = "super::payrolls::Entity",
        from = "Column::PayrollId",
        to = "super::payrolls::Column::Id"
    )]
    Payrolls,
}

impl Related<super::kasbons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Kasbons.def()
    }
}

impl Related<super::payrolls::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payrolls.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
