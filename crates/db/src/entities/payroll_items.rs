//! `SeaORM` Entity for payroll slip lines.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One line of a stored pay slip.
///
/// `item_type` is `pendapatan` (earning) or `potongan` (deduction),
/// matching [`getah_core::payroll::PayComponentKind`] string codes.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "payroll_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub payroll_id: i64,
    pub label: String,
    pub item_type: String,
    pub amount: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::payrolls::Entity",
        from = "Column::PayrollId",
        to = "super::payrolls::Column::Id"
    )]
    Payrolls,
}

impl Related<super::payrolls::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payrolls.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
