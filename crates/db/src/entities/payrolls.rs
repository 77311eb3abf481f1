//! `SeaORM` Entity for payroll runs.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One finalized payroll for one employee in one period.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "payrolls")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub employee_id: i64,
    /// Period label in `YYYY-MM` form. Several runs may share a period
    /// (split payments).
    pub payroll_period: String,
    pub total_income: Decimal,
    pub total_deduction: Decimal,
    pub net_pay: Decimal,
    pub status: String,
    pub payment_date: Date,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::EmployeeId",
        to = "super::employees::Column::Id"
    )]
    Employees,
    #[sea_orm(has_many = "super::payroll_items::Entity")]
    PayrollItems,
    #[sea_orm(has_many = "super::kasbon_payments::Entity")]
    KasbonPayments,
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl Related<super::payroll_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PayrollItems.def()
    }
}

impl Related<super::kasbon_payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::KasbonPayments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
