//! `SeaORM` Entity for employees.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A salaried employee. Incisors (per-kilogram tappers) are not
/// employees; they only appear as kasbon owners.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub position: Option<String>,
    pub salary: Option<Decimal>,
    /// Default incentive offered on the generate screen.
    pub incentive: Option<Decimal>,
    /// Daily meal allowance; the payroll default applies when absent.
    pub meal_rate: Option<Decimal>,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::payrolls::Entity")]
    Payrolls,
}

impl Related<super::payrolls::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payrolls.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
