//! Payroll repository: generate-screen rows, run storage, run removal.
//!
//! Storing a run writes the payroll header, its per-component items and
//! the kasbon repayments in one transaction per employee batch.
//! Removing a run reverses those repayments before the header goes.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use getah_core::kasbon::{KasbonStatus, OutstandingAdvance};
use getah_core::payroll::{
    DEFAULT_MEAL_DAYS, DEFAULT_MEAL_RATE, PayrollInputs, PayrollService,
};

use crate::entities::{employees, kasbon_payments, kasbons, payroll_items, payrolls};

use super::kasbon::{KasbonError, KasbonRepository};
use super::kasbon_effective_date;

/// Error types for payroll operations.
#[derive(Debug, thiserror::Error)]
pub enum PayrollError {
    /// Payroll not found.
    #[error("Payroll not found: {0}")]
    NotFound(i64),
    /// Settlement failed.
    #[error(transparent)]
    Kasbon(#[from] KasbonError),
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// One prefilled row on the payroll generate screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateRow {
    /// Employee the row belongs to.
    pub employee_id: i64,
    /// Employee display name.
    pub name: String,
    /// Monthly base salary, zero when the employee has none on file.
    pub base_salary: Decimal,
    /// Prefilled meal-allowance days.
    pub meal_days: u32,
    /// Daily meal rate, the employee's own or the house default.
    pub meal_rate: Decimal,
    /// Prefilled incentive.
    pub incentive: Decimal,
    /// Open advance debt across all the employee's kasbons.
    pub outstanding_debt: Decimal,
    /// Deduction proposal, capped at half the base salary.
    pub suggested_deduction: Decimal,
    /// Whether the row starts selected for payment.
    pub is_paid: bool,
}

/// One employee's figures in a store request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreEntry {
    /// Employee to pay.
    pub employee_id: i64,
    /// Base salary for this run.
    pub base_salary: Decimal,
    /// Incentive for this run.
    pub incentive: Decimal,
    /// Meal-allowance days for this run.
    pub meal_days: u32,
    /// Daily meal rate for this run.
    pub meal_rate: Decimal,
    /// Wage deduction to settle against open advances.
    pub kasbon_deduction: Decimal,
    /// Deselected rows are skipped entirely.
    pub is_paid: bool,
}

/// A full payroll store request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorePayrollInput {
    /// Period label in `YYYY-MM` form.
    pub payroll_period: String,
    /// Whether base salary participates in this run.
    pub include_base: bool,
    /// Whether meal allowance participates in this run.
    pub include_meal: bool,
    /// Whether kasbon deductions participate in this run.
    pub include_kasbon: bool,
    /// Per-employee figures.
    pub entries: Vec<StoreEntry>,
}

/// What a store request produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreOutcome {
    /// Payroll headers written.
    pub created: usize,
}

/// Repository for payroll runs.
#[derive(Debug, Clone)]
pub struct PayrollRepository {
    db: DatabaseConnection,
}

impl PayrollRepository {
    /// Creates a new payroll repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the generate-screen rows for all active employees.
    ///
    /// Open advances are loaded in one batch and grouped per employee,
    /// so the screen costs three queries regardless of headcount.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee or kasbon queries fail.
    pub async fn generate_rows(&self) -> Result<Vec<GenerateRow>, PayrollError> {
        let staff = employees::Entity::find()
            .filter(employees::Column::Status.eq("active"))
            .all(&self.db)
            .await?;

        let ids: Vec<i64> = staff.iter().map(|e| e.id).collect();
        let mut advances_by_employee = Self::open_advances(&self.db, &ids).await?;

        let rows = staff
            .iter()
            .map(|employee| {
                let advances = advances_by_employee
                    .remove(&employee.id)
                    .unwrap_or_default();
                Self::generate_row(employee, &advances)
            })
            .collect();
        Ok(rows)
    }

    /// Stores a payroll run: one header, its items and its settlements
    /// per selected employee, all inside a single transaction.
    ///
    /// Deselected entries and entries whose breakdown comes out empty
    /// under the run's include switches are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert or settlement fails; the
    /// transaction rolls back as a whole.
    pub async fn store_run(&self, input: StorePayrollInput) -> Result<StoreOutcome, PayrollError> {
        let txn = self.db.begin().await?;
        let payment_date = Utc::now().date_naive();
        let now = Utc::now().into();
        let mut created = 0usize;

        for entry in &input.entries {
            if !entry.is_paid {
                continue;
            }

            let breakdown = PayrollService::build_breakdown(&PayrollInputs {
                base_salary: entry.base_salary,
                incentive: entry.incentive,
                meal_days: entry.meal_days,
                meal_rate: entry.meal_rate,
                kasbon_deduction: entry.kasbon_deduction,
                include_base: input.include_base,
                include_meal: input.include_meal,
                include_kasbon: input.include_kasbon,
            });
            if breakdown.is_empty() {
                continue;
            }

            let payroll = payrolls::ActiveModel {
                employee_id: Set(entry.employee_id),
                payroll_period: Set(input.payroll_period.clone()),
                total_income: Set(breakdown.total_income),
                total_deduction: Set(breakdown.total_deduction),
                net_pay: Set(breakdown.net_pay),
                status: Set("final".to_string()),
                payment_date: Set(payment_date),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            for component in &breakdown.components {
                payroll_items::ActiveModel {
                    payroll_id: Set(payroll.id),
                    label: Set(component.label.clone()),
                    item_type: Set(component.kind.as_str().to_string()),
                    amount: Set(component.amount),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }

            if input.include_kasbon && entry.kasbon_deduction > Decimal::ZERO {
                KasbonRepository::settle(
                    &txn,
                    entry.employee_id,
                    entry.kasbon_deduction,
                    payroll.id,
                    payment_date,
                )
                .await?;
            }

            created += 1;
        }

        txn.commit().await?;
        info!(created, period = %input.payroll_period, "payroll run stored");
        Ok(StoreOutcome { created })
    }

    /// Removes a payroll run and undoes its advance repayments.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::NotFound`] when the payroll does not
    /// exist, or a database error if the deletion fails.
    pub async fn destroy_run(&self, payroll_id: i64) -> Result<(), PayrollError> {
        let txn = self.db.begin().await?;

        let payroll = payrolls::Entity::find_by_id(payroll_id)
            .one(&txn)
            .await?
            .ok_or(PayrollError::NotFound(payroll_id))?;

        let reversed = KasbonRepository::reverse(&txn, payroll_id).await?;

        payroll_items::Entity::delete_many()
            .filter(payroll_items::Column::PayrollId.eq(payroll_id))
            .exec(&txn)
            .await?;
        payroll.delete(&txn).await?;

        txn.commit().await?;
        info!(payroll_id, reversed, "payroll run removed");
        Ok(())
    }

    /// Builds one generate-screen row from an employee record and their
    /// open advances.
    fn generate_row(employee: &employees::Model, advances: &[OutstandingAdvance]) -> GenerateRow {
        let base_salary = employee.salary.unwrap_or(Decimal::ZERO);
        let outstanding_debt = PayrollService::total_outstanding(advances);
        GenerateRow {
            employee_id: employee.id,
            name: employee.name.clone(),
            base_salary,
            meal_days: DEFAULT_MEAL_DAYS,
            meal_rate: employee.meal_rate.unwrap_or(DEFAULT_MEAL_RATE),
            incentive: employee.incentive.unwrap_or(Decimal::ZERO),
            outstanding_debt,
            suggested_deduction: PayrollService::suggest_deduction(outstanding_debt, base_salary),
            is_paid: true,
        }
    }

    /// Loads every open advance for the given employees, with repayment
    /// sums folded in, grouped by employee.
    async fn open_advances(
        db: &DatabaseConnection,
        employee_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<OutstandingAdvance>>, PayrollError> {
        if employee_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let open_rows = kasbons::Entity::find()
            .filter(kasbons::Column::OwnerType.eq(kasbons::OWNER_EMPLOYEE))
            .filter(kasbons::Column::OwnerId.is_in(employee_ids.to_vec()))
            .filter(kasbons::Column::PaymentStatus.is_in([
                KasbonStatus::Unpaid.as_str(),
                KasbonStatus::Partial.as_str(),
            ]))
            .all(db)
            .await?;

        let kasbon_ids: Vec<i64> = open_rows.iter().map(|row| row.id).collect();
        let mut paid_sums: HashMap<i64, Decimal> = HashMap::new();
        if !kasbon_ids.is_empty() {
            let rows: Vec<(i64, Decimal)> = kasbon_payments::Entity::find()
                .filter(kasbon_payments::Column::KasbonId.is_in(kasbon_ids))
                .select_only()
                .column(kasbon_payments::Column::KasbonId)
                .column(kasbon_payments::Column::Amount)
                .into_tuple()
                .all(db)
                .await?;
            for (kasbon_id, amount) in rows {
                *paid_sums.entry(kasbon_id).or_insert(Decimal::ZERO) += amount;
            }
        }

        let mut grouped: HashMap<i64, Vec<OutstandingAdvance>> = HashMap::new();
        for row in open_rows {
            grouped
                .entry(row.owner_id)
                .or_default()
                .push(OutstandingAdvance {
                    kasbon_id: row.id,
                    effective_date: kasbon_effective_date(row.transaction_date, row.created_at),
                    amount: row.amount,
                    paid_sum: paid_sums.get(&row.id).copied().unwrap_or(Decimal::ZERO),
                });
        }
        Ok(grouped)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use getah_core::kasbon::OutstandingAdvance;
    use getah_core::payroll::{DEFAULT_MEAL_DAYS, DEFAULT_MEAL_RATE};

    use crate::entities::employees;

    use super::PayrollRepository;

    fn employee(salary: Option<Decimal>, incentive: Option<Decimal>) -> employees::Model {
        employees::Model {
            id: 9,
            name: "Siti".to_string(),
            position: Some("Admin".to_string()),
            salary,
            incentive,
            meal_rate: None,
            status: "active".to_string(),
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn advance(amount: Decimal, paid_sum: Decimal) -> OutstandingAdvance {
        OutstandingAdvance {
            kasbon_id: 1,
            effective_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            amount,
            paid_sum,
        }
    }

    #[test]
    fn test_generate_row_fills_defaults() {
        let row = PayrollRepository::generate_row(&employee(None, None), &[]);

        assert_eq!(row.base_salary, Decimal::ZERO);
        assert_eq!(row.meal_days, DEFAULT_MEAL_DAYS);
        assert_eq!(row.meal_rate, DEFAULT_MEAL_RATE);
        assert_eq!(row.incentive, Decimal::ZERO);
        assert_eq!(row.outstanding_debt, Decimal::ZERO);
        assert_eq!(row.suggested_deduction, Decimal::ZERO);
        assert!(row.is_paid);
    }

    #[test]
    fn test_generate_row_caps_suggestion_at_half_salary() {
        let row = PayrollRepository::generate_row(
            &employee(Some(dec!(3_000_000)), Some(dec!(100_000))),
            &[advance(dec!(2_000_000), dec!(200_000))],
        );

        assert_eq!(row.outstanding_debt, dec!(1_800_000));
        assert_eq!(row.suggested_deduction, dec!(1_500_000));
        assert_eq!(row.incentive, dec!(100_000));
    }

    #[test]
    fn test_generate_row_prefers_employee_meal_rate() {
        let mut model = employee(Some(dec!(2_500_000)), None);
        model.meal_rate = Some(dec!(25_000));

        let row = PayrollRepository::generate_row(&model, &[]);

        assert_eq!(row.meal_rate, dec!(25_000));
    }
}
