//! Kasbon repository: applies settlement plans and their reversals.
//!
//! Both operations run inside the caller's payroll transaction, so a
//! payroll run and its advance bookkeeping commit or roll back as one.
//! Outstanding rows are locked `FOR UPDATE` in a fixed order, which
//! serializes concurrent settlements per employee.

use std::collections::{BTreeSet, HashMap};

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::debug;

use getah_core::kasbon::{
    KasbonStatus, OutstandingAdvance, SettlementAction, derive_status, plan_settlement,
};

use crate::entities::{kasbon_payments, kasbons};

use super::kasbon_effective_date;

/// Error types for settlement operations.
#[derive(Debug, thiserror::Error)]
pub enum KasbonError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// What a settlement run did to the books.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlementOutcome {
    /// Deduction amount turned into repayments.
    pub allocated: Decimal,
    /// Deduction amount with no debt left to absorb it.
    pub unallocated: Decimal,
    /// Repayment rows inserted.
    pub payments_created: usize,
}

/// Settlement and reversal operations over cash advances.
///
/// Stateless: every method works on the transaction it is handed.
pub struct KasbonRepository;

impl KasbonRepository {
    /// Allocates a wage deduction across the employee's outstanding
    /// advances, oldest first.
    ///
    /// Inserts one repayment row per touched advance, tagged with the
    /// payroll id that produced it, and moves statuses along
    /// unpaid/partial/paid. Advances whose repayments already cover the
    /// principal are marked paid without consuming the deduction.
    ///
    /// # Errors
    ///
    /// Returns an error if any query inside the transaction fails.
    pub async fn settle(
        txn: &DatabaseTransaction,
        employee_id: i64,
        deduction: Decimal,
        payroll_id: i64,
        payment_date: NaiveDate,
    ) -> Result<SettlementOutcome, KasbonError> {
        let open_rows = kasbons::Entity::find()
            .filter(kasbons::Column::OwnerType.eq(kasbons::OWNER_EMPLOYEE))
            .filter(kasbons::Column::OwnerId.eq(employee_id))
            .filter(kasbons::Column::PaymentStatus.is_in([
                KasbonStatus::Unpaid.as_str(),
                KasbonStatus::Partial.as_str(),
            ]))
            // Fixed lock order; the settlement plan re-sorts by effective
            // date on its own.
            .order_by_asc(kasbons::Column::TransactionDate)
            .order_by_asc(kasbons::Column::CreatedAt)
            .order_by_asc(kasbons::Column::Id)
            .lock_exclusive()
            .all(txn)
            .await?;

        let paid_sums = Self::paid_sums(txn, open_rows.iter().map(|row| row.id)).await?;

        let advances: Vec<OutstandingAdvance> = open_rows
            .iter()
            .map(|row| OutstandingAdvance {
                kasbon_id: row.id,
                effective_date: kasbon_effective_date(row.transaction_date, row.created_at),
                amount: row.amount,
                paid_sum: paid_sums.get(&row.id).copied().unwrap_or(Decimal::ZERO),
            })
            .collect();

        let plan = plan_settlement(&advances, deduction);
        debug!(
            employee_id,
            payroll_id,
            allocated = %plan.allocated,
            unallocated = %plan.unallocated,
            "settlement planned"
        );

        let by_id: HashMap<i64, &kasbons::Model> =
            open_rows.iter().map(|row| (row.id, row)).collect();
        let now = Utc::now().into();
        let mut payments_created = 0usize;

        for action in &plan.actions {
            match *action {
                SettlementAction::MarkPaid { kasbon_id } => {
                    if let Some(model) = by_id.get(&kasbon_id) {
                        let mut row: kasbons::ActiveModel = (*model).clone().into();
                        row.payment_status = Set(KasbonStatus::Paid.as_str().to_string());
                        row.paid_at = Set(Some(now));
                        row.updated_at = Set(now);
                        row.update(txn).await?;
                    }
                }
                SettlementAction::Pay {
                    kasbon_id,
                    amount,
                    new_status,
                } => {
                    let payment = kasbon_payments::ActiveModel {
                        kasbon_id: Set(kasbon_id),
                        payroll_id: Set(Some(payroll_id)),
                        amount: Set(amount),
                        payment_date: Set(payment_date),
                        notes: Set(Some(format!("Potong Gaji (Payroll ID: #{payroll_id})"))),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    };
                    payment.insert(txn).await?;
                    payments_created += 1;

                    if let Some(model) = by_id.get(&kasbon_id) {
                        let mut row: kasbons::ActiveModel = (*model).clone().into();
                        row.payment_status = Set(new_status.as_str().to_string());
                        if new_status == KasbonStatus::Paid {
                            row.paid_at = Set(Some(now));
                        }
                        row.updated_at = Set(now);
                        row.update(txn).await?;
                    }
                }
            }
        }

        Ok(SettlementOutcome {
            allocated: plan.allocated,
            unallocated: plan.unallocated,
            payments_created,
        })
    }

    /// Deletes every repayment the given payroll produced and re-derives
    /// each touched advance's status from the payments that remain.
    ///
    /// An advance still fully covered by independent repayments stays
    /// paid; otherwise it returns to partial or unpaid and loses its
    /// paid timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if any query inside the transaction fails.
    pub async fn reverse(txn: &DatabaseTransaction, payroll_id: i64) -> Result<u64, KasbonError> {
        let payments = kasbon_payments::Entity::find()
            .filter(kasbon_payments::Column::PayrollId.eq(payroll_id))
            .all(txn)
            .await?;

        // BTreeSet keeps lock acquisition in a fixed order.
        let affected: BTreeSet<i64> = payments.iter().map(|p| p.kasbon_id).collect();

        let deleted = kasbon_payments::Entity::delete_many()
            .filter(kasbon_payments::Column::PayrollId.eq(payroll_id))
            .exec(txn)
            .await?
            .rows_affected;

        for kasbon_id in affected {
            let Some(kasbon) = kasbons::Entity::find_by_id(kasbon_id)
                .lock_exclusive()
                .one(txn)
                .await?
            else {
                continue;
            };

            let remaining: Decimal = kasbon_payments::Entity::find()
                .filter(kasbon_payments::Column::KasbonId.eq(kasbon_id))
                .select_only()
                .column(kasbon_payments::Column::Amount)
                .into_tuple::<Decimal>()
                .all(txn)
                .await?
                .iter()
                .sum();

            let status = derive_status(kasbon.amount, remaining);
            let mut row: kasbons::ActiveModel = kasbon.into();
            row.payment_status = Set(status.as_str().to_string());
            if status != KasbonStatus::Paid {
                row.paid_at = Set(None);
            }
            row.updated_at = Set(Utc::now().into());
            row.update(txn).await?;
        }

        debug!(payroll_id, deleted, "settlement reversed");
        Ok(deleted)
    }

    /// Sums existing repayments per advance.
    async fn paid_sums(
        txn: &DatabaseTransaction,
        kasbon_ids: impl Iterator<Item = i64>,
    ) -> Result<HashMap<i64, Decimal>, KasbonError> {
        let ids: Vec<i64> = kasbon_ids.collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i64, Decimal)> = kasbon_payments::Entity::find()
            .filter(kasbon_payments::Column::KasbonId.is_in(ids))
            .select_only()
            .column(kasbon_payments::Column::KasbonId)
            .column(kasbon_payments::Column::Amount)
            .into_tuple()
            .all(txn)
            .await?;

        let mut sums: HashMap<i64, Decimal> = HashMap::new();
        for (kasbon_id, amount) in rows {
            *sums.entry(kasbon_id).or_insert(Decimal::ZERO) += amount;
        }
        Ok(sums)
    }
}
