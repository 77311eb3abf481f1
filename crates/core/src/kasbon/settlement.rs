//! FIFO settlement planning.

use rust_decimal::Decimal;

use super::types::{KasbonStatus, OutstandingAdvance, SettlementAction, SettlementPlan};

/// Derives an advance's status from its principal and repayment sum.
///
/// Used both when applying payments and when reversing them, so an
/// advance can land back on `paid` after a reversal when independent
/// payments still cover the whole debt.
#[must_use]
pub fn derive_status(amount: Decimal, paid_sum: Decimal) -> KasbonStatus {
    if paid_sum >= amount {
        KasbonStatus::Paid
    } else if paid_sum <= Decimal::ZERO {
        KasbonStatus::Unpaid
    } else {
        KasbonStatus::Partial
    }
}

/// Plans the allocation of `deduction` across outstanding advances.
///
/// Advances are settled oldest first by effective date, with the id as
/// the tie break, so the plan is deterministic whatever order the rows
/// arrive in. An advance whose repayments already cover its principal
/// yields a [`SettlementAction::MarkPaid`] without consuming any of the
/// deduction. Planning stops once the deduction is exhausted; leftover
/// deduction is reported as unallocated, never forced onto the books.
#[must_use]
pub fn plan_settlement(advances: &[OutstandingAdvance], deduction: Decimal) -> SettlementPlan {
    let mut ordered: Vec<&OutstandingAdvance> = advances.iter().collect();
    ordered.sort_by_key(|adv| (adv.effective_date, adv.kasbon_id));

    let mut remaining = deduction;
    let mut allocated = Decimal::ZERO;
    let mut actions = Vec::new();

    for adv in ordered {
        if remaining <= Decimal::ZERO {
            break;
        }

        let outstanding = adv.outstanding();
        if outstanding <= Decimal::ZERO {
            actions.push(SettlementAction::MarkPaid {
                kasbon_id: adv.kasbon_id,
            });
            continue;
        }

        let pay = remaining.min(outstanding);
        actions.push(SettlementAction::Pay {
            kasbon_id: adv.kasbon_id,
            amount: pay,
            new_status: derive_status(adv.amount, adv.paid_sum + pay),
        });
        remaining -= pay;
        allocated += pay;
    }

    SettlementPlan {
        actions,
        allocated,
        unallocated: deduction - allocated,
    }
}
