// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{Expense, MemberId, Settlement, Split};
use crate::utils::EPSILON;

/// Compute each member's net balance from the full expense history.
/// Positive means the member is owed money, negative means they owe.
///
/// Every member of the roster is seeded at zero; member ids that only appear
/// inside an expense (someone who has since left the group, a hand-edited
/// snapshot) are added on demand. Accumulation is commutative, so the result
/// does not depend on expense order.
///
/// An equal split over an empty member list is tolerated as a credit to the
/// payer with no offsetting debit. The store rejects such expenses at entry;
/// if one reaches us anyway it must not crash a balance report.
pub fn compute_balances(
    expenses: &[Expense],
    members: &[MemberId],
) -> BTreeMap<MemberId, Decimal> {
    let mut balances: BTreeMap<MemberId, Decimal> = members
        .iter()
        .cloned()
        .map(|m| (m, Decimal::ZERO))
        .collect();

    for expense in expenses {
        *balances.entry(expense.paid_by.clone()).or_insert(Decimal::ZERO) += expense.amount;

        match &expense.split {
            Split::Custom { shares } if !shares.is_empty() => {
                for (member, share) in shares {
                    *balances.entry(member.clone()).or_insert(Decimal::ZERO) -= *share;
                }
            }
            Split::Equal { between } if !between.is_empty() => {
                let share = expense.amount / Decimal::from(between.len() as u64);
                for member in between {
                    *balances.entry(member.clone()).or_insert(Decimal::ZERO) -= share;
                }
            }
            // Degenerate: the payer's credit stands alone.
            _ => {}
        }
    }

    balances
}

/// Greedy minimum-transfer matching between debtors and creditors.
///
/// Both sides are sorted descending by owed amount (stable, so ties keep the
/// map's member-id order and the output is deterministic), then walked with
/// two cursors emitting `min(debtor_remaining, creditor_remaining)` at each
/// step. Applying every returned transfer drives all balances to within the
/// 0.01 epsilon of zero, and at most `debtors + creditors - 1` transfers are
/// produced. This is not always the theoretical minimum transaction count
/// (that problem is NP-hard in general); it is the bound the greedy gives.
pub fn compute_settlements(balances: &BTreeMap<MemberId, Decimal>) -> Vec<Settlement> {
    let mut debtors: Vec<(MemberId, Decimal)> = Vec::new();
    let mut creditors: Vec<(MemberId, Decimal)> = Vec::new();
    for (member, balance) in balances {
        if *balance < -*EPSILON {
            debtors.push((member.clone(), -*balance));
        } else if *balance > *EPSILON {
            creditors.push((member.clone(), *balance));
        }
    }
    debtors.sort_by(|a, b| b.1.cmp(&a.1));
    creditors.sort_by(|a, b| b.1.cmp(&a.1));

    let mut plan = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < debtors.len() && j < creditors.len() {
        // Emit the exact amount. Rounding here loses up to 0.005 per
        // transfer, and a long plan against one creditor accumulates the
        // losses past the epsilon; display rounding belongs to the callers.
        let amount = debtors[i].1.min(creditors[j].1);
        plan.push(Settlement {
            from: debtors[i].0.clone(),
            to: creditors[j].0.clone(),
            amount,
        });
        debtors[i].1 -= amount;
        creditors[j].1 -= amount;
        if debtors[i].1 <= *EPSILON {
            i += 1;
        }
        if creditors[j].1 <= *EPSILON {
            j += 1;
        }
    }
    plan
}
