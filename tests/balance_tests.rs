// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use splitmate::balance::compute_balances;
use splitmate::models::{Expense, MemberId, Split};
use splitmate::utils::EPSILON;

fn m(id: &str) -> MemberId {
    MemberId::from(id)
}

fn equal(id: i64, amount: &str, paid_by: &str, between: &[&str]) -> Expense {
    Expense {
        id,
        group_id: 1,
        title: format!("expense {}", id),
        amount: amount.parse().unwrap(),
        paid_by: m(paid_by),
        split: Split::Equal {
            between: between.iter().map(|s| m(s)).collect(),
        },
        category: "general".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
        note: None,
    }
}

fn custom(id: i64, amount: &str, paid_by: &str, shares: &[(&str, &str)]) -> Expense {
    let shares: BTreeMap<MemberId, Decimal> = shares
        .iter()
        .map(|(member, v)| (m(member), v.parse().unwrap()))
        .collect();
    Expense {
        split: Split::Custom { shares },
        ..equal(id, amount, paid_by, &[])
    }
}

#[test]
fn equal_split_credits_payer_and_debits_shares() {
    let expenses = vec![equal(1, "90", "a", &["a", "b", "c"])];
    let balances = compute_balances(&expenses, &[m("a"), m("b"), m("c")]);
    assert_eq!(balances[&m("a")], Decimal::from(60));
    assert_eq!(balances[&m("b")], Decimal::from(-30));
    assert_eq!(balances[&m("c")], Decimal::from(-30));
}

#[test]
fn custom_split_overrides_equal_division() {
    let expenses = vec![custom(1, "100", "a", &[("a", "40"), ("b", "60")])];
    let balances = compute_balances(&expenses, &[m("a"), m("b")]);
    assert_eq!(balances[&m("a")], Decimal::from(60));
    assert_eq!(balances[&m("b")], Decimal::from(-60));
}

#[test]
fn roster_members_are_seeded_at_zero() {
    let balances = compute_balances(&[], &[m("a"), m("b")]);
    assert_eq!(balances.len(), 2);
    assert_eq!(balances[&m("a")], Decimal::ZERO);
    assert_eq!(balances[&m("b")], Decimal::ZERO);
}

#[test]
fn off_roster_members_are_tracked_on_demand() {
    // "zoe" pays but is not on the roster; "a" only appears in the split.
    let expenses = vec![equal(1, "30", "zoe", &["a", "zoe"])];
    let balances = compute_balances(&expenses, &[m("a")]);
    assert_eq!(balances[&m("zoe")], Decimal::from(15));
    assert_eq!(balances[&m("a")], Decimal::from(-15));
}

#[test]
fn degenerate_split_is_a_pure_credit() {
    // No split members at all: the payer's credit has no offsetting debit.
    let expenses = vec![equal(1, "25", "a", &[])];
    let balances = compute_balances(&expenses, &[m("a"), m("b")]);
    assert_eq!(balances[&m("a")], Decimal::from(25));
    assert_eq!(balances[&m("b")], Decimal::ZERO);
}

#[test]
fn result_does_not_depend_on_expense_order() {
    let mut expenses = vec![
        equal(1, "90", "a", &["a", "b", "c"]),
        custom(2, "100", "b", &[("a", "40"), ("c", "60")]),
        equal(3, "33.30", "c", &["a", "b", "c"]),
    ];
    let forward = compute_balances(&expenses, &[m("a"), m("b"), m("c")]);
    expenses.reverse();
    let backward = compute_balances(&expenses, &[m("a"), m("b"), m("c")]);
    assert_eq!(forward, backward);
}

#[test]
fn balances_always_sum_to_zero_within_epsilon() {
    // 100 over three members leaves a repeating share; conservation must
    // still hold within the 0.01 tolerance.
    let expenses = vec![
        equal(1, "100", "a", &["a", "b", "c"]),
        equal(2, "59.99", "b", &["b", "c"]),
        custom(3, "45.50", "c", &[("a", "20.25"), ("b", "25.25")]),
    ];
    let balances = compute_balances(&expenses, &[m("a"), m("b"), m("c")]);
    let total: Decimal = balances.values().copied().sum();
    assert!(total.abs() <= *EPSILON, "total drift {}", total);
}
