// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use splitmate::balance::compute_settlements;
use splitmate::error::EngineError;
use splitmate::models::{Expense, Frequency, MemberId, Split, Task};
use splitmate::store::Store;
use splitmate::utils::{EPSILON, is_settled};

fn m(id: &str) -> MemberId {
    MemberId::from(id)
}

fn day(y: i32, mo: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, mo, d).unwrap()
}

fn setup() -> (tempfile::TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("household.json");
    let store = Store::open_or_seed(Some(path)).unwrap();
    (dir, store)
}

fn expense(group_id: i64, amount: &str, paid_by: &str, split: Split) -> Expense {
    Expense {
        id: 0,
        group_id,
        title: "test expense".to_string(),
        amount: amount.parse().unwrap(),
        paid_by: m(paid_by),
        split,
        category: "general".to_string(),
        date: day(2025, 8, 20),
        note: None,
    }
}

#[test]
fn first_open_seeds_the_demo_household() {
    let (_dir, store) = setup();
    let group = store.group(None).unwrap();
    assert_eq!(group.name, "Flat 4B");
    assert_eq!(group.members.len(), 4);

    let balances = store.balances(group);
    let total: Decimal = balances.values().copied().sum();
    assert!(total.abs() <= *EPSILON, "seed drift {}", total);
}

#[test]
fn share_mismatch_is_rejected_at_the_boundary() {
    let (_dir, mut store) = setup();
    let mut shares = BTreeMap::new();
    shares.insert(m("anna"), "40".parse().unwrap());
    shares.insert(m("ben"), "70".parse().unwrap());
    let err = store
        .add_expense(expense(1, "100", "anna", Split::Custom { shares }))
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<EngineError>(),
        Some(EngineError::ShareMismatch { .. })
    ));
}

#[test]
fn share_drift_within_epsilon_is_accepted() {
    let (_dir, mut store) = setup();
    let mut shares = BTreeMap::new();
    shares.insert(m("anna"), "33.33".parse().unwrap());
    shares.insert(m("ben"), "33.33".parse().unwrap());
    shares.insert(m("chloe"), "33.33".parse().unwrap());
    store
        .add_expense(expense(1, "100", "anna", Split::Custom { shares }))
        .unwrap();
}

#[test]
fn non_positive_shares_are_rejected_at_the_boundary() {
    // -40 + 140 sums to the amount, but the negative share would invert
    // anna's debt.
    let (_dir, mut store) = setup();
    let mut shares = BTreeMap::new();
    shares.insert(m("anna"), "-40".parse().unwrap());
    shares.insert(m("ben"), "140".parse().unwrap());
    let err = store
        .add_expense(expense(1, "100", "anna", Split::Custom { shares }))
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<EngineError>(),
        Some(EngineError::InvalidShare { .. })
    ));

    let mut shares = BTreeMap::new();
    shares.insert(m("anna"), "0".parse().unwrap());
    shares.insert(m("ben"), "100".parse().unwrap());
    let err = store
        .add_expense(expense(1, "100", "anna", Split::Custom { shares }))
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<EngineError>(),
        Some(EngineError::InvalidShare { .. })
    ));
}

#[test]
fn degenerate_split_is_rejected_at_the_boundary() {
    let (_dir, mut store) = setup();
    let err = store
        .add_expense(expense(1, "25", "anna", Split::Equal { between: vec![] }))
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<EngineError>(),
        Some(EngineError::DegenerateSplit(_))
    ));
}

#[test]
fn recording_the_plan_settles_the_household() {
    let (_dir, mut store) = setup();
    let group = store.group(None).unwrap();
    let group_id = group.id;
    let plan = compute_settlements(&store.balances(group));
    assert!(!plan.is_empty());

    let recorded = store
        .record_settlements(group_id, &plan, day(2025, 8, 21))
        .unwrap();
    assert_eq!(recorded, plan.len());

    let group = store.group(None).unwrap();
    for (member, balance) in store.balances(group) {
        assert!(is_settled(balance), "{} left with {}", member, balance);
    }
    // Recorded transfers are ordinary expenses in the history.
    assert!(
        store
            .expenses_for(group_id)
            .iter()
            .any(|e| e.category == "settlement")
    );
}

#[test]
fn empty_rotation_is_rejected_at_task_creation() {
    let (_dir, mut store) = setup();
    let err = store
        .add_task(Task {
            id: 0,
            group_id: 1,
            title: "Water the plants".to_string(),
            note: None,
            assigned_to: m("anna"),
            frequency: Frequency::Daily,
            completed: false,
            due_date: day(2025, 8, 22),
            rotation_order: vec![],
        })
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<EngineError>(),
        Some(EngineError::InvalidRotation)
    ));
}

#[test]
fn completing_a_task_rotates_and_reschedules_in_place() {
    let (_dir, mut store) = setup();
    let id = store
        .add_task(Task {
            id: 0,
            group_id: 1,
            title: "Water the plants".to_string(),
            note: None,
            assigned_to: m("ben"),
            frequency: Frequency::Weekly,
            completed: false,
            due_date: day(2025, 8, 22),
            rotation_order: vec![m("anna"), m("ben"), m("chloe")],
        })
        .unwrap();

    let next = store.complete_task(id).unwrap();
    assert_eq!(next.assigned_to, m("chloe"));
    assert_eq!(next.due_date, day(2025, 8, 29));
    assert!(!next.completed);

    // Mutated in place: same id, no extra task entity.
    let tasks = store.tasks_for(1);
    let stored = tasks.iter().find(|t| t.id == id).unwrap();
    assert_eq!(stored.assigned_to, m("chloe"));
}

#[test]
fn duplicate_member_is_rejected() {
    let (_dir, mut store) = setup();
    assert!(store.add_member(None, m("anna")).is_err());
    store.add_member(None, m("elena")).unwrap();
    assert_eq!(store.group(None).unwrap().members.len(), 5);
}

#[test]
fn snapshot_round_trip_preserves_balances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("household.json");

    let mut store = Store::open_or_seed(Some(path.clone())).unwrap();
    store
        .add_expense(expense(
            1,
            "36",
            "dmitri",
            Split::Equal {
                between: vec![m("anna"), m("ben"), m("dmitri")],
            },
        ))
        .unwrap();
    let before = store.balances(store.group(None).unwrap());
    store.save().unwrap();

    let reloaded = Store::open_or_seed(Some(path)).unwrap();
    let after = reloaded.balances(reloaded.group(None).unwrap());
    assert_eq!(before, after);
}
