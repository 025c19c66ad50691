// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque household member identifier. Membership is open-ended and managed
/// by the group roster; any string is a valid id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        MemberId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        MemberId(s.to_string())
    }
}

/// How an expense is divided. A custom share map overrides equal division;
/// the two cases are distinct variants so an expense cannot carry both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Split {
    Equal { between: Vec<MemberId> },
    Custom { shares: BTreeMap<MemberId, Decimal> },
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Split::Equal { between } => {
                let names: Vec<&str> = between.iter().map(|m| m.as_str()).collect();
                write!(f, "equal: {}", names.join(", "))
            }
            Split::Custom { shares } => {
                let parts: Vec<String> = shares
                    .iter()
                    .map(|(m, v)| format!("{}={:.2}", m, v))
                    .collect();
                write!(f, "custom: {}", parts.join(", "))
            }
        }
    }
}

/// Immutable once recorded. Balances are always recomputed from the full
/// expense history, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub group_id: i64,
    pub title: String,
    pub amount: Decimal,
    pub paid_by: MemberId,
    pub split: Split,
    pub category: String,
    pub date: NaiveDate,
    pub note: Option<String>,
}

/// A proposed transfer: `from` pays `to` the given amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => f.write_str("daily"),
            Frequency::Weekly => f.write_str("weekly"),
            Frequency::Monthly => f.write_str("monthly"),
        }
    }
}

/// A recurring chore. Completion rotates `assigned_to` through
/// `rotation_order` and pushes `due_date` forward by one period; the task is
/// mutated in place, no per-cycle entity is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub group_id: i64,
    pub title: String,
    pub note: Option<String>,
    pub assigned_to: MemberId,
    pub frequency: Frequency,
    pub completed: bool,
    pub due_date: NaiveDate,
    pub rotation_order: Vec<MemberId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub members: Vec<MemberId>,
}

/// Snapshot root for a household: the whole client-side state the commands
/// operate on. `next_id` is the monotonic id counter for expenses and tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Household {
    pub groups: Vec<Group>,
    pub expenses: Vec<Expense>,
    pub tasks: Vec<Task>,
    pub next_id: i64,
}
