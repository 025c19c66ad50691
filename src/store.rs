// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;

use crate::balance;
use crate::error::EngineError;
use crate::models::{
    Expense, Frequency, Group, Household, MemberId, Settlement, Split, Task,
};
use crate::rotation;
use crate::utils::EPSILON;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Splitmate", "splitmate"));

pub fn default_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("household.json"))
}

/// Owner of the household snapshot. The engines stay pure; every mutation and
/// every boundary validation lives here, and balances are recomputed from the
/// full expense history on each read.
pub struct Store {
    path: PathBuf,
    pub household: Household,
}

impl Store {
    /// Load the snapshot at `path` (or the platform default), seeding a demo
    /// household on first use.
    pub fn open_or_seed(path: Option<PathBuf>) -> Result<Store> {
        let path = match path {
            Some(p) => p,
            None => default_path()?,
        };
        let household = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Read snapshot at {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Parse snapshot at {}", path.display()))?
        } else {
            seed_demo()
        };
        Ok(Store { path, household })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Create snapshot dir {}", dir.display()))?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.household)?)
            .with_context(|| format!("Write snapshot at {}", self.path.display()))?;
        Ok(())
    }

    /// Resolve a group by name, or the first group when none is given.
    pub fn group(&self, name: Option<&str>) -> Result<&Group> {
        match name {
            Some(n) => self
                .household
                .groups
                .iter()
                .find(|g| g.name == n)
                .with_context(|| format!("Group '{}' not found", n)),
            None => self
                .household
                .groups
                .first()
                .context("No groups in the household snapshot"),
        }
    }

    pub fn add_member(&mut self, group_name: Option<&str>, member: MemberId) -> Result<()> {
        let name = self.group(group_name)?.name.clone();
        let group = self
            .household
            .groups
            .iter_mut()
            .find(|g| g.name == name)
            .with_context(|| format!("Group '{}' not found", name))?;
        if group.members.contains(&member) {
            bail!("Member '{}' is already in '{}'", member, group.name);
        }
        group.members.push(member);
        Ok(())
    }

    /// Record an expense. `expense.id` is assigned here; the record is
    /// immutable afterwards. Off-roster member ids inside the split are
    /// accepted (membership is open), but the split itself and the amount are
    /// validated at this boundary.
    pub fn add_expense(&mut self, mut expense: Expense) -> Result<i64> {
        if !self.household.groups.iter().any(|g| g.id == expense.group_id) {
            bail!("Group {} not found", expense.group_id);
        }
        if expense.amount <= Decimal::ZERO {
            bail!("Expense amount must be positive, got {}", expense.amount);
        }
        validate_split(&expense.title, expense.amount, &expense.split)?;
        expense.id = self.next_id();
        let id = expense.id;
        self.household.expenses.push(expense);
        Ok(id)
    }

    /// Create a recurring task. An empty rotation order is rejected here so
    /// completion never sees one.
    pub fn add_task(&mut self, mut task: Task) -> Result<i64> {
        if !self.household.groups.iter().any(|g| g.id == task.group_id) {
            bail!("Group {} not found", task.group_id);
        }
        if task.rotation_order.is_empty() {
            return Err(EngineError::InvalidRotation.into());
        }
        task.id = self.next_id();
        let id = task.id;
        self.household.tasks.push(task);
        Ok(id)
    }

    /// Complete a task instance: rotate the assignee and reschedule in place.
    pub fn complete_task(&mut self, id: i64) -> Result<Task> {
        let task = self
            .household
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .with_context(|| format!("Task {} not found", id))?;
        let next = rotation::complete_task(task)?;
        *task = next.clone();
        Ok(next)
    }

    /// Append one synthetic expense per transfer so that recorded settlements
    /// flow through the same history balances are derived from: the debtor
    /// pays, the creditor carries the whole share.
    pub fn record_settlements(
        &mut self,
        group_id: i64,
        plan: &[Settlement],
        date: NaiveDate,
    ) -> Result<usize> {
        for settlement in plan {
            let mut shares = BTreeMap::new();
            shares.insert(settlement.to.clone(), settlement.amount);
            self.add_expense(Expense {
                id: 0,
                group_id,
                title: format!("Settlement: {} -> {}", settlement.from, settlement.to),
                amount: settlement.amount,
                paid_by: settlement.from.clone(),
                split: Split::Custom { shares },
                category: "settlement".to_string(),
                date,
                note: None,
            })?;
        }
        Ok(plan.len())
    }

    pub fn balances(&self, group: &Group) -> BTreeMap<MemberId, Decimal> {
        let expenses: Vec<Expense> = self
            .household
            .expenses
            .iter()
            .filter(|e| e.group_id == group.id)
            .cloned()
            .collect();
        balance::compute_balances(&expenses, &group.members)
    }

    pub fn expenses_for(&self, group_id: i64) -> Vec<&Expense> {
        self.household
            .expenses
            .iter()
            .filter(|e| e.group_id == group_id)
            .collect()
    }

    pub fn tasks_for(&self, group_id: i64) -> Vec<&Task> {
        self.household
            .tasks
            .iter()
            .filter(|t| t.group_id == group_id)
            .collect()
    }

    fn next_id(&mut self) -> i64 {
        let id = self.household.next_id;
        self.household.next_id += 1;
        id
    }
}

/// Boundary validation for splits. The engine itself tolerates anything it is
/// handed; hand-built callers go through here before an expense is recorded.
pub fn validate_split(title: &str, amount: Decimal, split: &Split) -> Result<(), EngineError> {
    match split {
        Split::Equal { between } if between.is_empty() => {
            Err(EngineError::DegenerateSplit(title.to_string()))
        }
        Split::Custom { shares } if shares.is_empty() => {
            Err(EngineError::DegenerateSplit(title.to_string()))
        }
        Split::Custom { shares } => {
            if let Some((member, share)) = shares.iter().find(|(_, v)| **v <= Decimal::ZERO) {
                return Err(EngineError::InvalidShare {
                    member: member.to_string(),
                    share: *share,
                });
            }
            let sum: Decimal = shares.values().copied().sum();
            if (sum - amount).abs() > *EPSILON {
                Err(EngineError::ShareMismatch {
                    want: amount,
                    got: sum,
                })
            } else {
                Ok(())
            }
        }
        Split::Equal { .. } => Ok(()),
    }
}

/// Demo household seeded on first run, standing in for the mock data the
/// original client shipped with.
fn seed_demo() -> Household {
    let anna = MemberId::from("anna");
    let ben = MemberId::from("ben");
    let chloe = MemberId::from("chloe");
    let dmitri = MemberId::from("dmitri");
    let all = vec![anna.clone(), ben.clone(), chloe.clone(), dmitri.clone()];

    let day = |y: i32, m: u32, d: u32| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();

    let mut shares = BTreeMap::new();
    shares.insert(anna.clone(), Decimal::new(1000, 2));
    shares.insert(chloe.clone(), Decimal::new(990, 2));

    Household {
        groups: vec![Group {
            id: 1,
            name: "Flat 4B".to_string(),
            members: all.clone(),
        }],
        expenses: vec![
            Expense {
                id: 2,
                group_id: 1,
                title: "Groceries".to_string(),
                amount: Decimal::new(8460, 2),
                paid_by: anna.clone(),
                split: Split::Equal {
                    between: all.clone(),
                },
                category: "groceries".to_string(),
                date: day(2025, 8, 2),
                note: None,
            },
            Expense {
                id: 3,
                group_id: 1,
                title: "Internet".to_string(),
                amount: Decimal::new(4500, 2),
                paid_by: ben.clone(),
                split: Split::Equal {
                    between: all.clone(),
                },
                category: "utilities".to_string(),
                date: day(2025, 8, 5),
                note: Some("monthly plan".to_string()),
            },
            Expense {
                id: 4,
                group_id: 1,
                title: "Cleaning supplies".to_string(),
                amount: Decimal::new(1990, 2),
                paid_by: chloe.clone(),
                split: Split::Custom { shares },
                category: "household".to_string(),
                date: day(2025, 8, 9),
                note: None,
            },
        ],
        tasks: vec![
            Task {
                id: 5,
                group_id: 1,
                title: "Take out the trash".to_string(),
                note: None,
                assigned_to: anna.clone(),
                frequency: Frequency::Weekly,
                completed: false,
                due_date: day(2025, 8, 11),
                rotation_order: all.clone(),
            },
            Task {
                id: 6,
                group_id: 1,
                title: "Clean the bathroom".to_string(),
                note: Some("including the mirror".to_string()),
                assigned_to: dmitri,
                frequency: Frequency::Weekly,
                completed: false,
                due_date: day(2025, 8, 14),
                rotation_order: all,
            },
        ],
        next_id: 7,
    }
}
