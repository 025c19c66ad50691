// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Days, Months, NaiveDate};

use crate::error::EngineError;
use crate::models::{Frequency, Task};

/// Advance a recurring task after completion: next member in the rotation,
/// due date pushed forward one period, completion flag cleared.
///
/// If the current assignee is no longer in the rotation order (they left the
/// group), the rotation restarts at the first member. Completion history is
/// not retained here; callers that want a log must record it before calling.
pub fn complete_task(task: &Task) -> Result<Task, EngineError> {
    if task.rotation_order.is_empty() {
        return Err(EngineError::InvalidRotation);
    }
    let next_index = match task
        .rotation_order
        .iter()
        .position(|m| *m == task.assigned_to)
    {
        Some(i) => (i + 1) % task.rotation_order.len(),
        None => 0,
    };

    let mut next = task.clone();
    next.assigned_to = task.rotation_order[next_index].clone();
    next.due_date = next_due_date(task.frequency, task.due_date);
    next.completed = false;
    Ok(next)
}

/// Monthly addition clamps to the last valid day of the target month
/// (2024-01-31 + 1 month = 2024-02-29) and rolls over year boundaries.
pub fn next_due_date(frequency: Frequency, from: NaiveDate) -> NaiveDate {
    match frequency {
        Frequency::Daily => from + Days::new(1),
        Frequency::Weekly => from + Days::new(7),
        Frequency::Monthly => from + Months::new(1),
    }
}
