// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use crate::models::{MemberId, Task};
use crate::store::Store;
use crate::utils::{maybe_print_json, parse_date, parse_frequency, parse_members, pretty_table};

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("complete", sub)) => complete(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let group_id = store
        .group(sub.get_one::<String>("group").map(String::as_str))?
        .id;
    let title = sub.get_one::<String>("title").unwrap().trim().to_string();
    let rotation_order = parse_members(sub.get_one::<String>("rotation").unwrap())?;
    let frequency = parse_frequency(sub.get_one::<String>("frequency").unwrap())?;
    let due_date = parse_date(sub.get_one::<String>("due").unwrap().trim())?;
    let assigned_to = match sub.get_one::<String>("assign") {
        Some(m) => MemberId::from(m.trim()),
        None => rotation_order[0].clone(),
    };
    let note = sub.get_one::<String>("note").map(|s| s.to_string());

    let id = store.add_task(Task {
        id: 0,
        group_id,
        title: title.clone(),
        note,
        assigned_to: assigned_to.clone(),
        frequency,
        completed: false,
        due_date,
        rotation_order,
    })?;
    store.save()?;
    println!(
        "Created task '{}' assigned to {} due {} (id: {})",
        title, assigned_to, due_date, id
    );
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let group = store.group(sub.get_one::<String>("group").map(String::as_str))?;

    let mut tasks = store.tasks_for(group.id);
    tasks.sort_by(|a, b| a.due_date.cmp(&b.due_date).then(a.id.cmp(&b.id)));

    let data: Vec<TaskRow> = tasks
        .iter()
        .map(|t| TaskRow {
            id: t.id,
            title: t.title.clone(),
            assigned_to: t.assigned_to.to_string(),
            frequency: t.frequency.to_string(),
            due_date: t.due_date.to_string(),
            rotation: t
                .rotation_order
                .iter()
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            note: t.note.clone().unwrap_or_default(),
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.title.clone(),
                    r.assigned_to.clone(),
                    r.frequency.clone(),
                    r.due_date.clone(),
                    r.rotation.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Title", "Assigned", "Frequency", "Due", "Rotation", "Note"],
                rows,
            )
        );
    }
    Ok(())
}

fn complete(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let task = store.complete_task(id)?;
    store.save()?;
    println!(
        "Completed '{}'; next up {} due {}",
        task.title, task.assigned_to, task.due_date
    );
    Ok(())
}

#[derive(Serialize)]
pub struct TaskRow {
    pub id: i64,
    pub title: String,
    pub assigned_to: String,
    pub frequency: String,
    pub due_date: String,
    pub rotation: String,
    pub note: String,
}
