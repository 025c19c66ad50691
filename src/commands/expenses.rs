// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use crate::models::{Expense, MemberId, Split};
use crate::store::Store;
use crate::utils::{
    fmt_money, maybe_print_json, parse_date, parse_decimal, parse_members, parse_shares,
    pretty_table,
};

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let (group_id, roster) = {
        let group = store.group(sub.get_one::<String>("group").map(String::as_str))?;
        (group.id, group.members.clone())
    };
    let title = sub.get_one::<String>("title").unwrap().trim().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;
    let paid_by = MemberId::from(sub.get_one::<String>("paid-by").unwrap().trim());
    let split = if let Some(s) = sub.get_one::<String>("shares") {
        Split::Custom {
            shares: parse_shares(s)?,
        }
    } else if let Some(s) = sub.get_one::<String>("split") {
        Split::Equal {
            between: parse_members(s)?,
        }
    } else {
        Split::Equal { between: roster }
    };
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d.trim())?,
        None => chrono::Local::now().date_naive(),
    };
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let note = sub.get_one::<String>("note").map(|s| s.to_string());

    let id = store.add_expense(Expense {
        id: 0,
        group_id,
        title: title.clone(),
        amount,
        paid_by: paid_by.clone(),
        split,
        category,
        date,
        note,
    })?;
    store.save()?;
    println!(
        "Recorded '{}' {} paid by {} (id: {})",
        title,
        fmt_money(&amount),
        paid_by,
        id
    );
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let group = store.group(sub.get_one::<String>("group").map(String::as_str))?;

    let mut expenses = store.expenses_for(group.id);
    expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        expenses.truncate(*limit);
    }

    let data: Vec<ExpenseRow> = expenses
        .iter()
        .map(|e| ExpenseRow {
            id: e.id,
            date: e.date.to_string(),
            title: e.title.clone(),
            paid_by: e.paid_by.to_string(),
            amount: fmt_money(&e.amount),
            split: e.split.to_string(),
            category: e.category.clone(),
            note: e.note.clone().unwrap_or_default(),
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.title.clone(),
                    r.paid_by.clone(),
                    r.amount.clone(),
                    r.split.clone(),
                    r.category.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Title", "Paid by", "Amount", "Split", "Category", "Note"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct ExpenseRow {
    pub id: i64,
    pub date: String,
    pub title: String,
    pub paid_by: String,
    pub amount: String,
    pub split: String,
    pub category: String,
    pub note: String,
}
