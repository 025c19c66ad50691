// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde_json::json;

use crate::store::Store;
use crate::utils::fmt_money;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => export_expenses(store, sub),
        _ => Ok(()),
    }
}

fn export_expenses(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let group = store.group(sub.get_one::<String>("group").map(String::as_str))?;

    let mut expenses = store.expenses_for(group.id);
    expenses.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date", "title", "paid_by", "amount", "split", "category", "note",
            ])?;
            for e in &expenses {
                wtr.write_record([
                    e.date.to_string(),
                    e.title.clone(),
                    e.paid_by.to_string(),
                    fmt_money(&e.amount),
                    e.split.to_string(),
                    e.category.clone(),
                    e.note.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<serde_json::Value> = expenses
                .iter()
                .map(|e| {
                    json!({
                        "date": e.date.to_string(),
                        "title": e.title.clone(),
                        "paid_by": e.paid_by.clone(),
                        "amount": fmt_money(&e.amount),
                        "split": e.split.clone(),
                        "category": e.category.clone(),
                        "note": e.note.clone(),
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported {} expense(s) to {}", expenses.len(), out);
    Ok(())
}
