// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use crate::balance::compute_settlements;
use crate::models::Settlement;
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table};

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("plan", sub)) => plan(store, sub)?,
        Some(("record", sub)) => record(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn plan_for(store: &Store, group_name: Option<&str>) -> Result<(i64, Vec<Settlement>)> {
    let group = store.group(group_name)?;
    let balances = store.balances(group);
    Ok((group.id, compute_settlements(&balances)))
}

fn plan(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (_, plan) = plan_for(store, sub.get_one::<String>("group").map(String::as_str))?;

    if plan.is_empty() {
        println!("All settled up.");
        return Ok(());
    }
    let data: Vec<SettlementRow> = plan
        .iter()
        .map(|s| SettlementRow {
            from: s.from.to_string(),
            to: s.to.to_string(),
            amount: fmt_money(&s.amount),
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| vec![r.from.clone(), r.to.clone(), r.amount.clone()])
            .collect();
        println!("{}", pretty_table(&["From", "To", "Amount"], rows));
    }
    Ok(())
}

fn record(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let (group_id, plan) = plan_for(store, sub.get_one::<String>("group").map(String::as_str))?;
    if plan.is_empty() {
        println!("All settled up, nothing to record.");
        return Ok(());
    }
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d.trim())?,
        None => chrono::Local::now().date_naive(),
    };
    let recorded = store.record_settlements(group_id, &plan, date)?;
    store.save()?;
    for s in &plan {
        println!("{} pays {} {}", s.from, s.to, fmt_money(&s.amount));
    }
    println!("Recorded {} settlement expense(s)", recorded);
    Ok(())
}

#[derive(Serialize)]
pub struct SettlementRow {
    pub from: String,
    pub to: String,
    pub amount: String,
}
