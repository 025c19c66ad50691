// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use crate::models::MemberId;
use crate::store::Store;
use crate::utils::{fmt_money, is_settled, maybe_print_json, pretty_table};

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let group_name = sub.get_one::<String>("group").map(String::as_str);
    store.add_member(group_name, MemberId::new(name.clone()))?;
    store.save()?;
    println!("Added member '{}'", name);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let group = store.group(sub.get_one::<String>("group").map(String::as_str))?;
    let balances = store.balances(group);

    let data: Vec<MemberRow> = group
        .members
        .iter()
        .map(|m| {
            let balance = balances.get(m).copied().unwrap_or_default();
            MemberRow {
                member: m.to_string(),
                balance: fmt_money(&balance),
                settled: is_settled(balance),
            }
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.member.clone(),
                    r.balance.clone(),
                    if r.settled { "yes".into() } else { "no".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Member", "Balance", "Settled"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct MemberRow {
    pub member: String,
    pub balance: String,
    pub settled: bool,
}
