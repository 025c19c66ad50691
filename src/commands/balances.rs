// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use crate::store::Store;
use crate::utils::{fmt_money, is_settled, maybe_print_json, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let group = store.group(m.get_one::<String>("group").map(String::as_str))?;
    let balances = store.balances(group);

    let data: Vec<BalanceRow> = balances
        .iter()
        .map(|(member, balance)| BalanceRow {
            member: member.to_string(),
            balance: fmt_money(balance),
            status: if is_settled(*balance) {
                "settled".to_string()
            } else if balance.is_sign_positive() {
                "is owed".to_string()
            } else {
                "owes".to_string()
            },
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| vec![r.member.clone(), r.balance.clone(), r.status.clone()])
            .collect();
        println!("{}", pretty_table(&["Member", "Balance", "Status"], rows));
    }
    Ok(())
}

#[derive(Serialize)]
pub struct BalanceRow {
    pub member: String,
    pub balance: String,
    pub status: String,
}
