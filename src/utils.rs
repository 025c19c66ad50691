// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;

use crate::models::MemberId;

/// Zero-comparison tolerance: 0.01 currency units, used uniformly for
/// settled checks, debtor/creditor partitioning, and share validation.
pub static EPSILON: Lazy<Decimal> = Lazy::new(|| Decimal::new(1, 2));

pub fn is_settled(balance: Decimal) -> bool {
    balance.abs() <= *EPSILON
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn parse_frequency(s: &str) -> Result<crate::models::Frequency> {
    use crate::models::Frequency;
    match s.trim().to_lowercase().as_str() {
        "daily" => Ok(Frequency::Daily),
        "weekly" => Ok(Frequency::Weekly),
        "monthly" => Ok(Frequency::Monthly),
        other => bail!("Invalid frequency '{}', expected daily|weekly|monthly", other),
    }
}

/// Parse a comma-separated member list, e.g. "anna,ben,chloe".
pub fn parse_members(s: &str) -> Result<Vec<MemberId>> {
    let members: Vec<MemberId> = s
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(MemberId::from)
        .collect();
    if members.is_empty() {
        bail!("No members in '{}', expected e.g. 'anna,ben'", s);
    }
    Ok(members)
}

/// Parse a custom share map, e.g. "anna=40,ben=60".
pub fn parse_shares(s: &str) -> Result<BTreeMap<MemberId, Decimal>> {
    let mut shares = BTreeMap::new();
    for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (member, amount) = pair
            .split_once('=')
            .with_context(|| format!("Invalid share '{}', expected member=amount", pair))?;
        let member = MemberId::from(member.trim());
        let amount = parse_decimal(amount.trim())?;
        if shares.insert(member.clone(), amount).is_some() {
            bail!("Member '{}' listed twice in shares", member);
        }
    }
    if shares.is_empty() {
        bail!("No shares in '{}', expected e.g. 'anna=40,ben=60'", s);
    }
    Ok(shares)
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
