// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;

use splitmate::{cli, commands, store};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let file = matches.get_one::<String>("file").map(PathBuf::from);
    let mut store = store::Store::open_or_seed(file)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            store.save()?;
            println!("Household snapshot at {}", store.path().display());
        }
        Some(("member", sub)) => commands::members::handle(&mut store, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&mut store, sub)?,
        Some(("balance", sub)) => commands::balances::handle(&store, sub)?,
        Some(("settle", sub)) => commands::settle::handle(&mut store, sub)?,
        Some(("task", sub)) => commands::tasks::handle(&mut store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
