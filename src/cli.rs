// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn group_arg() -> Arg {
    Arg::new("group")
        .long("group")
        .value_name("NAME")
        .help("Group name (defaults to the first group)")
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("splitmate")
        .version(crate_version!())
        .about("Shared-household expenses, debt settlement, and chore rotation")
        .arg(
            Arg::new("file")
                .long("file")
                .value_name("PATH")
                .global(true)
                .help("Household snapshot file (defaults to the platform data dir)"),
        )
        .subcommand(
            Command::new("init")
                .about("Write the household snapshot, seeding demo data on first run"),
        )
        .subcommand(
            Command::new("member")
                .about("Manage group members")
                .subcommand(
                    Command::new("add")
                        .about("Add a member to a group")
                        .arg(Arg::new("name").required(true).help("Member id"))
                        .arg(group_arg()),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List group members")
                        .arg(group_arg()),
                )),
        )
        .subcommand(
            Command::new("expense")
                .about("Record and list expenses")
                .subcommand(
                    Command::new("add")
                        .about("Record an expense")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .help("Positive decimal amount"),
                        )
                        .arg(
                            Arg::new("paid-by")
                                .long("paid-by")
                                .value_name("MEMBER")
                                .required(true),
                        )
                        .arg(
                            Arg::new("split")
                                .long("split")
                                .value_name("A,B,C")
                                .conflicts_with("shares")
                                .help("Equal split between these members (defaults to the whole roster)"),
                        )
                        .arg(
                            Arg::new("shares")
                                .long("shares")
                                .value_name("A=40,B=60")
                                .help("Custom per-member amounts, must sum to the expense amount"),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .default_value("general"),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("YYYY-MM-DD")
                                .help("Defaults to today"),
                        )
                        .arg(Arg::new("note").long("note"))
                        .arg(group_arg()),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List expenses, newest first")
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(group_arg()),
                )),
        )
        .subcommand(json_flags(
            Command::new("balance")
                .about("Net balance per member, derived from the expense history")
                .arg(group_arg()),
        ))
        .subcommand(
            Command::new("settle")
                .about("Debt settlement")
                .subcommand(json_flags(
                    Command::new("plan")
                        .about("Propose transfers that zero out all balances")
                        .arg(group_arg()),
                ))
                .subcommand(
                    Command::new("record")
                        .about("Record the proposed transfers as settlement expenses")
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("YYYY-MM-DD")
                                .help("Defaults to today"),
                        )
                        .arg(group_arg()),
                ),
        )
        .subcommand(
            Command::new("task")
                .about("Recurring chores")
                .subcommand(
                    Command::new("add")
                        .about("Create a recurring task")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(
                            Arg::new("rotation")
                                .long("rotation")
                                .value_name("A,B,C")
                                .required(true)
                                .help("Assignment rotation order, fixed at creation"),
                        )
                        .arg(
                            Arg::new("frequency")
                                .long("frequency")
                                .value_name("daily|weekly|monthly")
                                .required(true),
                        )
                        .arg(
                            Arg::new("due")
                                .long("due")
                                .value_name("YYYY-MM-DD")
                                .required(true),
                        )
                        .arg(
                            Arg::new("assign")
                                .long("assign")
                                .value_name("MEMBER")
                                .help("Initial assignee (defaults to the first in the rotation)"),
                        )
                        .arg(Arg::new("note").long("note"))
                        .arg(group_arg()),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List tasks").arg(group_arg()),
                ))
                .subcommand(
                    Command::new("complete")
                        .about("Complete a task: rotate the assignee and reschedule")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export household data")
                .subcommand(
                    Command::new("expenses")
                        .about("Export expenses to a file")
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true))
                        .arg(group_arg()),
                ),
        )
}
