// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

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
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .required(true)
        .help("Month as YYYY-MM")
}

fn entry_kind_arg() -> Arg {
    Arg::new("kind")
        .required(true)
        .value_parser(["subscription", "investment", "expense"])
        .help("Which finance list to change")
}

fn entry_field_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("name").long("name"))
        .arg(Arg::new("amount").long("amount").help("Free text: 450, $20, 80000-130000, unknown"))
        .arg(Arg::new("cycle").long("cycle").help("Billing cycle label, e.g. monthly, quarterly"))
        .arg(Arg::new("currency").long("currency").help("Currency symbol (subscriptions)"))
        .arg(Arg::new("category").long("category").help("Investment category"))
        .arg(Arg::new("note").long("note"))
}

pub fn build_cli() -> Command {
    Command::new("assetbook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Monthly income/expense ledger and recurring-cost tracker")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Path to the data file (overrides ASSETBOOK_DB)"),
        )
        .subcommand(Command::new("init").about("Create the data file"))
        .subcommand(
            Command::new("login")
                .about("Start a local session (no real authentication)")
                .arg(Arg::new("username").long("username").required(true))
                .arg(Arg::new("password").long("password").required(true)),
        )
        .subcommand(Command::new("logout").about("End the local session"))
        .subcommand(Command::new("whoami").about("Show the session user"))
        .subcommand(
            Command::new("config")
                .about("Display settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set-currency").arg(Arg::new("symbol").required(true)),
                ),
        )
        .subcommand(
            Command::new("month")
                .about("Monthly ledger records")
                .subcommand(
                    Command::new("new")
                        .about("Create a month, seeded from finance info or the previous month")
                        .arg(Arg::new("month").required(true))
                        .arg(Arg::new("note").long("note"))
                        .arg(
                            Arg::new("source")
                                .long("source")
                                .default_value("auto")
                                .value_parser(["auto", "previous", "finance", "empty"]),
                        ),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Change a month's identifier or note")
                        .arg(Arg::new("month").required(true))
                        .arg(Arg::new("to").long("to").help("New YYYY-MM"))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(Command::new("rm").arg(Arg::new("month").required(true)))
                .subcommand(json_flags(Command::new("list")))
                .subcommand(json_flags(
                    Command::new("show").arg(Arg::new("month").required(true)),
                )),
        )
        .subcommand(
            Command::new("item")
                .about("Line items within a month")
                .subcommand(
                    Command::new("add")
                        .arg(month_arg())
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_negative_numbers(true),
                        )
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("category").long("category").required(true)),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(month_arg())
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("name").long("name"))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .allow_negative_numbers(true),
                        )
                        .arg(Arg::new("category").long("category")),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(month_arg())
                        .arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("finance")
                .about("Current recurring costs and income")
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set-income").arg(
                        Arg::new("amount")
                            .required(true)
                            .allow_negative_numbers(true),
                    ),
                )
                .subcommand(entry_field_args(
                    Command::new("add").arg(entry_kind_arg()),
                ))
                .subcommand(entry_field_args(
                    Command::new("edit")
                        .arg(entry_kind_arg())
                        .arg(Arg::new("id").long("id").required(true)),
                ))
                .subcommand(
                    Command::new("rm")
                        .arg(entry_kind_arg())
                        .arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Summaries of the ledger")
                .subcommand(json_flags(Command::new("summary").arg(month_arg())))
                .subcommand(json_flags(Command::new("breakdown").arg(month_arg())))
                .subcommand(json_flags(
                    Command::new("trend").arg(
                        Arg::new("months")
                            .long("months")
                            .value_parser(value_parser!(usize))
                            .default_value("3"),
                    ),
                )),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("months")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for inconsistencies"))
}
