// Copyright (c) 2025 Pocketledger Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

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
    Command::new("pocketledger")
        .about("Personal-finance ledger client for a remote transaction store")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(false)
        .subcommand(
            Command::new("config")
                .about("Store endpoint and session")
                .subcommand(
                    Command::new("set-url").about("Set the transaction store base URL").arg(
                        Arg::new("url").required(true).help("e.g. https://api.example.com"),
                    ),
                )
                .subcommand(
                    Command::new("login")
                        .about("Act as this user for all commands")
                        .arg(Arg::new("user").required(true).help("User id")),
                )
                .subcommand(Command::new("logout").about("Clear the session"))
                .subcommand(Command::new("show").about("Print the active configuration")),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and manage transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("desc").long("desc").required(true).help("Description"))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .required(true)
                                .help("Category name (see 'category list')"),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .help("Positive amount; sign comes from --kind"),
                        )
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .help("revenue|expense"),
                        )
                        .arg(
                            Arg::new("frequency")
                                .long("frequency")
                                .default_value("once")
                                .help("daily|weekly|biweekly|monthly|once"),
                        )
                        .arg(
                            Arg::new("start")
                                .long("start")
                                .required(true)
                                .help("Effective date, YYYY-MM-DD"),
                        )
                        .arg(
                            Arg::new("end")
                                .long("end")
                                .help("Last date a recurring transaction applies, YYYY-MM-DD"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(Arg::new("kind").long("kind").help("revenue|expense"))
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("one-off")
                                .help("Only recurring transactions"),
                        )
                        .arg(
                            Arg::new("one-off")
                                .long("one-off")
                                .action(ArgAction::SetTrue)
                                .help("Only one-off transactions"),
                        ),
                ))
                .subcommand(
                    Command::new("set")
                        .about("Change fields of a transaction")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64))
                                .help("Transaction id"),
                        )
                        .arg(Arg::new("desc").long("desc"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("frequency").long("frequency"))
                        .arg(Arg::new("start").long("start"))
                        .arg(Arg::new("end").long("end").help("YYYY-MM-DD, or 'none' to clear")),
                )
                .subcommand(
                    Command::new("rm").about("Delete a transaction").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64))
                            .help("Transaction id"),
                    ),
                ),
        )
        .subcommand(json_flags(
            Command::new("totals").about("Revenue, expense and balance totals"),
        ))
        .subcommand(
            Command::new("rollover")
                .about("Start a new month: purge one-off transactions, keep recurring ones")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .action(ArgAction::SetTrue)
                        .help("Skip the confirmation prompt"),
                ),
        )
        .subcommand(
            Command::new("category").about("Category sets").subcommand(
                Command::new("list")
                    .about("List the allowed categories for a kind")
                    .arg(Arg::new("kind").long("kind").required(true).help("revenue|expense")),
            ),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .about("Export the transaction list")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true).help("Output path")),
            ),
        )
}
