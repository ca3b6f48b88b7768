// Copyright (c) 2025 Pocketledger Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use pocketledger::{cli, commands, config};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut cfg = config::load()?;

    match matches.subcommand() {
        Some(("config", sub)) => commands::config::handle(&mut cfg, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&cfg, sub)?,
        Some(("totals", sub)) => commands::totals::handle(&cfg, sub)?,
        Some(("rollover", sub)) => commands::rollover::handle(&cfg, sub)?,
        Some(("category", sub)) => commands::categories::handle(sub)?,
        Some(("export", sub)) => commands::exporter::handle(&cfg, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
