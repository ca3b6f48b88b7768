// Copyright (c) 2025 Pocketledger Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::config::Config;
use crate::ledger::Ledger;
use crate::notify::SilentNotifier;

pub fn handle(cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(cfg, sub),
        _ => Ok(()),
    }
}

fn export_transactions(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let (store, user) = super::store_and_user(cfg)?;
    let mut ledger = Ledger::new(&store, Box::new(SilentNotifier), user);
    ledger
        .load()
        .context("Could not load transactions from the store")?;
    let rows = super::transactions::project_rows(ledger.transactions(), None, None);

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "start",
                "end",
                "description",
                "category",
                "kind",
                "amount",
                "frequency",
                "done",
            ])?;
            for r in &rows {
                wtr.write_record([
                    r.id.to_string(),
                    r.start.clone(),
                    r.end.clone(),
                    r.description.clone(),
                    r.category.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.frequency.clone(),
                    r.done.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported {} transaction(s) to {}", rows.len(), out);
    Ok(())
}
