// Copyright (c) 2025 Pocketledger Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::config::Config;
use crate::ledger::Ledger;
use crate::notify::SilentNotifier;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    let (store, user) = super::store_and_user(cfg)?;
    let mut ledger = Ledger::new(&store, Box::new(SilentNotifier), user);
    ledger
        .load()
        .context("Could not load transactions from the store")?;

    let totals = ledger.totals();
    if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &totals)? {
        println!(
            "{}",
            pretty_table(
                &["Revenues", "Expenses", "Balance"],
                vec![vec![
                    fmt_money(&totals.revenues),
                    fmt_money(&totals.expenses),
                    fmt_money(&totals.balance),
                ]],
            )
        );
    }
    Ok(())
}
