// Copyright (c) 2025 Pocketledger Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Context, Result};
use std::io::Write;

use crate::config::Config;
use crate::ledger::Ledger;
use crate::notify::TermNotifier;
use crate::utils::{fmt_money, pretty_table};

pub fn handle(cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    let (store, user) = super::store_and_user(cfg)?;
    let mut ledger = Ledger::new(&store, Box::new(TermNotifier), user);
    ledger
        .load()
        .context("Could not load transactions from the store")?;

    let preview = ledger.rollover_preview();
    if preview.is_noop() {
        println!("No one-off transactions; nothing will be removed.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = preview
        .one_off
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                t.start_date.to_string(),
                t.description.clone(),
                t.category.clone(),
                t.kind.label().to_string(),
                fmt_money(&t.amount),
            ]
        })
        .collect();
    println!("Starting a new month removes these one-off transactions:");
    println!(
        "{}",
        pretty_table(&["ID", "Start", "Description", "Category", "Kind", "Amount"], rows)
    );
    println!(
        "One-off totals: {} revenue, {} expense (balance {})",
        fmt_money(&preview.totals.revenues),
        fmt_money(&preview.totals.expenses),
        fmt_money(&preview.totals.balance),
    );

    if !m.get_flag("yes") && !confirm(preview.one_off.len())? {
        println!("Rollover cancelled; nothing was removed.");
        return Ok(());
    }

    let report = ledger.rollover_commit();
    let recurring = ledger
        .transactions()
        .iter()
        .filter(|t| t.frequency.is_recurring())
        .count();
    println!(
        "Removed {} one-off transaction(s); {} recurring transaction(s) kept.",
        report.deleted.len(),
        recurring,
    );
    if !report.failed.is_empty() {
        // Each failure was already reported on its own line by the notifier.
        bail!(
            "{} deletion(s) failed; the affected transactions are still in the ledger, re-run 'rollover' to retry",
            report.failed.len()
        );
    }
    Ok(())
}

fn confirm(count: usize) -> Result<bool> {
    print!("Remove these {} transaction(s)? [y/N] ", count);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
