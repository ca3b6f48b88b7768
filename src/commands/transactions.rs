// Copyright (c) 2025 Pocketledger Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::categories;
use crate::config::Config;
use crate::ledger::Ledger;
use crate::models::{Frequency, Transaction, TransactionDraft, TransactionKind, TransactionPatch};
use crate::notify::{SilentNotifier, TermNotifier};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    let (store, user) = super::store_and_user(cfg)?;
    match m.subcommand() {
        Some(("add", sub)) => {
            let mut ledger = Ledger::new(&store, Box::new(TermNotifier), user);
            add(&mut ledger, sub)
        }
        Some(("list", sub)) => {
            let mut ledger = Ledger::new(&store, Box::new(SilentNotifier), user);
            ledger
                .load()
                .context("Could not load transactions from the store")?;
            list(&ledger, sub)
        }
        Some(("set", sub)) => {
            let mut ledger = Ledger::new(&store, Box::new(TermNotifier), user);
            ledger
                .load()
                .context("Could not load transactions from the store")?;
            set(&mut ledger, sub)
        }
        Some(("rm", sub)) => {
            let mut ledger = Ledger::new(&store, Box::new(TermNotifier), user);
            ledger
                .load()
                .context("Could not load transactions from the store")?;
            rm(&mut ledger, sub)
        }
        _ => Ok(()),
    }
}

fn add(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let kind: TransactionKind = sub
        .get_one::<String>("kind")
        .unwrap()
        .parse()
        .map_err(anyhow::Error::msg)?;
    let frequency: Frequency = sub
        .get_one::<String>("frequency")
        .unwrap()
        .parse()
        .map_err(anyhow::Error::msg)?;
    let category = sub.get_one::<String>("category").unwrap().to_string();
    if !categories::is_known(kind, &category) {
        println!(
            "Note: '{}' is not a listed {} category (see 'category list')",
            category,
            kind.label()
        );
    }
    let draft = TransactionDraft {
        description: sub.get_one::<String>("desc").unwrap().to_string(),
        category,
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        kind,
        frequency,
        start_date: parse_date(sub.get_one::<String>("start").unwrap())?,
        end_date: sub
            .get_one::<String>("end")
            .map(|s| parse_date(s))
            .transpose()?,
    };
    match ledger.create(draft)? {
        Some(tx) => {
            println!(
                "Recorded {} '{}' ({}, {}) with id {}",
                tx.kind.label(),
                tx.description,
                fmt_money(&tx.amount),
                tx.frequency.label(),
                tx.id
            );
            Ok(())
        }
        None => bail!("transaction was not saved"),
    }
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub start: String,
    pub end: String,
    pub description: String,
    pub category: String,
    pub kind: String,
    pub amount: String,
    pub frequency: String,
    pub done: bool,
}

/// Display/export projection of the in-memory collection, with the list
/// command's filters applied.
pub fn project_rows(
    transactions: &[Transaction],
    kind: Option<TransactionKind>,
    recurring: Option<bool>,
) -> Vec<TransactionRow> {
    transactions
        .iter()
        .filter(|t| kind.is_none_or(|k| t.kind == k))
        .filter(|t| recurring.is_none_or(|r| t.frequency.is_recurring() == r))
        .map(|t| TransactionRow {
            id: t.id,
            start: t.start_date.to_string(),
            end: t.end_date.map(|d| d.to_string()).unwrap_or_default(),
            description: t.description.clone(),
            category: t.category.clone(),
            kind: t.kind.label().to_string(),
            amount: fmt_money(&t.amount),
            frequency: t.frequency.label().to_string(),
            done: t.is_done,
        })
        .collect()
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let kind = sub
        .get_one::<String>("kind")
        .map(|s| s.parse::<TransactionKind>())
        .transpose()
        .map_err(anyhow::Error::msg)?;
    let recurring = if sub.get_flag("recurring") {
        Some(true)
    } else if sub.get_flag("one-off") {
        Some(false)
    } else {
        None
    };
    let data = project_rows(ledger.transactions(), kind, recurring);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.start.clone(),
                    r.description.clone(),
                    r.category.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.frequency.clone(),
                    if r.done { "yes".into() } else { "no".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Start", "Description", "Category", "Kind", "Amount", "Frequency", "Done"],
                rows,
            )
        );
    }
    Ok(())
}

fn set(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut patch = TransactionPatch::default();
    if let Some(v) = sub.get_one::<String>("desc") {
        patch.description = Some(v.to_string());
    }
    if let Some(v) = sub.get_one::<String>("category") {
        patch.category = Some(v.to_string());
    }
    if let Some(v) = sub.get_one::<String>("amount") {
        patch.amount = Some(parse_decimal(v)?);
    }
    if let Some(v) = sub.get_one::<String>("frequency") {
        patch.frequency = Some(v.parse().map_err(anyhow::Error::msg)?);
    }
    if let Some(v) = sub.get_one::<String>("start") {
        patch.start_date = Some(parse_date(v)?);
    }
    if let Some(v) = sub.get_one::<String>("end") {
        patch.end_date = Some(if v == "none" { None } else { Some(parse_date(v)?) });
    }
    if patch.is_empty() {
        println!("Nothing to change for transaction {}", id);
        return Ok(());
    }
    if !ledger.update(id, patch) {
        bail!("transaction was not updated");
    }
    Ok(())
}

fn rm(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if !ledger.delete(id) {
        bail!("transaction was not removed");
    }
    Ok(())
}
