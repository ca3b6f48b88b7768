// Copyright (c) 2025 Pocketledger Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::categories;
use crate::models::TransactionKind;
use crate::utils::pretty_table;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let kind: TransactionKind = sub
                .get_one::<String>("kind")
                .unwrap()
                .parse()
                .map_err(anyhow::Error::msg)?;
            let rows: Vec<Vec<String>> = categories::for_kind(kind)
                .iter()
                .map(|c| vec![c.to_string()])
                .collect();
            println!(
                "{}",
                pretty_table(&[&format!("{} categories", kind.label())[..]], rows)
            );
            Ok(())
        }
        _ => Ok(()),
    }
}
