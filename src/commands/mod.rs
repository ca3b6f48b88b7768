// Copyright (c) 2025 Pocketledger Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod config;
pub mod exporter;
pub mod rollover;
pub mod totals;
pub mod transactions;

use anyhow::{Context, Result};

use crate::config::{Config, UserId};
use crate::store::RestStore;

/// Resolves the configured store endpoint and session, refusing to proceed
/// without both. Every data command starts here.
pub(crate) fn store_and_user(cfg: &Config) -> Result<(RestStore, UserId)> {
    let url = cfg.require_url()?;
    let store = RestStore::new(url).context("Could not build the HTTP client")?;
    let user = cfg.require_user()?;
    Ok((store, user))
}
