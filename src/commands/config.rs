// Copyright (c) 2025 Pocketledger Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::config::{self, Config, Session, UserId};

pub fn handle(cfg: &mut Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-url", sub)) => {
            let url = sub.get_one::<String>("url").unwrap();
            cfg.store_url = Some(url.trim_end_matches('/').to_string());
            config::save(cfg)?;
            println!("Store URL set to {}", cfg.store_url.as_deref().unwrap_or_default());
        }
        Some(("login", sub)) => {
            let user = sub.get_one::<String>("user").unwrap();
            cfg.user = Some(UserId(user.to_string()));
            config::save(cfg)?;
            println!("Acting as user {}", user);
        }
        Some(("logout", _)) => {
            cfg.user = None;
            config::save(cfg)?;
            println!("Logged out");
        }
        Some(("show", _)) => {
            println!(
                "store url: {}",
                cfg.store_url.as_deref().unwrap_or("(not set)")
            );
            match cfg.session() {
                Session::User(id) => println!("user: {}", id),
                Session::Unauthenticated => println!("user: (not logged in)"),
            }
            println!("config file: {}", config::config_path()?.display());
        }
        _ => {}
    }
    Ok(())
}
