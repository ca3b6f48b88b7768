// Copyright (c) 2025 Pocketledger Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("dev.pocketledger", "Pocketledger", "pocketledger"));

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Who the client is acting for. There is deliberately no fallback identity:
/// commands that need a user refuse to run until `config login` has been
/// called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Unauthenticated,
    User(UserId),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub store_url: Option<String>,
    pub user: Option<UserId>,
}

impl Config {
    pub fn session(&self) -> Session {
        match &self.user {
            Some(id) => Session::User(id.clone()),
            None => Session::Unauthenticated,
        }
    }

    pub fn require_user(&self) -> Result<UserId> {
        self.user
            .clone()
            .context("Not logged in; run 'pocketledger config login <user-id>' first")
    }

    pub fn require_url(&self) -> Result<&str> {
        self.store_url
            .as_deref()
            .context("No store configured; run 'pocketledger config set-url <url>' first")
    }
}

pub fn config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    let dir = proj.config_dir();
    fs::create_dir_all(dir).context("Failed to create config dir")?;
    Ok(dir.join("config.json"))
}

pub fn load() -> Result<Config> {
    load_from(&config_path()?)
}

pub fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Read config at {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Parse config at {}", path.display()))
}

pub fn save(config: &Config) -> Result<()> {
    save_to(config, &config_path()?)
}

pub fn save_to(config: &Config, path: &Path) -> Result<()> {
    let raw = serde_json::to_string_pretty(config)?;
    fs::write(path, raw).with_context(|| format!("Write config at {}", path.display()))
}
