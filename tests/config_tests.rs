// Copyright (c) 2025 Pocketledger Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketledger::config::{self, Config, Session, UserId};

#[test]
fn missing_file_yields_default_unauthenticated_config() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config::load_from(&dir.path().join("config.json")).unwrap();
    assert!(cfg.store_url.is_none());
    assert_eq!(cfg.session(), Session::Unauthenticated);
    assert!(cfg.require_user().is_err());
    assert!(cfg.require_url().is_err());
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let cfg = Config {
        store_url: Some("https://api.example.com".into()),
        user: Some(UserId("u1".into())),
    };
    config::save_to(&cfg, &path).unwrap();

    let loaded = config::load_from(&path).unwrap();
    assert_eq!(loaded.store_url.as_deref(), Some("https://api.example.com"));
    assert_eq!(loaded.session(), Session::User(UserId("u1".into())));
    assert_eq!(loaded.require_user().unwrap(), UserId("u1".into()));
    assert_eq!(loaded.require_url().unwrap(), "https://api.example.com");
}

#[test]
fn corrupt_file_is_an_error_not_a_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(config::load_from(&path).is_err());
}

#[test]
fn user_id_serializes_transparently() {
    let cfg = Config {
        store_url: None,
        user: Some(UserId("alice".into())),
    };
    let v = serde_json::to_value(&cfg).unwrap();
    assert_eq!(v["user"], serde_json::json!("alice"));
}
