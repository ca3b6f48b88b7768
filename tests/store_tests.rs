// Copyright (c) 2025 Pocketledger Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::Read;
use std::thread::JoinHandle;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tiny_http::{Header, Response, Server};

use pocketledger::config::UserId;
use pocketledger::models::{Frequency, NewTransaction, TransactionKind, TransactionPatch};
use pocketledger::store::{RestStore, StoreError, TransactionStore};

struct Captured {
    method: String,
    url: String,
    body: String,
}

/// Serves exactly one request with the given status/body, capturing what the
/// client sent.
fn serve_one(status: u16, body: &'static str) -> (String, JoinHandle<Captured>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let base_url = format!("http://{}", addr);
    let handle = std::thread::spawn(move || {
        let mut request = server.recv().unwrap();
        let mut req_body = String::new();
        request.as_reader().read_to_string(&mut req_body).unwrap();
        let captured = Captured {
            method: request.method().to_string(),
            url: request.url().to_string(),
            body: req_body,
        };
        let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
        request
            .respond(Response::from_string(body).with_status_code(status).with_header(header))
            .unwrap();
        captured
    });
    (base_url, handle)
}

fn user() -> UserId {
    UserId("u1".into())
}

#[test]
fn list_hits_user_scoped_path_and_decodes_wire_format() {
    let (base_url, handle) = serve_one(
        200,
        r#"[{
            "id": 9,
            "description": "Salary",
            "category": "Salary",
            "amount": "1000",
            "type": "Revenue",
            "isDone": true,
            "startDate": "2025-03-01",
            "frequency": 30
        }]"#,
    );
    let store = RestStore::new(&base_url).unwrap();
    let rows = store.list(&user()).unwrap();
    let captured = handle.join().unwrap();

    assert_eq!(captured.method, "GET");
    assert_eq!(captured.url, "/users/u1/transactions");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, 9);
    assert_eq!(rows[0].kind, TransactionKind::Revenue);
    assert_eq!(rows[0].frequency, Frequency::Monthly);
    assert_eq!(rows[0].amount, Decimal::from(1000));
}

#[test]
fn create_posts_derived_fields_and_frequency_code() {
    let (base_url, handle) = serve_one(
        201,
        r#"{
            "id": 12,
            "description": "Cinema",
            "category": "Leisure",
            "amount": "11.50",
            "type": "Expense",
            "isDone": true,
            "startDate": "2025-03-02",
            "frequency": -1
        }"#,
    );
    let store = RestStore::new(&base_url).unwrap();
    let new = NewTransaction {
        description: "Cinema".into(),
        category: "Leisure".into(),
        amount: Decimal::new(1150, 2),
        kind: TransactionKind::Expense,
        is_done: true,
        start_date: NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
        end_date: None,
        frequency: Frequency::OneOff,
    };
    let created = store.create(&user(), &new).unwrap();
    let captured = handle.join().unwrap();

    assert_eq!(captured.method, "POST");
    assert_eq!(captured.url, "/users/u1/transactions");
    let sent: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(sent["isDone"], serde_json::json!(true));
    assert_eq!(sent["frequency"], serde_json::json!(-1));
    assert_eq!(sent["type"], serde_json::json!("Expense"));
    assert!(sent.get("id").is_none());
    assert_eq!(created.id, 12);
}

#[test]
fn update_puts_partial_patch_to_item_url() {
    let (base_url, handle) = serve_one(
        200,
        r#"{
            "id": 4,
            "description": "Rent",
            "category": "Housing",
            "amount": "800",
            "type": "Expense",
            "isDone": false,
            "startDate": "2025-04-01",
            "frequency": 30
        }"#,
    );
    let store = RestStore::new(&base_url).unwrap();
    let patch = TransactionPatch {
        amount: Some(Decimal::from(800)),
        ..Default::default()
    };
    let updated = store.update(&user(), 4, &patch).unwrap();
    let captured = handle.join().unwrap();

    assert_eq!(captured.method, "PUT");
    assert_eq!(captured.url, "/users/u1/transactions/4");
    let sent: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(sent, serde_json::json!({ "amount": "800" }));
    assert_eq!(updated.amount, Decimal::from(800));
}

#[test]
fn delete_targets_item_url() {
    let (base_url, handle) = serve_one(204, "");
    let store = RestStore::new(&base_url).unwrap();
    store.delete(&user(), 7).unwrap();
    let captured = handle.join().unwrap();
    assert_eq!(captured.method, "DELETE");
    assert_eq!(captured.url, "/users/u1/transactions/7");
}

#[test]
fn server_error_maps_to_rejected_with_status() {
    let (base_url, handle) = serve_one(500, "internal error");
    let store = RestStore::new(&base_url).unwrap();
    let err = store.list(&user()).unwrap_err();
    handle.join().unwrap();
    match err {
        StoreError::Rejected { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "internal error");
        }
        other => panic!("expected Rejected, got {:?}", other),
    }
}

#[test]
fn missing_item_maps_to_not_found() {
    let (base_url, handle) = serve_one(404, "no such transaction");
    let store = RestStore::new(&base_url).unwrap();
    let err = store.delete(&user(), 42).unwrap_err();
    handle.join().unwrap();
    match err {
        StoreError::NotFound(id) => assert_eq!(id, 42),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn invalid_frequency_code_fails_decoding() {
    let (base_url, handle) = serve_one(
        200,
        r#"[{
            "id": 1,
            "description": "x",
            "category": "Other",
            "amount": "1",
            "type": "Expense",
            "isDone": false,
            "startDate": "2025-03-01",
            "frequency": 3
        }]"#,
    );
    let store = RestStore::new(&base_url).unwrap();
    let err = store.list(&user()).unwrap_err();
    handle.join().unwrap();
    assert!(matches!(err, StoreError::Network(_)));
}
