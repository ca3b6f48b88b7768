// Copyright (c) 2025 Pocketledger Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use pocketledger::models::{
    Field, FieldValue, Frequency, Transaction, TransactionDraft, TransactionKind,
    TransactionPatch, ValidationError,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn draft() -> TransactionDraft {
    TransactionDraft {
        description: "Rent".into(),
        category: "Housing".into(),
        amount: Decimal::from(750),
        kind: TransactionKind::Expense,
        frequency: Frequency::Monthly,
        start_date: date("2025-03-01"),
        end_date: None,
    }
}

#[test]
fn frequency_codes_round_trip() {
    for (freq, code) in [
        (Frequency::Daily, 1),
        (Frequency::Weekly, 7),
        (Frequency::Biweekly, 14),
        (Frequency::Monthly, 30),
        (Frequency::OneOff, -1),
    ] {
        assert_eq!(freq.code(), code);
        assert_eq!(Frequency::try_from(code).unwrap(), freq);
    }
}

#[test]
fn frequency_rejects_unknown_codes() {
    for code in [0, 2, 15, 31, -2, 365] {
        assert!(Frequency::try_from(code).is_err(), "code {} accepted", code);
    }
}

#[test]
fn only_one_off_is_non_recurring() {
    assert!(!Frequency::OneOff.is_recurring());
    for f in [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Biweekly,
        Frequency::Monthly,
    ] {
        assert!(f.is_recurring(), "{:?} should be recurring", f);
    }
}

#[test]
fn transaction_wire_format_uses_camel_case_and_codes() {
    let raw = r#"{
        "id": 7,
        "description": "Bus pass",
        "category": "Transport",
        "amount": "34.50",
        "type": "Expense",
        "isDone": true,
        "startDate": "2025-03-01",
        "frequency": 30
    }"#;
    let tx: Transaction = serde_json::from_str(raw).unwrap();
    assert_eq!(tx.id, 7);
    assert_eq!(tx.kind, TransactionKind::Expense);
    assert_eq!(tx.frequency, Frequency::Monthly);
    assert_eq!(tx.end_date, None);
    assert_eq!(tx.amount, Decimal::new(3450, 2));

    let back = serde_json::to_value(&tx).unwrap();
    assert_eq!(back["isDone"], serde_json::json!(true));
    assert_eq!(back["frequency"], serde_json::json!(30));
    assert_eq!(back["type"], serde_json::json!("Expense"));
    assert!(back.get("endDate").is_none());
}

#[test]
fn invalid_wire_frequency_fails_deserialization() {
    let raw = r#"{
        "id": 1,
        "description": "x",
        "category": "Other",
        "amount": "1",
        "type": "Revenue",
        "isDone": false,
        "startDate": "2025-03-01",
        "frequency": 3
    }"#;
    assert!(serde_json::from_str::<Transaction>(raw).is_err());
}

#[test]
fn draft_validation_requires_all_fields() {
    assert_eq!(draft().validate(), Ok(()));

    let mut d = draft();
    d.description = "  ".into();
    assert_eq!(d.validate(), Err(ValidationError::MissingDescription));

    let mut d = draft();
    d.category = String::new();
    assert_eq!(d.validate(), Err(ValidationError::MissingCategory));

    let mut d = draft();
    d.amount = Decimal::ZERO;
    assert_eq!(d.validate(), Err(ValidationError::NonPositiveAmount));

    let mut d = draft();
    d.amount = Decimal::from(-5);
    assert_eq!(d.validate(), Err(ValidationError::NonPositiveAmount));
}

#[test]
fn is_done_derived_from_start_date() {
    let d = draft(); // starts 2025-03-01
    assert!(d.clone().into_new(date("2025-03-02")).is_done);
    assert!(!d.clone().into_new(date("2025-03-01")).is_done);
    assert!(!d.into_new(date("2025-02-28")).is_done);
}

#[test]
fn patch_applies_only_present_fields() {
    let mut tx = Transaction {
        id: 1,
        description: "Rent".into(),
        category: "Housing".into(),
        amount: Decimal::from(750),
        kind: TransactionKind::Expense,
        is_done: false,
        start_date: date("2025-03-01"),
        end_date: Some(date("2025-12-31")),
        frequency: Frequency::Monthly,
    };
    let patch = TransactionPatch {
        amount: Some(Decimal::from(800)),
        end_date: Some(None),
        ..Default::default()
    };
    patch.apply(&mut tx);
    assert_eq!(tx.amount, Decimal::from(800));
    assert_eq!(tx.end_date, None);
    assert_eq!(tx.description, "Rent");
    assert_eq!(tx.frequency, Frequency::Monthly);
}

#[test]
fn patch_serializes_only_present_fields() {
    let patch = TransactionPatch {
        description: Some("Lunch".into()),
        ..Default::default()
    };
    let v = serde_json::to_value(&patch).unwrap();
    assert_eq!(v, serde_json::json!({ "description": "Lunch" }));
}

#[test]
fn single_field_patch_round_trips_through_field_value() {
    let patch =
        TransactionPatch::for_field(Field::Amount, FieldValue::Amount(Decimal::from(12)));
    assert_eq!(patch.amount, Some(Decimal::from(12)));
    assert!(patch.description.is_none());

    // Mismatched field/value pairs collapse to an empty patch.
    let patch = TransactionPatch::for_field(Field::Amount, FieldValue::Text("oops".into()));
    assert!(patch.is_empty());
}

#[test]
fn signed_amount_follows_kind() {
    let mut tx = Transaction {
        id: 1,
        description: "Salary".into(),
        category: "Salary".into(),
        amount: Decimal::from(1000),
        kind: TransactionKind::Revenue,
        is_done: true,
        start_date: date("2025-03-01"),
        end_date: None,
        frequency: Frequency::Monthly,
    };
    assert_eq!(tx.signed_amount(), Decimal::from(1000));
    tx.kind = TransactionKind::Expense;
    assert_eq!(tx.signed_amount(), Decimal::from(-1000));
}
