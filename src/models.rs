// Copyright (c) 2025 Pocketledger Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Revenue,
    Expense,
}

impl TransactionKind {
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Revenue => "revenue",
            TransactionKind::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "revenue" | "income" => Ok(TransactionKind::Revenue),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(format!("unknown kind '{}', expected revenue|expense", other)),
        }
    }
}

/// How often a transaction repeats. On the wire this is the store's integer
/// code: 1 (daily), 7 (weekly), 14 (biweekly), 30 (monthly), -1 (one-off).
/// Any other code fails deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    OneOff,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid frequency code {0}, expected one of 1, 7, 14, 30, -1")]
pub struct InvalidFrequency(pub i32);

impl Frequency {
    pub const fn code(self) -> i32 {
        match self {
            Frequency::Daily => 1,
            Frequency::Weekly => 7,
            Frequency::Biweekly => 14,
            Frequency::Monthly => 30,
            Frequency::OneOff => -1,
        }
    }

    /// One-off transactions are the ones purged at month rollover.
    pub const fn is_recurring(self) -> bool {
        !matches!(self, Frequency::OneOff)
    }

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
            Frequency::OneOff => "one-off",
        }
    }
}

impl TryFrom<i32> for Frequency {
    type Error = InvalidFrequency;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Frequency::Daily),
            7 => Ok(Frequency::Weekly),
            14 => Ok(Frequency::Biweekly),
            30 => Ok(Frequency::Monthly),
            -1 => Ok(Frequency::OneOff),
            other => Err(InvalidFrequency(other)),
        }
    }
}

impl From<Frequency> for i32 {
    fn from(f: Frequency) -> i32 {
        f.code()
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "1" => Ok(Frequency::Daily),
            "weekly" | "7" => Ok(Frequency::Weekly),
            "biweekly" | "14" => Ok(Frequency::Biweekly),
            "monthly" | "30" => Ok(Frequency::Monthly),
            "once" | "one-off" | "oneoff" | "-1" => Ok(Frequency::OneOff),
            other => Err(format!(
                "unknown frequency '{}', expected daily|weekly|biweekly|monthly|once",
                other
            )),
        }
    }
}

/// A transaction as the store returns it. `amount` is always the positive
/// magnitude; the sign of its contribution to totals comes from `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub description: String,
    pub category: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub is_done: bool,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub frequency: Frequency,
}

impl Transaction {
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Revenue => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    pub fn field(&self, field: Field) -> FieldValue {
        match field {
            Field::Description => FieldValue::Text(self.description.clone()),
            Field::Category => FieldValue::Text(self.category.clone()),
            Field::Amount => FieldValue::Amount(self.amount),
            Field::Frequency => FieldValue::Frequency(self.frequency),
            Field::StartDate => FieldValue::Date(self.start_date),
            Field::EndDate => FieldValue::EndDate(self.end_date),
        }
    }
}

/// Create DTO: a transaction minus `id` (the store assigns it) and minus the
/// owner back-reference (the store derives it from the request path).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub description: String,
    pub category: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub is_done: bool,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub frequency: Frequency,
}

/// User input for a creation attempt, before validation. Kept separate from
/// [`NewTransaction`] so a rejected draft survives untouched for the next
/// attempt.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub description: String,
    pub category: String,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("description is required")]
    MissingDescription,
    #[error("category is required")]
    MissingCategory,
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
}

impl TransactionDraft {
    /// Local preconditions; a draft failing here never reaches the network.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingDescription);
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        Ok(())
    }

    /// Finalizes the draft for submission. `is_done` is derived here, not
    /// user-editable: the transaction is done once its start date has passed.
    pub fn into_new(self, today: NaiveDate) -> NewTransaction {
        NewTransaction {
            is_done: today > self.start_date,
            description: self.description,
            category: self.category,
            amount: self.amount,
            kind: self.kind,
            start_date: self.start_date,
            end_date: self.end_date,
            frequency: self.frequency,
        }
    }
}

/// Update DTO: only the fields present are touched by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Option<NaiveDate>>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.category.is_none()
            && self.amount.is_none()
            && self.frequency.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    pub fn for_field(field: Field, value: FieldValue) -> Self {
        let mut patch = TransactionPatch::default();
        match (field, value) {
            (Field::Description, FieldValue::Text(s)) => patch.description = Some(s),
            (Field::Category, FieldValue::Text(s)) => patch.category = Some(s),
            (Field::Amount, FieldValue::Amount(a)) => patch.amount = Some(a),
            (Field::Frequency, FieldValue::Frequency(f)) => patch.frequency = Some(f),
            (Field::StartDate, FieldValue::Date(d)) => patch.start_date = Some(d),
            (Field::EndDate, FieldValue::EndDate(d)) => patch.end_date = Some(d),
            // A mismatched pair produces an empty patch, which callers treat
            // as nothing-to-send.
            _ => {}
        }
        patch
    }

    /// Applies the patch to a local copy of the row (the optimistic half of
    /// an update; the store's canonical answer replaces it on success).
    pub fn apply(&self, tx: &mut Transaction) {
        if let Some(v) = &self.description {
            tx.description = v.clone();
        }
        if let Some(v) = &self.category {
            tx.category = v.clone();
        }
        if let Some(v) = self.amount {
            tx.amount = v;
        }
        if let Some(v) = self.frequency {
            tx.frequency = v;
        }
        if let Some(v) = self.start_date {
            tx.start_date = v;
        }
        if let Some(v) = self.end_date {
            tx.end_date = v;
        }
    }
}

/// Editable columns of a transaction row. Used to key coalesced field edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Description,
    Category,
    Amount,
    Frequency,
    StartDate,
    EndDate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Amount(Decimal),
    Frequency(Frequency),
    Date(NaiveDate),
    EndDate(Option<NaiveDate>),
}

/// Aggregates over a transaction list; see [`crate::ledger::compute_totals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub revenues: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}
