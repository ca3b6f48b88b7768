// Copyright (c) 2025 Pocketledger Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TransactionKind;

// Fixed per-kind category sets. These populate selection in clients and are
// advisory on input: an unknown category is accepted with a warning, the
// store does not reject it either.

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Housing",
    "Groceries",
    "Transport",
    "Utilities",
    "Insurance",
    "Health",
    "Leisure",
    "Education",
    "Subscriptions",
    "Other",
];

pub const REVENUE_CATEGORIES: &[&str] = &[
    "Salary",
    "Scholarship",
    "Allowance",
    "Investment",
    "Gift",
    "Other",
];

pub fn for_kind(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Revenue => REVENUE_CATEGORIES,
        TransactionKind::Expense => EXPENSE_CATEGORIES,
    }
}

pub fn is_known(kind: TransactionKind, category: &str) -> bool {
    for_kind(kind).iter().any(|c| c.eq_ignore_ascii_case(category))
}
