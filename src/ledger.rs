// Copyright (c) 2025 Pocketledger Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use chrono::Utc;

use crate::config::UserId;
use crate::models::{
    Field, FieldValue, Totals, Transaction, TransactionDraft, TransactionKind, TransactionPatch,
    ValidationError,
};
use crate::notify::Notifier;
use crate::store::{StoreError, TransactionStore};

/// Sums a transaction list. Pure: same list in, same totals out.
pub fn compute_totals(transactions: &[Transaction]) -> Totals {
    let mut totals = Totals::default();
    for tx in transactions {
        match tx.kind {
            TransactionKind::Revenue => totals.revenues += tx.amount,
            TransactionKind::Expense => totals.expenses += tx.amount,
        }
    }
    totals.balance = totals.revenues - totals.expenses;
    totals
}

/// One-off side of the rollover partition, shown to the user before any
/// deletion is issued. An empty `one_off` means the rollover is a no-op.
#[derive(Debug, Clone)]
pub struct RolloverPreview {
    pub one_off: Vec<Transaction>,
    pub totals: Totals,
}

impl RolloverPreview {
    pub fn is_noop(&self) -> bool {
        self.one_off.is_empty()
    }
}

/// Outcome of a committed rollover. Deletions are independent per
/// transaction, so both sides can be non-empty at once; callers must report
/// failures individually and never claim full success while `failed` is
/// non-empty.
#[derive(Debug, Default)]
pub struct RolloverReport {
    pub deleted: Vec<Transaction>,
    pub failed: Vec<(Transaction, StoreError)>,
}

/// A coalesced field edit handed to the store. `seq` ties the eventual store
/// response back to the edit generation that produced it.
#[derive(Debug, Clone)]
pub struct EditDispatch {
    pub id: i64,
    pub field: Field,
    pub seq: u64,
    pub patch: TransactionPatch,
}

#[derive(Debug, PartialEq, Eq)]
pub enum EditSettle {
    /// Canonical row from the store applied locally.
    Applied,
    /// Store call failed; the field was restored to its pre-edit value.
    RolledBack,
    /// A newer edit for the same field superseded this one; response dropped.
    Stale,
}

struct EditSlot {
    // Latest staged generation for this (transaction, field).
    seq: u64,
    // Value staged since the last flush, if any.
    pending: Option<FieldValue>,
    // Field value before the first optimistic apply, for rollback.
    prior: FieldValue,
}

/// The authoritative client-side view of one user's transactions.
///
/// All mutation flows through here: operations apply optimistically to the
/// local collection, persist to the store, and either adopt the store's
/// canonical row or restore the snapshot. Store failures are reported
/// through the [`Notifier`] and returned as values, never panics, so caller
/// draft state survives a failed attempt.
pub struct Ledger<'a> {
    store: &'a dyn TransactionStore,
    notifier: Box<dyn Notifier>,
    user: UserId,
    transactions: Vec<Transaction>,
    edits: HashMap<(i64, Field), EditSlot>,
    notice_seq: u64,
}

impl<'a> Ledger<'a> {
    pub fn new(store: &'a dyn TransactionStore, notifier: Box<dyn Notifier>, user: UserId) -> Self {
        Self {
            store,
            notifier,
            user,
            transactions: Vec::new(),
            edits: HashMap::new(),
            notice_seq: 0,
        }
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn totals(&self) -> Totals {
        compute_totals(&self.transactions)
    }

    fn next_key(&mut self, action: &str) -> String {
        self.notice_seq += 1;
        format!("{}-{}", action, self.notice_seq)
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.transactions.iter().position(|t| t.id == id)
    }

    /// Replaces the local collection from the store. Fail-closed: a failed
    /// load leaves the collection empty rather than showing stale rows as
    /// if they were valid.
    pub fn load(&mut self) -> Result<(), StoreError> {
        match self.store.list(&self.user) {
            Ok(list) => {
                self.transactions = list;
                self.edits.clear();
                Ok(())
            }
            Err(err) => {
                self.transactions.clear();
                self.edits.clear();
                tracing::error!(user = %self.user, error = %err, "loading transactions failed");
                Err(err)
            }
        }
    }

    /// Validates and submits a draft. A validation failure is returned as an
    /// error before any network call; a store failure is reported through
    /// the notifier and returned as `Ok(None)` so the caller's draft input
    /// is not lost to an unwind.
    pub fn create(
        &mut self,
        draft: TransactionDraft,
    ) -> Result<Option<Transaction>, ValidationError> {
        draft.validate()?;
        let key = self.next_key("create");
        let label = format!("'{}' ({})", draft.description, draft.amount.round_dp(2));
        self.notifier.progress(&key, &format!("Saving {}", label));

        let new = draft.into_new(Utc::now().date_naive());
        match self.store.create(&self.user, &new) {
            Ok(tx) => {
                self.notifier.success(&key, &format!("Saved {}", label));
                self.transactions.push(tx.clone());
                Ok(Some(tx))
            }
            Err(err) => {
                tracing::warn!(user = %self.user, error = %err, "create failed");
                self.notifier
                    .error(&key, &format!("Could not save {}: {}", label, err));
                Ok(None)
            }
        }
    }

    /// Whole-patch update: applies locally first, then persists. On store
    /// failure the snapshot taken before the optimistic apply is restored.
    pub fn update(&mut self, id: i64, patch: TransactionPatch) -> bool {
        let Some(pos) = self.position(id) else {
            let key = self.next_key("update");
            self.notifier
                .error(&key, &format!("No transaction with id {}", id));
            return false;
        };
        if patch.is_empty() {
            return true;
        }

        let snapshot = self.transactions[pos].clone();
        patch.apply(&mut self.transactions[pos]);
        let label = format!("'{}' ({})", snapshot.description, snapshot.amount.round_dp(2));
        let key = self.next_key("update");
        self.notifier.progress(&key, &format!("Updating {}", label));

        match self.store.update(&self.user, id, &patch) {
            Ok(canonical) => {
                self.transactions[pos] = canonical;
                self.notifier.success(&key, &format!("Updated {}", label));
                true
            }
            Err(err) => {
                self.transactions[pos] = snapshot;
                tracing::warn!(user = %self.user, id, error = %err, "update failed");
                self.notifier
                    .error(&key, &format!("Could not update {}: {}", label, err));
                false
            }
        }
    }

    /// Removes a transaction from the store, then locally. The local row
    /// stays put when the store call fails.
    pub fn delete(&mut self, id: i64) -> bool {
        let Some(pos) = self.position(id) else {
            let key = self.next_key("delete");
            self.notifier
                .error(&key, &format!("No transaction with id {}", id));
            return false;
        };
        let label = format!(
            "'{}' ({})",
            self.transactions[pos].description,
            self.transactions[pos].amount.round_dp(2)
        );
        let key = self.next_key("delete");
        self.notifier.progress(&key, &format!("Removing {}", label));

        match self.store.delete(&self.user, id) {
            Ok(()) => {
                self.transactions.remove(pos);
                self.edits.retain(|(eid, _), _| *eid != id);
                self.notifier.success(&key, &format!("Removed {}", label));
                true
            }
            Err(err) => {
                tracing::warn!(user = %self.user, id, error = %err, "delete failed");
                self.notifier
                    .error(&key, &format!("Could not remove {}: {}", label, err));
                false
            }
        }
    }

    /// Stages a single-field edit, applying it to the local row immediately.
    /// Repeated stages of the same field coalesce: only the last value is
    /// flushed, the way a debounced input sends only the final keystroke
    /// state. Returns false for an unknown row.
    pub fn stage_edit(&mut self, id: i64, field: Field, value: FieldValue) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        let prior = self.transactions[pos].field(field);
        let slot = self.edits.entry((id, field)).or_insert(EditSlot {
            seq: 0,
            pending: None,
            prior,
        });
        slot.seq += 1;
        slot.pending = Some(value.clone());
        TransactionPatch::for_field(field, value).apply(&mut self.transactions[pos]);
        true
    }

    /// Drains staged edits into per-field dispatches. The caller sends each
    /// dispatch to the store and feeds the outcome back through
    /// [`settle_edit`]; [`commit_edits`] does both synchronously.
    pub fn flush_edits(&mut self) -> Vec<EditDispatch> {
        let mut out = Vec::new();
        for (&(id, field), slot) in self.edits.iter_mut() {
            if let Some(value) = slot.pending.take() {
                out.push(EditDispatch {
                    id,
                    field,
                    seq: slot.seq,
                    patch: TransactionPatch::for_field(field, value),
                });
            }
        }
        // Dispatch order is deterministic for callers and tests.
        out.sort_by_key(|d| (d.id, d.seq));
        out
    }

    /// Applies a store response for a flushed edit. A response whose
    /// sequence is older than the latest staged edit for that field is
    /// discarded so it cannot overwrite newer local state.
    pub fn settle_edit(
        &mut self,
        dispatch: &EditDispatch,
        result: Result<Transaction, StoreError>,
    ) -> EditSettle {
        let slot_key = (dispatch.id, dispatch.field);
        let current = self
            .edits
            .get(&slot_key)
            .is_some_and(|slot| slot.seq == dispatch.seq);
        if !current {
            // Row deleted, already settled, or superseded by a newer stage.
            tracing::debug!(id = dispatch.id, seq = dispatch.seq, "stale edit response dropped");
            return EditSettle::Stale;
        }
        let Some(slot) = self.edits.remove(&slot_key) else {
            return EditSettle::Stale;
        };
        match result {
            Ok(canonical) => {
                if let Some(pos) = self.position(dispatch.id) {
                    self.transactions[pos] = canonical;
                }
                EditSettle::Applied
            }
            Err(err) => {
                if let Some(pos) = self.position(dispatch.id) {
                    TransactionPatch::for_field(dispatch.field, slot.prior)
                        .apply(&mut self.transactions[pos]);
                }
                let label = self
                    .position(dispatch.id)
                    .map(|pos| {
                        format!(
                            "'{}' ({})",
                            self.transactions[pos].description,
                            self.transactions[pos].amount.round_dp(2)
                        )
                    })
                    .unwrap_or_else(|| format!("transaction {}", dispatch.id));
                tracing::warn!(user = %self.user, id = dispatch.id, error = %err, "edit failed");
                let key = self.next_key("edit");
                self.notifier
                    .error(&key, &format!("Could not update {}: {}", label, err));
                EditSettle::RolledBack
            }
        }
    }

    /// Flushes and settles all staged edits against the store in one pass.
    /// Returns (applied, rolled back) counts.
    pub fn commit_edits(&mut self) -> (usize, usize) {
        let mut applied = 0;
        let mut rolled_back = 0;
        for dispatch in self.flush_edits() {
            let result = self.store.update(&self.user, dispatch.id, &dispatch.patch);
            match self.settle_edit(&dispatch, result) {
                EditSettle::Applied => applied += 1,
                EditSettle::RolledBack => rolled_back += 1,
                EditSettle::Stale => {}
            }
        }
        (applied, rolled_back)
    }

    /// Partitions the collection for a new budgeting month: recurring
    /// transactions survive, one-off ones are candidates for removal. Pure
    /// inspection; nothing is deleted until [`rollover_commit`].
    pub fn rollover_preview(&self) -> RolloverPreview {
        let one_off: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| !t.frequency.is_recurring())
            .cloned()
            .collect();
        let totals = compute_totals(&one_off);
        RolloverPreview { one_off, totals }
    }

    /// Deletes every one-off transaction, one independent store call each.
    /// There is no batch atomicity: on mixed results the successfully
    /// removed rows leave the collection, failed ones stay, and every
    /// failure is reported on its own. Failed rows are not retried here;
    /// the user re-runs the rollover.
    pub fn rollover_commit(&mut self) -> RolloverReport {
        let mut report = RolloverReport::default();
        for tx in self.rollover_preview().one_off {
            let label = format!("'{}' ({})", tx.description, tx.amount.round_dp(2));
            let key = self.next_key("rollover");
            self.notifier.progress(&key, &format!("Removing {}", label));
            match self.store.delete(&self.user, tx.id) {
                Ok(()) => {
                    if let Some(pos) = self.position(tx.id) {
                        self.transactions.remove(pos);
                    }
                    self.edits.retain(|(eid, _), _| *eid != tx.id);
                    self.notifier.success(&key, &format!("Removed {}", label));
                    report.deleted.push(tx);
                }
                Err(err) => {
                    tracing::warn!(user = %self.user, id = tx.id, error = %err, "rollover delete failed");
                    self.notifier
                        .error(&key, &format!("Could not remove {}: {}", label, err));
                    report.failed.push((tx, err));
                }
            }
        }
        report
    }
}
