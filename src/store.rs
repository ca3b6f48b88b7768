// Copyright (c) 2025 Pocketledger Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::UserId;
use crate::models::{NewTransaction, Transaction, TransactionPatch};
use crate::utils::http_client;

/// Why a store call failed. Network and decode problems both surface as
/// `Network`; HTTP-level rejections keep their status so callers can tell a
/// bad request from an outage.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("transaction {0} not found in the store")]
    NotFound(i64),
    #[error("store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("could not reach the transaction store: {0}")]
    Network(#[from] reqwest::Error),
}

/// The remote per-user transaction resource. One implementation talks REST;
/// tests substitute an in-memory one.
pub trait TransactionStore {
    fn list(&self, user: &UserId) -> Result<Vec<Transaction>, StoreError>;
    fn create(&self, user: &UserId, new: &NewTransaction) -> Result<Transaction, StoreError>;
    fn update(
        &self,
        user: &UserId,
        id: i64,
        patch: &TransactionPatch,
    ) -> Result<Transaction, StoreError>;
    fn delete(&self, user: &UserId, id: i64) -> Result<(), StoreError>;
}

/// REST-backed store: `{base}/users/{userId}/transactions[/{id}]`.
pub struct RestStore {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl RestStore {
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        Ok(Self {
            client: http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, user: &UserId) -> String {
        format!("{}/users/{}/transactions", self.base_url, user)
    }

    fn item_url(&self, user: &UserId, id: i64) -> String {
        format!("{}/{}", self.collection_url(user), id)
    }

    fn check(
        resp: reqwest::blocking::Response,
        id: Option<i64>,
    ) -> Result<reqwest::blocking::Response, StoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(StoreError::NotFound(id));
            }
        }
        let message = resp.text().unwrap_or_default();
        Err(StoreError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

impl TransactionStore for RestStore {
    fn list(&self, user: &UserId) -> Result<Vec<Transaction>, StoreError> {
        let resp = self.client.get(self.collection_url(user)).send()?;
        Ok(Self::check(resp, None)?.json()?)
    }

    fn create(&self, user: &UserId, new: &NewTransaction) -> Result<Transaction, StoreError> {
        let resp = self
            .client
            .post(self.collection_url(user))
            .json(new)
            .send()?;
        Ok(Self::check(resp, None)?.json()?)
    }

    fn update(
        &self,
        user: &UserId,
        id: i64,
        patch: &TransactionPatch,
    ) -> Result<Transaction, StoreError> {
        let resp = self
            .client
            .put(self.item_url(user, id))
            .json(patch)
            .send()?;
        Ok(Self::check(resp, Some(id))?.json()?)
    }

    fn delete(&self, user: &UserId, id: i64) -> Result<(), StoreError> {
        let resp = self.client.delete(self.item_url(user, id)).send()?;
        Self::check(resp, Some(id))?;
        Ok(())
    }
}
