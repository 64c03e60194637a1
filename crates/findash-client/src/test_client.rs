//! Implements [`TransactionsApi`] with in-memory data for testing.
//!
//! Compiled in the production build too, so the whole app can run
//! top-to-bottom without a live backend.

use crate::{ClientError, ClientResult, TransactionsApi};
use async_trait::async_trait;
use findash_core::Transaction;
use std::sync::Mutex;

/// An implementation of [`TransactionsApi`] that keeps its records in
/// a mutex-guarded vector and assigns ids sequentially.
pub struct InMemoryTransactionsApi {
    inner: Mutex<Inner>,
}

struct Inner {
    records: Vec<Transaction>,
    next_id: i64,
}

impl InMemoryTransactionsApi {
    /// Create an empty store
    pub fn new() -> Self {
        InMemoryTransactionsApi {
            inner: Mutex::new(Inner {
                records: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a store seeded with existing records; ids are assigned
    /// to any record missing one
    pub fn seeded(transactions: Vec<Transaction>) -> Self {
        let api = Self::new();
        {
            let mut inner = api.inner.lock().unwrap();
            for mut t in transactions {
                if t.id.is_none() {
                    t.id = Some(inner.next_id);
                }
                inner.next_id = inner.next_id.max(t.id.unwrap() + 1);
                inner.records.push(t);
            }
        }
        api
    }

    fn not_found(method: &'static str, id: i64) -> ClientError {
        ClientError::BackendStatus {
            status: 404,
            method,
            path: format!("/api/transactions/{}", id),
        }
    }
}

impl Default for InMemoryTransactionsApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionsApi for InMemoryTransactionsApi {
    async fn list(&self) -> ClientResult<Vec<Transaction>> {
        Ok(self.inner.lock().unwrap().records.clone())
    }

    async fn create(&self, transaction: &Transaction) -> ClientResult<Transaction> {
        let mut inner = self.inner.lock().unwrap();
        let mut stored = transaction.clone();
        stored.id = Some(inner.next_id);
        inner.next_id += 1;
        inner.records.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: i64, transaction: &Transaction) -> ClientResult<Transaction> {
        let mut inner = self.inner.lock().unwrap();
        let slot = inner
            .records
            .iter_mut()
            .find(|t| t.id == Some(id))
            .ok_or_else(|| Self::not_found("PUT", id))?;
        let mut stored = transaction.clone();
        stored.id = Some(id);
        *slot = stored.clone();
        Ok(stored)
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.records.len();
        inner.records.retain(|t| t.id != Some(id));
        if inner.records.len() == before {
            return Err(Self::not_found("DELETE", id));
        }
        Ok(())
    }
}
