//! HTTP client for the external transactions backend
//!
//! The backend is the single source of truth for transaction data.
//! This crate wraps its REST surface behind [`TransactionsApi`] so the
//! web layer can swap in an in-memory double for tests. Writes return
//! the backend's view of the record; callers re-fetch the full list
//! afterwards rather than patching local state.

pub mod error;
pub mod test_client;

pub use error::{ClientError, ClientErrorCode, ClientResult};

use async_trait::async_trait;
use findash_config::BackendConfig;
use findash_core::Transaction;
use serde::Deserialize;
use std::time::Duration;

/// Abstraction over the backend's transactions resource
#[async_trait]
pub trait TransactionsApi: Send + Sync {
    /// Fetch every transaction the backend has
    async fn list(&self) -> ClientResult<Vec<Transaction>>;

    /// Create a transaction; returns the stored record (with its id)
    async fn create(&self, transaction: &Transaction) -> ClientResult<Transaction>;

    /// Update an existing transaction by id
    async fn update(&self, id: i64, transaction: &Transaction) -> ClientResult<Transaction>;

    /// Delete a transaction by id
    async fn delete(&self, id: i64) -> ClientResult<()>;
}

/// The backend serves either a bare array or a wrapped object,
/// depending on version; accept both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListResponse {
    Bare(Vec<Transaction>),
    Wrapped { transactions: Vec<Transaction> },
}

impl ListResponse {
    fn into_transactions(self) -> Vec<Transaction> {
        match self {
            ListResponse::Bare(t) => t,
            ListResponse::Wrapped { transactions } => transactions,
        }
    }
}

/// reqwest-backed implementation of [`TransactionsApi`]
pub struct HttpTransactionsApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransactionsApi {
    /// Build a client from backend configuration
    ///
    /// The base URL is stored without a trailing slash so path
    /// concatenation stays predictable. Client construction only
    /// fails on broken TLS backends, in which case the default
    /// client settings are used.
    pub fn new(config: &BackendConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        HttpTransactionsApi {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn check_status(
        response: reqwest::Response,
        method: &'static str,
        path: String,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            log::warn!("Backend returned {} for {} {}", status, method, path);
            Err(ClientError::BackendStatus {
                status: status.as_u16(),
                method,
                path,
            })
        }
    }
}

#[async_trait]
impl TransactionsApi for HttpTransactionsApi {
    async fn list(&self) -> ClientResult<Vec<Transaction>> {
        let path = "/api/transactions".to_string();
        log::debug!("GET {}", self.url(&path));
        let response = self.client.get(self.url(&path)).send().await?;
        let response = Self::check_status(response, "GET", path)?;

        let body = response.text().await?;
        let parsed: ListResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::DecodeError {
                reason: e.to_string(),
            })?;
        Ok(parsed.into_transactions())
    }

    async fn create(&self, transaction: &Transaction) -> ClientResult<Transaction> {
        let path = "/api/transactions".to_string();
        log::debug!("POST {}", self.url(&path));
        let response = self
            .client
            .post(self.url(&path))
            .json(transaction)
            .send()
            .await?;
        let response = Self::check_status(response, "POST", path)?;

        response.json().await.map_err(|e| ClientError::DecodeError {
            reason: e.to_string(),
        })
    }

    async fn update(&self, id: i64, transaction: &Transaction) -> ClientResult<Transaction> {
        let path = format!("/api/transactions/{}", id);
        log::debug!("PUT {}", self.url(&path));
        let response = self
            .client
            .put(self.url(&path))
            .json(transaction)
            .send()
            .await?;
        let response = Self::check_status(response, "PUT", path)?;

        response.json().await.map_err(|e| ClientError::DecodeError {
            reason: e.to_string(),
        })
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        let path = format!("/api/transactions/{}", id);
        log::debug!("DELETE {}", self.url(&path));
        let response = self.client.delete(self.url(&path)).send().await?;
        // Any 2xx counts as deleted; the backend returns 204 or 200
        Self::check_status(response, "DELETE", path)?;
        Ok(())
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_client::InMemoryTransactionsApi;
    use findash_core::TransactionKind;

    fn sample(description: &str) -> Transaction {
        Transaction {
            id: None,
            date: "2025-10-01".to_string(),
            description: description.to_string(),
            category: "Shopping".to_string(),
            merchant: "Amazon".to_string(),
            amount: 20.0,
            kind: TransactionKind::Expense,
            payment_method: None,
            notes: None,
        }
    }

    #[test]
    fn test_list_response_accepts_bare_array() {
        let body = r#"[{"date": "2025-10-01", "description": "x", "amount": 5, "type": "expense"}]"#;
        let parsed: ListResponse = serde_json::from_str(body).unwrap();
        let txns = parsed.into_transactions();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].amount, 5.0);
    }

    #[test]
    fn test_list_response_accepts_wrapped_object() {
        let body = r#"{"transactions": [{"date": "2025-10-01", "description": "x", "amount": 5, "type": "income"}]}"#;
        let parsed: ListResponse = serde_json::from_str(body).unwrap();
        let txns = parsed.into_transactions();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].kind, TransactionKind::Income);
    }

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        let config = BackendConfig {
            base_url: "http://localhost:8080/".to_string(),
            timeout_secs: 5,
        };
        let api = HttpTransactionsApi::new(&config);
        assert_eq!(api.url("/api/transactions"), "http://localhost:8080/api/transactions");
    }

    #[tokio::test]
    async fn test_in_memory_double_crud() {
        let api = InMemoryTransactionsApi::new();

        let created = api.create(&sample("first")).await.unwrap();
        let id = created.id.unwrap();
        assert_eq!(api.list().await.unwrap().len(), 1);

        let mut updated = created.clone();
        updated.description = "renamed".to_string();
        let stored = api.update(id, &updated).await.unwrap();
        assert_eq!(stored.description, "renamed");

        api.delete(id).await.unwrap();
        assert!(api.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_in_memory_double_missing_id() {
        let api = InMemoryTransactionsApi::new();
        let err = api.update(42, &sample("ghost")).await.unwrap_err();
        assert_eq!(err.code(), ClientErrorCode::BackendStatus);
        let err = api.delete(42).await.unwrap_err();
        assert_eq!(err.code(), ClientErrorCode::BackendStatus);
    }
}
