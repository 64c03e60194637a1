//! Transactions API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_transactions: Get filtered transactions list (JSON)
//! - api_transaction_detail: Get single transaction (JSON)
//! - api_transaction_create / update / delete: Forward writes to the backend
//! - api_refresh: Re-fetch the snapshot from the backend
//! - htmx_transactions_list: Transaction list (HTML fragment)

use crate::{ApiError, AppState};
use axum::extract::{Path, Query, State};
use axum::Json;
use findash_core::{
    filter_transactions, format_usd, running_total, CategoryFilter, KindFilter, Transaction,
    TransactionFilter, TransactionKind, TransactionsResponse,
};
use std::collections::HashMap;

/// Build a filter from query parameters (`type`, `category`, `q`)
fn filter_from_params(params: &HashMap<String, String>) -> TransactionFilter {
    TransactionFilter {
        kind: KindFilter::from_label(params.get("type").map(|s| s.as_str()).unwrap_or("")),
        category: CategoryFilter::from_label(
            params.get("category").map(|s| s.as_str()).unwrap_or(""),
        ),
        query: params.get("q").cloned().unwrap_or_default(),
    }
}

/// Re-fetch the full transaction list and replace the snapshot
async fn refresh_snapshot(state: &AppState) -> Result<usize, ApiError> {
    let transactions = state.client.list().await?;
    let count = transactions.len();
    state.store.replace_all(transactions);
    Ok(count)
}

/// Get transactions with filtering (JSON API)
pub async fn api_transactions(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> String {
    let filter = filter_from_params(&params);
    let all = state.store.all();
    let transactions = filter_transactions(&all, &filter);
    let total = format_usd(running_total(&transactions));

    let response = TransactionsResponse {
        total_count: transactions.len(),
        total,
        transactions,
    };
    serde_json::to_string(&response).unwrap_or_default()
}

/// Get single transaction detail (JSON API)
pub async fn api_transaction_detail(state: State<AppState>, path: Path<i64>) -> String {
    match state.store.transaction(path.0) {
        Some(t) => serde_json::to_string(&t).unwrap_or_default(),
        None => r#"{"error": "Transaction not found"}"#.to_string(),
    }
}

/// Create a transaction via the backend, then refresh the snapshot
pub async fn api_transaction_create(
    state: State<AppState>,
    Json(transaction): Json<Transaction>,
) -> Result<Json<Transaction>, ApiError> {
    if transaction.description.trim().is_empty() {
        return Err(ApiError::BadRequest {
            message: "Description is required".to_string(),
        });
    }

    let stored = state.client.create(&transaction).await?;
    log::info!("Created transaction {:?}", stored.id);

    // The backend owns the data; a failed refresh only means a stale view
    if let Err(e) = refresh_snapshot(&state).await {
        log::warn!("Snapshot refresh after create failed: {}", e);
    }
    Ok(Json(stored))
}

/// Update a transaction via the backend, then refresh the snapshot
pub async fn api_transaction_update(
    state: State<AppState>,
    path: Path<i64>,
    Json(transaction): Json<Transaction>,
) -> Result<Json<Transaction>, ApiError> {
    let stored = state.client.update(path.0, &transaction).await?;
    log::info!("Updated transaction {}", path.0);

    if let Err(e) = refresh_snapshot(&state).await {
        log::warn!("Snapshot refresh after update failed: {}", e);
    }
    Ok(Json(stored))
}

/// Delete a transaction via the backend, then refresh the snapshot
pub async fn api_transaction_delete(
    state: State<AppState>,
    path: Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.client.delete(path.0).await?;
    log::info!("Deleted transaction {}", path.0);

    if let Err(e) = refresh_snapshot(&state).await {
        log::warn!("Snapshot refresh after delete failed: {}", e);
    }
    Ok(Json(serde_json::json!({ "success": true })))
}

/// Re-fetch the snapshot from the backend (JSON API)
pub async fn api_refresh(state: State<AppState>) -> String {
    match refresh_snapshot(&state).await {
        Ok(count) => {
            log::info!("Snapshot refreshed: {} transactions", count);
            serde_json::json!({ "success": true, "count": count }).to_string()
        }
        Err(e) => serde_json::json!({ "success": false, "message": e.to_string() }).to_string(),
    }
}

/// HTMX: Transactions list - Partial page update
///
/// Applies the same filters as the JSON API and renders table rows
/// with a running-total footer.
pub async fn htmx_transactions_list(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> String {
    let filter = filter_from_params(&params);
    let all = state.store.all();
    let transactions = filter_transactions(&all, &filter);

    if transactions.is_empty() {
        return r#"<div class='text-center py-12 text-gray-500'><p>No matching transactions</p></div>"#
            .to_string();
    }

    let mut html = String::from(
        r#"<table class='w-full text-sm'>
        <thead><tr class='text-left text-gray-500 border-b'>
            <th class='py-2'>Date</th><th>Description</th><th>Merchant</th><th>Category</th><th>Type</th><th class='text-right'>Amount</th><th></th>
        </tr></thead><tbody>"#,
    );

    for t in &transactions {
        let (badge, amount_color, sign) = match t.kind {
            TransactionKind::Income => ("bg-green-100 text-green-700", "text-green-600", "+"),
            TransactionKind::Expense => ("bg-red-100 text-red-700", "text-red-600", "-"),
            TransactionKind::Unknown => ("bg-gray-100 text-gray-600", "text-gray-600", ""),
        };
        let id = t.id.map(|i| i.to_string()).unwrap_or_default();
        html.push_str(&format!(
            r##"<tr class='border-b hover:bg-gray-50'>
                <td class='py-2 text-gray-500'>{}</td>
                <td class='font-medium'>{}</td>
                <td class='text-gray-500'>{}</td>
                <td>{}</td>
                <td><span class='px-2 py-0.5 rounded-full text-xs {}'>{}</span></td>
                <td class='text-right font-medium {}'>{}{}</td>
                <td class='text-right'>
                    <button hx-delete='/api/transactions/{}' hx-confirm='Delete this transaction?'
                        hx-swap='none'
                        hx-on::after-request='htmx.trigger("#transactions-content", "refresh")'
                        class='text-gray-400 hover:text-red-600'>✕</button>
                </td>
            </tr>"##,
            t.date,
            t.description,
            t.merchant,
            t.category,
            badge,
            t.kind,
            amount_color,
            sign,
            format_usd(t.amount),
            id
        ));
    }

    let total = format_usd(running_total(&transactions));
    html.push_str(&format!(
        r#"</tbody><tfoot><tr class='font-bold'>
            <td class='py-2' colspan='5'>Total ({} transactions)</td>
            <td class='text-right'>{}</td><td></td>
        </tr></tfoot></table>"#,
        transactions.len(),
        total
    ));
    html
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use findash_client::test_client::InMemoryTransactionsApi;
    use findash_client::{ClientError, ClientResult, TransactionsApi};
    use findash_config::Config;
    use findash_core::{BudgetGoal, TransactionStore};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn sample(description: &str, kind: TransactionKind, amount: f64) -> Transaction {
        Transaction {
            id: None,
            date: "2025-10-01".to_string(),
            description: description.to_string(),
            category: "Shopping".to_string(),
            merchant: String::new(),
            amount,
            kind,
            payment_method: None,
            notes: None,
        }
    }

    async fn state_with(seed: Vec<Transaction>) -> AppState {
        let client = Arc::new(InMemoryTransactionsApi::seeded(seed));
        let store = Arc::new(TransactionStore::new());
        store.replace_all(client.list().await.unwrap());
        AppState {
            store,
            client,
            budget: Arc::new(RwLock::new(BudgetGoal::default())),
            config: Config::default(),
        }
    }

    #[test]
    fn test_filter_from_params() {
        let mut params = HashMap::new();
        params.insert("type".to_string(), "Income".to_string());
        params.insert("q".to_string(), "coffee".to_string());
        let filter = filter_from_params(&params);
        assert_eq!(filter.kind, KindFilter::Income);
        assert_eq!(filter.category, CategoryFilter::All);
        assert_eq!(filter.query, "coffee");
    }

    #[tokio::test]
    async fn test_api_transactions_filters_and_totals() {
        let state = state_with(vec![
            sample("Salary", TransactionKind::Income, 3000.0),
            sample("Groceries", TransactionKind::Expense, 400.0),
        ])
        .await;

        let body = api_transactions(State(state), Query(HashMap::new())).await;
        let response: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(response["total_count"], 2);
        assert_eq!(response["total"], "$2,600.00");
    }

    #[tokio::test]
    async fn test_create_refreshes_snapshot() {
        let state = state_with(vec![]).await;
        assert_eq!(state.store.count(), 0);

        let created = api_transaction_create(
            State(state.clone()),
            Json(sample("Coffee", TransactionKind::Expense, 6.5)),
        )
        .await
        .unwrap();
        assert!(created.0.id.is_some());
        assert_eq!(state.store.count(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_description() {
        let state = state_with(vec![]).await;
        let err = api_transaction_create(
            State(state),
            Json(sample("   ", TransactionKind::Expense, 1.0)),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest { .. }));
    }

    /// Backend stand-in whose every call fails with a message that
    /// contains JSON-hostile characters
    struct BrokenBackend;

    impl BrokenBackend {
        fn error() -> ClientError {
            ClientError::DecodeError {
                reason: r#"expected a "transactions" array"#.to_string(),
            }
        }
    }

    #[async_trait::async_trait]
    impl TransactionsApi for BrokenBackend {
        async fn list(&self) -> ClientResult<Vec<Transaction>> {
            Err(Self::error())
        }
        async fn create(&self, _transaction: &Transaction) -> ClientResult<Transaction> {
            Err(Self::error())
        }
        async fn update(&self, _id: i64, _transaction: &Transaction) -> ClientResult<Transaction> {
            Err(Self::error())
        }
        async fn delete(&self, _id: i64) -> ClientResult<()> {
            Err(Self::error())
        }
    }

    #[tokio::test]
    async fn test_refresh_reports_count() {
        let state = state_with(vec![sample("Coffee", TransactionKind::Expense, 6.5)]).await;
        let body = api_refresh(State(state)).await;
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["count"], 1);
    }

    #[tokio::test]
    async fn test_refresh_error_body_stays_valid_json() {
        let state = AppState {
            store: Arc::new(TransactionStore::new()),
            client: Arc::new(BrokenBackend),
            budget: Arc::new(RwLock::new(BudgetGoal::default())),
            config: Config::default(),
        };
        let body = api_refresh(State(state)).await;
        // The quoted reason must survive as a JSON string, not break the body
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["success"], false);
        assert!(value["message"]
            .as_str()
            .unwrap()
            .contains(r#""transactions""#));
    }

    #[tokio::test]
    async fn test_delete_removes_from_snapshot() {
        let state = state_with(vec![sample("Old", TransactionKind::Expense, 5.0)]).await;
        let id = state.store.all()[0].id.unwrap();

        api_transaction_delete(State(state.clone()), Path(id))
            .await
            .unwrap();
        assert_eq!(state.store.count(), 0);

        let err = api_transaction_delete(State(state), Path(id)).await.unwrap_err();
        assert!(matches!(err, ApiError::Backend(_)));
    }
}
