//! Analytics API endpoints - JSON report responses
//!
//! Endpoints:
//! - api_summary: Snapshot-wide totals
//! - api_monthly_report: Income vs expenses per month
//! - api_category_report: Expense totals per category

use crate::AppState;
use axum::extract::State;
use findash_core::{category_breakdown, monthly_summary, summary};

/// Get snapshot totals (JSON API)
pub async fn api_summary(state: State<AppState>) -> String {
    let transactions = state.store.all();
    serde_json::to_string(&summary(&transactions)).unwrap_or_default()
}

/// Get monthly income/expense rows (JSON API)
pub async fn api_monthly_report(state: State<AppState>) -> String {
    let transactions = state.store.all();
    serde_json::to_string(&monthly_summary(&transactions)).unwrap_or_default()
}

/// Get per-category expense rows (JSON API)
pub async fn api_category_report(state: State<AppState>) -> String {
    let transactions = state.store.all();
    serde_json::to_string(&category_breakdown(&transactions)).unwrap_or_default()
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use findash_client::test_client::InMemoryTransactionsApi;
    use findash_config::Config;
    use findash_core::{BudgetGoal, Transaction, TransactionKind, TransactionStore};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn tx(date: &str, kind: TransactionKind, category: &str, amount: f64) -> Transaction {
        Transaction {
            id: None,
            date: date.to_string(),
            description: String::new(),
            category: category.to_string(),
            merchant: String::new(),
            amount,
            kind,
            payment_method: None,
            notes: None,
        }
    }

    fn state_with(transactions: Vec<Transaction>) -> AppState {
        let store = Arc::new(TransactionStore::new());
        store.replace_all(transactions);
        AppState {
            store,
            client: Arc::new(InMemoryTransactionsApi::new()),
            budget: Arc::new(RwLock::new(BudgetGoal::default())),
            config: Config::default(),
        }
    }

    #[tokio::test]
    async fn test_monthly_report_shape() {
        let state = state_with(vec![
            tx("2025-01-05", TransactionKind::Income, "Income", 3000.0),
            tx("2025-01-10", TransactionKind::Expense, "Bills & Utilities", 400.0),
        ]);
        let body = api_monthly_report(State(state)).await;
        let rows: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(rows[0]["month"], "2025-01");
        assert_eq!(rows[0]["income"], 3000.0);
        assert_eq!(rows[0]["expenses"], 400.0);
    }

    #[tokio::test]
    async fn test_category_report_excludes_income() {
        let state = state_with(vec![
            tx("2025-01-05", TransactionKind::Income, "Income", 3000.0),
            tx("2025-01-10", TransactionKind::Expense, "Shopping", 90.0),
        ]);
        let body = api_category_report(State(state)).await;
        let rows: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 1);
        assert_eq!(rows[0]["category"], "Shopping");
    }

    #[tokio::test]
    async fn test_summary_totals() {
        let state = state_with(vec![
            tx("2025-01-05", TransactionKind::Income, "Income", 3000.0),
            tx("2025-01-10", TransactionKind::Expense, "Shopping", 400.0),
        ]);
        let body = api_summary(State(state)).await;
        let report: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(report["balance"], 2600.0);
        assert_eq!(report["balance_display"], "$2,600.00");
    }
}
