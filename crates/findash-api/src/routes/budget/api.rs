//! Budget API endpoints
//!
//! Endpoints:
//! - api_budget: Current goal plus the budget-vs-actual report
//! - api_budget_update: Replace the goal

use crate::{ApiError, AppState};
use axum::extract::State;
use axum::Json;
use findash_core::{budget_report, BudgetGoal};

/// Get the current budget goal and its report (JSON API)
pub async fn api_budget(state: State<AppState>) -> String {
    let goal = state.budget.read().await.clone();
    let transactions = state.store.all();
    let report = budget_report(&goal, &transactions);
    serde_json::to_string(&serde_json::json!({ "goal": goal, "report": report }))
        .unwrap_or_default()
}

/// Replace the budget goal (JSON API)
pub async fn api_budget_update(
    state: State<AppState>,
    Json(goal): Json<BudgetGoal>,
) -> Result<Json<BudgetGoal>, ApiError> {
    if goal.savings_goal < 0.0 || goal.monthly_income < 0.0 {
        return Err(ApiError::BadRequest {
            message: "Goal amounts cannot be negative".to_string(),
        });
    }
    if goal.category_budgets.iter().any(|cb| cb.limit < 0.0) {
        return Err(ApiError::BadRequest {
            message: "Category limits cannot be negative".to_string(),
        });
    }

    let mut current = state.budget.write().await;
    *current = goal.clone();
    log::info!("Budget goal updated: savings_goal={}", goal.savings_goal);
    Ok(Json(goal))
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use findash_client::test_client::InMemoryTransactionsApi;
    use findash_config::Config;
    use findash_core::TransactionStore;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn empty_state() -> AppState {
        AppState {
            store: Arc::new(TransactionStore::new()),
            client: Arc::new(InMemoryTransactionsApi::new()),
            budget: Arc::new(RwLock::new(BudgetGoal::default())),
            config: Config::default(),
        }
    }

    #[tokio::test]
    async fn test_budget_roundtrip() {
        let state = empty_state();

        let mut goal = BudgetGoal::default();
        goal.savings_goal = 700.0;
        goal.saving_purpose = "Vacation".to_string();
        api_budget_update(State(state.clone()), Json(goal)).await.unwrap();

        let body = api_budget(State(state)).await;
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["goal"]["savingsGoal"], 700.0);
        assert_eq!(value["report"]["savings_progress"], 0.0);
    }

    #[tokio::test]
    async fn test_budget_update_rejects_negative() {
        let state = empty_state();
        let mut goal = BudgetGoal::default();
        goal.savings_goal = -5.0;
        let err = api_budget_update(State(state), Json(goal)).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest { .. }));
    }
}
