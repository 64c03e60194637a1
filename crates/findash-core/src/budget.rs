//! Budget goals and budget-vs-actual reporting

use crate::aggregate::{category_breakdown, format_usd, summary};
use crate::Transaction;
use serde::{Deserialize, Serialize};

/// Per-category spending limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBudget {
    pub category: String,
    pub limit: f64,
}

/// User-set financial targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetGoal {
    pub monthly_income: f64,
    pub savings_goal: f64,
    pub target_date: String,
    pub saving_purpose: String,
    pub category_budgets: Vec<CategoryBudget>,
}

impl Default for BudgetGoal {
    fn default() -> Self {
        let categories = [
            "Shopping",
            "Food & Dining",
            "Entertainment",
            "Transportation",
            "Education",
            "Healthcare",
            "Bills & Utilities",
        ];
        BudgetGoal {
            monthly_income: 0.0,
            savings_goal: 0.0,
            target_date: String::new(),
            saving_purpose: String::new(),
            category_budgets: categories
                .iter()
                .map(|c| CategoryBudget {
                    category: c.to_string(),
                    limit: 0.0,
                })
                .collect(),
        }
    }
}

/// One budget row: the set limit against actual expense spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRow {
    pub category: String,
    pub limit: f64,
    pub spent: f64,
    pub over_budget: bool,
}

/// Budget-vs-actual report for the budget page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetReport {
    pub savings_goal: f64,
    pub saved: f64,
    pub saved_display: String,
    /// Percentage of the savings goal reached, clamped to 0..=100
    pub savings_progress: f64,
    pub saving_purpose: String,
    pub target_date: String,
    pub rows: Vec<BudgetRow>,
}

/// Compare a budget goal against actual spending in the snapshot
///
/// "Saved" is income minus expenses over the whole snapshot; a zero
/// savings goal reports 0% progress rather than dividing by zero.
/// Rows keep the goal's category order; categories with spending but
/// no configured limit are not added.
pub fn budget_report(goal: &BudgetGoal, transactions: &[Transaction]) -> BudgetReport {
    let totals = summary(transactions);
    let breakdown = category_breakdown(transactions);

    let saved = totals.balance;
    let savings_progress = if goal.savings_goal > 0.0 {
        (saved / goal.savings_goal * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    let rows = goal
        .category_budgets
        .iter()
        .map(|cb| {
            let spent = breakdown
                .iter()
                .find(|row| row.category == cb.category)
                .map(|row| row.value)
                .unwrap_or(0.0);
            BudgetRow {
                category: cb.category.clone(),
                limit: cb.limit,
                spent,
                over_budget: cb.limit > 0.0 && spent > cb.limit,
            }
        })
        .collect();

    BudgetReport {
        savings_goal: goal.savings_goal,
        saved,
        saved_display: format_usd(saved),
        savings_progress,
        saving_purpose: goal.saving_purpose.clone(),
        target_date: goal.target_date.clone(),
        rows,
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TransactionKind;

    fn tx(kind: TransactionKind, category: &str, amount: f64) -> Transaction {
        Transaction {
            id: None,
            date: "2025-10-01".to_string(),
            description: String::new(),
            category: category.to_string(),
            merchant: String::new(),
            amount,
            kind,
            payment_method: None,
            notes: None,
        }
    }

    #[test]
    fn test_default_goal_has_seven_zeroed_categories() {
        let goal = BudgetGoal::default();
        assert_eq!(goal.category_budgets.len(), 7);
        assert!(goal.category_budgets.iter().all(|cb| cb.limit == 0.0));
        assert_eq!(goal.category_budgets[0].category, "Shopping");
    }

    #[test]
    fn test_goal_wire_shape() {
        let json = r#"{
            "monthlyIncome": 3500,
            "savingsGoal": 700,
            "targetDate": "2025-12-31",
            "savingPurpose": "Vacation",
            "categoryBudgets": [{"category": "Shopping", "limit": 150}]
        }"#;
        let goal: BudgetGoal = serde_json::from_str(json).unwrap();
        assert_eq!(goal.monthly_income, 3500.0);
        assert_eq!(goal.savings_goal, 700.0);
        assert_eq!(goal.category_budgets.len(), 1);
        assert_eq!(goal.category_budgets[0].limit, 150.0);
    }

    #[test]
    fn test_budget_report_progress_and_overspend() {
        let mut goal = BudgetGoal::default();
        goal.savings_goal = 700.0;
        goal.category_budgets = vec![
            CategoryBudget {
                category: "Shopping".to_string(),
                limit: 100.0,
            },
            CategoryBudget {
                category: "Food & Dining".to_string(),
                limit: 300.0,
            },
        ];
        let txns = vec![
            tx(TransactionKind::Income, "Income", 1000.0),
            tx(TransactionKind::Expense, "Shopping", 150.0),
            tx(TransactionKind::Expense, "Food & Dining", 200.0),
        ];

        let report = budget_report(&goal, &txns);
        assert_eq!(report.saved, 650.0);
        assert!((report.savings_progress - 650.0 / 700.0 * 100.0).abs() < 1e-9);
        assert_eq!(report.rows.len(), 2);
        assert!(report.rows[0].over_budget);
        assert_eq!(report.rows[0].spent, 150.0);
        assert!(!report.rows[1].over_budget);
    }

    #[test]
    fn test_budget_report_progress_is_clamped() {
        let mut goal = BudgetGoal::default();
        goal.savings_goal = 100.0;

        let flush = vec![tx(TransactionKind::Income, "Income", 5000.0)];
        assert_eq!(budget_report(&goal, &flush).savings_progress, 100.0);

        let broke = vec![tx(TransactionKind::Expense, "Shopping", 5000.0)];
        assert_eq!(budget_report(&goal, &broke).savings_progress, 0.0);
    }

    #[test]
    fn test_budget_report_zero_goal_avoids_division() {
        let goal = BudgetGoal::default();
        let txns = vec![tx(TransactionKind::Income, "Income", 1000.0)];
        let report = budget_report(&goal, &txns);
        assert_eq!(report.savings_progress, 0.0);
        assert_eq!(report.saved_display, "$1,000.00");
    }

    #[test]
    fn test_unbudgeted_limit_never_flags_overspend() {
        let goal = BudgetGoal::default(); // all limits zero
        let txns = vec![tx(TransactionKind::Expense, "Shopping", 999.0)];
        let report = budget_report(&goal, &txns);
        let shopping = report.rows.iter().find(|r| r.category == "Shopping").unwrap();
        assert_eq!(shopping.spent, 999.0);
        assert!(!shopping.over_budget);
    }
}
