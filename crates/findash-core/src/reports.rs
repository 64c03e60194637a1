//! Report structures for API responses

use serde::{Deserialize, Serialize};

use super::Transaction;

/// One month's income/expense totals for the monthly chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRow {
    pub month: String,
    pub income: f64,
    pub expenses: f64,
}

/// One category's summed expenses for the category chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub category: String,
    pub value: f64,
}

/// Snapshot-wide totals for the dashboard cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
    pub balance_display: String,
    pub transaction_count: usize,
}

/// Transactions list response for API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
    pub total_count: usize,
    /// Signed total over the listed transactions, display form
    pub total: String,
}
