//! Core transaction model and in-memory snapshot store
//!
//! The backend REST API owns the data; this crate holds a read-only
//! snapshot of it and derives views (monthly summaries, category
//! breakdowns, filtered subsets, running totals) on demand. Nothing
//! here mutates a transaction and nothing is cached: every derived
//! view is recomputed from the current snapshot.

pub mod aggregate;
pub mod budget;
pub mod reports;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

pub use aggregate::{
    category_breakdown, filter_transactions, format_usd, monthly_summary, parse_amount,
    running_total, summary, CategoryFilter, KindFilter, TransactionFilter,
};
pub use budget::{budget_report, BudgetGoal, BudgetReport, BudgetRow, CategoryBudget};
pub use reports::{CategoryRow, MonthlyRow, SummaryReport, TransactionsResponse};

/// Transaction direction
///
/// Normalized once at ingestion; the wire value is matched
/// case-insensitively and anything unrecognized becomes `Unknown`
/// rather than failing the whole payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionKind {
    /// Money in; adds to the running total
    Income,
    /// Money out; subtracts from the running total
    Expense,
    /// Unrecognized wire value; contributes nothing to the running total
    Unknown,
}

impl TransactionKind {
    /// Normalize a wire value ("income", "Expense", ...) to a kind
    pub fn normalize(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "income" => TransactionKind::Income,
            "expense" => TransactionKind::Expense,
            _ => TransactionKind::Unknown,
        }
    }
}

impl Default for TransactionKind {
    fn default() -> Self {
        TransactionKind::Unknown
    }
}

impl From<String> for TransactionKind {
    fn from(s: String) -> Self {
        TransactionKind::normalize(&s)
    }
}

impl From<TransactionKind> for String {
    fn from(kind: TransactionKind) -> Self {
        kind.to_string()
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "Income"),
            TransactionKind::Expense => write!(f, "Expense"),
            TransactionKind::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A single income or expense record, as served by the backend
///
/// `amount` is always a non-negative magnitude; direction comes solely
/// from `kind` (wire name `type`). `category` is free text with a
/// recognized-value hint in the UI, not a closed enumeration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Backend identifier; absent on create payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Calendar date, ISO `YYYY-MM-DD` expected but not guaranteed
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub merchant: String,
    /// Non-negative magnitude; sign is implied by `kind`
    #[serde(default, deserialize_with = "de_lenient_amount")]
    pub amount: f64,
    #[serde(rename = "type", default)]
    pub kind: TransactionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Transaction {
    /// Get the transaction date as NaiveDate, if well-formed
    pub fn date_naive(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Calendar month bucket (`YYYY-MM`), or `"unknown"` when the date
    /// is absent or does not start with a plausible year-month prefix
    pub fn month_key(&self) -> String {
        let bytes = self.date.as_bytes();
        let plausible = bytes.len() >= 7
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[4] == b'-'
            && bytes[5..7].iter().all(u8::is_ascii_digit);
        if plausible {
            self.date[..7].to_string()
        } else {
            "unknown".to_string()
        }
    }

    /// Display form of the amount, used by the free-text search
    pub fn amount_display(&self) -> String {
        format!("{}", self.amount)
    }
}

/// Lenient amount ingestion: JSON numbers pass through, strings are
/// stripped to digits/`.`/`-` and parsed, anything else coerces to 0.
fn de_lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
        Other(serde_json::Value),
    }

    Ok(match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(n) => n,
        RawAmount::Text(s) => aggregate::parse_amount(&s),
        RawAmount::Other(_) => 0.0,
    })
}

/// In-memory snapshot of the backend's transaction list
///
/// The snapshot is replaced wholesale after every successful fetch
/// (re-fetch-on-write); readers clone out and derive views with the
/// pure functions in [`aggregate`].
#[derive(Debug, Default)]
pub struct TransactionStore {
    data: RwLock<Vec<Transaction>>,
}

impl TransactionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire snapshot with a freshly fetched list
    pub fn replace_all(&self, transactions: Vec<Transaction>) {
        let mut data = self.data.write().unwrap();
        *data = transactions;
    }

    /// Get a copy of the current snapshot
    pub fn all(&self) -> Vec<Transaction> {
        self.data.read().unwrap().clone()
    }

    /// Get total transaction count
    pub fn count(&self) -> usize {
        self.data.read().unwrap().len()
    }

    /// Get transaction by backend id
    pub fn transaction(&self, id: i64) -> Option<Transaction> {
        let data = self.data.read().unwrap();
        data.iter().find(|t| t.id == Some(id)).cloned()
    }

    /// Most recent transactions first (parsed date descending,
    /// undated/malformed entries last, snapshot order preserved
    /// within a day)
    pub fn recent(&self, limit: usize) -> Vec<Transaction> {
        let mut transactions = self.all();
        transactions.sort_by(|a, b| {
            b.date_naive()
                .cmp(&a.date_naive())
                .then_with(|| b.date.cmp(&a.date))
        });
        transactions.truncate(limit);
        transactions
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(date: &str, kind: TransactionKind, amount: f64) -> Transaction {
        Transaction {
            id: None,
            date: date.to_string(),
            description: String::new(),
            category: String::new(),
            merchant: String::new(),
            amount,
            kind,
            payment_method: None,
            notes: None,
        }
    }

    #[test]
    fn test_kind_normalize_case_insensitive() {
        assert_eq!(TransactionKind::normalize("Income"), TransactionKind::Income);
        assert_eq!(TransactionKind::normalize("income"), TransactionKind::Income);
        assert_eq!(TransactionKind::normalize("EXPENSE"), TransactionKind::Expense);
        assert_eq!(TransactionKind::normalize("transfer"), TransactionKind::Unknown);
        assert_eq!(TransactionKind::normalize(""), TransactionKind::Unknown);
    }

    #[test]
    fn test_month_key() {
        assert_eq!(tx("2025-01-05", TransactionKind::Income, 1.0).month_key(), "2025-01");
        assert_eq!(tx("2025-01", TransactionKind::Income, 1.0).month_key(), "unknown");
        assert_eq!(tx("", TransactionKind::Income, 1.0).month_key(), "unknown");
        assert_eq!(tx("not a date", TransactionKind::Income, 1.0).month_key(), "unknown");
        // Day part is not validated; the bucket only needs YYYY-MM
        assert_eq!(tx("2025-07-xx", TransactionKind::Income, 1.0).month_key(), "2025-07");
    }

    #[test]
    fn test_deserialize_wire_shape() {
        let json = r#"{
            "id": 3,
            "date": "2025-10-03",
            "description": "Groceries at Whole Foods",
            "category": "Food & Dining",
            "merchant": "Whole Foods",
            "amount": 152.47,
            "type": "Expense",
            "paymentMethod": "Credit Card",
            "notes": "Weekly groceries"
        }"#;
        let t: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(t.id, Some(3));
        assert_eq!(t.kind, TransactionKind::Expense);
        assert_eq!(t.amount, 152.47);
        assert_eq!(t.payment_method.as_deref(), Some("Credit Card"));
    }

    #[test]
    fn test_deserialize_lenient_amount() {
        let t: Transaction =
            serde_json::from_str(r#"{"date":"2025-01-01","type":"Expense","amount":"$45.50"}"#)
                .unwrap();
        assert_eq!(t.amount, 45.50);

        let t: Transaction =
            serde_json::from_str(r#"{"date":"2025-01-01","type":"Expense","amount":"abc"}"#)
                .unwrap();
        assert_eq!(t.amount, 0.0);

        let t: Transaction =
            serde_json::from_str(r#"{"date":"2025-01-01","type":"Expense","amount":null}"#)
                .unwrap();
        assert_eq!(t.amount, 0.0);
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let mut t = tx("2025-01-01", TransactionKind::Income, 10.0);
        t.payment_method = Some("Cash".to_string());
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["type"], "Income");
        assert_eq!(json["paymentMethod"], "Cash");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_store_replace_and_lookup() {
        let store = TransactionStore::new();
        assert_eq!(store.count(), 0);

        let mut a = tx("2025-01-05", TransactionKind::Income, 3000.0);
        a.id = Some(1);
        let mut b = tx("2025-01-10", TransactionKind::Expense, 400.0);
        b.id = Some(2);
        store.replace_all(vec![a, b]);

        assert_eq!(store.count(), 2);
        assert_eq!(store.transaction(2).unwrap().amount, 400.0);
        assert!(store.transaction(99).is_none());

        store.replace_all(Vec::new());
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_date_naive() {
        assert!(tx("2025-01-05", TransactionKind::Income, 1.0).date_naive().is_some());
        assert!(tx("2025-13-05", TransactionKind::Income, 1.0).date_naive().is_none());
        assert!(tx("", TransactionKind::Income, 1.0).date_naive().is_none());
    }

    #[test]
    fn test_store_recent_orders_descending() {
        let store = TransactionStore::new();
        store.replace_all(vec![
            tx("2025-01-05", TransactionKind::Income, 1.0),
            tx("2025-03-01", TransactionKind::Expense, 2.0),
            tx("2025-02-10", TransactionKind::Expense, 3.0),
        ]);
        let recent = store.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].date, "2025-03-01");
        assert_eq!(recent[1].date, "2025-02-10");
    }

    #[test]
    fn test_store_recent_puts_malformed_dates_last() {
        let store = TransactionStore::new();
        store.replace_all(vec![
            tx("not a date", TransactionKind::Expense, 1.0),
            tx("2025-01-05", TransactionKind::Income, 2.0),
            tx("2025-02-10", TransactionKind::Expense, 3.0),
        ]);
        let recent = store.recent(3);
        assert_eq!(recent[0].date, "2025-02-10");
        assert_eq!(recent[1].date, "2025-01-05");
        assert_eq!(recent[2].date, "not a date");
    }
}
