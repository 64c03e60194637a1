//! Pure aggregation and filtering over a transaction snapshot
//!
//! All transforms are stateless: they take a slice, produce a derived
//! view, and never mutate or cache. Amount handling is lenient;
//! malformed numbers coerce to 0 instead of failing the whole view.

use crate::reports::{CategoryRow, MonthlyRow, SummaryReport};
use crate::{Transaction, TransactionKind};
use format_num::format_num;
use std::collections::{BTreeMap, HashMap};

/// Category label applied when a transaction has a blank category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Parse an amount string leniently: strip everything except digits,
/// `.` and `-`, then parse as a decimal. Unparseable input yields 0.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse::<f64>().unwrap_or(0.0)
}

/// Format a value as US-locale currency, e.g. `$2,600.00` / `-$400.00`
pub fn format_usd(value: f64) -> String {
    let magnitude = format_num!(",.2f", value.abs());
    if value < 0.0 {
        format!("-${}", magnitude)
    } else {
        format!("${}", magnitude)
    }
}

/// Group transactions by calendar month and sum income/expense columns
///
/// One row per distinct month key, ascending lexicographically (which
/// is chronological for well-formed `YYYY-MM` keys, with the
/// `"unknown"` bucket sorting last). Months with no transactions are
/// absent; gaps are not zero-filled.
pub fn monthly_summary(transactions: &[Transaction]) -> Vec<MonthlyRow> {
    let mut months: BTreeMap<String, (f64, f64)> = BTreeMap::new();

    for t in transactions {
        let entry = months.entry(t.month_key()).or_insert((0.0, 0.0));
        match t.kind {
            TransactionKind::Income => entry.0 += t.amount,
            // Expense and anything unrecognized land in the expense column
            _ => entry.1 += t.amount,
        }
    }

    months
        .into_iter()
        .map(|(month, (income, expenses))| MonthlyRow {
            month,
            income,
            expenses,
        })
        .collect()
}

/// Sum expense amounts per category, largest first
///
/// Income-kind transactions are excluded entirely. Blank categories
/// collapse into [`UNCATEGORIZED`]. Ties keep first-encounter order
/// (stable sort over insertion order).
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryRow> {
    let mut rows: Vec<CategoryRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for t in transactions {
        if t.kind != TransactionKind::Expense {
            continue;
        }
        let category = if t.category.trim().is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            t.category.clone()
        };
        match index.get(&category) {
            Some(&i) => rows[i].value += t.amount,
            None => {
                index.insert(category.clone(), rows.len());
                rows.push(CategoryRow {
                    category,
                    value: t.amount,
                });
            }
        }
    }

    rows.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));
    rows
}

/// Type predicate choices, matching the UI dropdown labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    AllTypes,
    Expenses,
    Income,
}

impl KindFilter {
    /// Parse a dropdown label; anything unrecognized means no filter
    pub fn from_label(label: &str) -> Self {
        match label {
            "Expenses" => KindFilter::Expenses,
            "Income" => KindFilter::Income,
            _ => KindFilter::AllTypes,
        }
    }

    fn matches(&self, kind: TransactionKind) -> bool {
        match self {
            KindFilter::AllTypes => true,
            KindFilter::Expenses => kind == TransactionKind::Expense,
            KindFilter::Income => kind == TransactionKind::Income,
        }
    }
}

/// Category predicate: everything, or an exact string match
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Parse a dropdown label; "All Categories" or blank means no filter
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "" | "All Categories" => CategoryFilter::All,
            name => CategoryFilter::Named(name.to_string()),
        }
    }

    fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => category == name,
        }
    }
}

/// Combined multi-predicate filter (type AND category AND search)
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: KindFilter,
    pub category: CategoryFilter,
    pub query: String,
}

impl TransactionFilter {
    /// True when the transaction satisfies all three predicates
    pub fn matches(&self, t: &Transaction) -> bool {
        if !self.kind.matches(t.kind) {
            return false;
        }
        if !self.category.matches(&t.category) {
            return false;
        }
        self.matches_query(t)
    }

    /// Free-text predicate: case-insensitive over the text fields,
    /// raw substring over the date and the amount's display form
    fn matches_query(&self, t: &Transaction) -> bool {
        let query = self.query.trim();
        if query.is_empty() {
            return true;
        }
        let query_lower = query.to_lowercase();
        t.description.to_lowercase().contains(&query_lower)
            || t.category.to_lowercase().contains(&query_lower)
            || t.merchant.to_lowercase().contains(&query_lower)
            || t.kind.to_string().to_lowercase().contains(&query_lower)
            || t.date.contains(query)
            || t.amount_display().contains(query)
    }
}

/// Stable filter: keeps the input order, clones the survivors
pub fn filter_transactions(transactions: &[Transaction], filter: &TransactionFilter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| filter.matches(t))
        .cloned()
        .collect()
}

/// Signed total over a (typically filtered) sequence: income adds,
/// expense subtracts, unrecognized kinds contribute nothing
pub fn running_total(transactions: &[Transaction]) -> f64 {
    transactions.iter().fold(0.0, |sum, t| match t.kind {
        TransactionKind::Income => sum + t.amount,
        TransactionKind::Expense => sum - t.amount,
        TransactionKind::Unknown => sum,
    })
}

/// Snapshot-wide totals for the dashboard cards and `/api/summary`
pub fn summary(transactions: &[Transaction]) -> SummaryReport {
    let total_income: f64 = transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Income)
        .map(|t| t.amount)
        .sum();
    let total_expenses: f64 = transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense)
        .map(|t| t.amount)
        .sum();
    let balance = total_income - total_expenses;

    SummaryReport {
        total_income,
        total_expenses,
        balance,
        balance_display: format_usd(balance),
        transaction_count: transactions.len(),
    }
}

// ==================== Tests ====================
