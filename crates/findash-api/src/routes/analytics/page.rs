//! Analytics page rendering - monthly trend and category breakdown
//!
//! Charts are rendered server-side as proportional bars; widths are
//! scaled against the largest value in each report.

use crate::{page_response, AppState};
use findash_core::{category_breakdown, format_usd, monthly_summary, summary};

fn bar_width(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        (value / max * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Analytics page with monthly and category reports
pub async fn page_analytics(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let transactions = state.store.all();
    let totals = summary(&transactions);
    let monthly = monthly_summary(&transactions);
    let categories = category_breakdown(&transactions);

    let monthly_max = monthly
        .iter()
        .flat_map(|r| [r.income, r.expenses])
        .fold(0.0_f64, f64::max);

    let mut monthly_html = String::new();
    if monthly.is_empty() {
        monthly_html.push_str("<p class='text-gray-500 text-center py-8'>No data</p>");
    } else {
        for row in &monthly {
            monthly_html.push_str(&format!(
                r#"<div class='mb-3'>
                    <div class='flex justify-between text-sm mb-1'>
                        <span class='font-medium'>{}</span>
                        <span class='text-gray-500'>{} in / {} out</span>
                    </div>
                    <div class='h-2 bg-gray-100 rounded mb-1'><div class='h-2 bg-green-500 rounded' style='width:{:.1}%'></div></div>
                    <div class='h-2 bg-gray-100 rounded'><div class='h-2 bg-red-400 rounded' style='width:{:.1}%'></div></div>
                </div>"#,
                row.month,
                format_usd(row.income),
                format_usd(row.expenses),
                bar_width(row.income, monthly_max),
                bar_width(row.expenses, monthly_max)
            ));
        }
    }

    let category_max = categories.iter().map(|r| r.value).fold(0.0_f64, f64::max);
    let mut category_html = String::new();
    if categories.is_empty() {
        category_html.push_str("<p class='text-gray-500 text-center py-8'>No expenses yet</p>");
    } else {
        for row in &categories {
            let share = if totals.total_expenses > 0.0 {
                row.value / totals.total_expenses * 100.0
            } else {
                0.0
            };
            category_html.push_str(&format!(
                r#"<div class='mb-3'>
                    <div class='flex justify-between text-sm mb-1'>
                        <span class='font-medium'>{}</span>
                        <span class='text-gray-500'>{} ({:.1}%)</span>
                    </div>
                    <div class='h-2 bg-gray-100 rounded'><div class='h-2 bg-indigo-500 rounded' style='width:{:.1}%'></div></div>
                </div>"#,
                row.category,
                format_usd(row.value),
                share,
                bar_width(row.value, category_max)
            ));
        }
    }

    let inner_content = format!(
        r#"<h2 class='text-2xl font-bold mb-4'>Analytics</h2>
        <div class='grid grid-cols-1 md:grid-cols-3 gap-4 mb-6'>
            <div class='bg-white p-4 rounded-xl shadow-sm'><p class='text-sm text-gray-500'>Total Income</p><p class='text-2xl font-bold text-green-600'>{}</p></div>
            <div class='bg-white p-4 rounded-xl shadow-sm'><p class='text-sm text-gray-500'>Total Expenses</p><p class='text-2xl font-bold text-red-600'>{}</p></div>
            <div class='bg-white p-4 rounded-xl shadow-sm'><p class='text-sm text-gray-500'>Balance</p><p class='text-2xl font-bold'>{}</p></div>
        </div>
        <div class='grid grid-cols-1 lg:grid-cols-2 gap-4'>
            <div class='bg-white rounded-xl shadow-sm p-6'>
                <h3 class='font-bold mb-4'>Income vs Expenses by Month</h3>
                {}
            </div>
            <div class='bg-white rounded-xl shadow-sm p-6'>
                <h3 class='font-bold mb-4'>Expenses by Category</h3>
                {}
            </div>
        </div>"#,
        format_usd(totals.total_income),
        format_usd(totals.total_expenses),
        totals.balance_display,
        monthly_html,
        category_html
    );

    axum::response::Html(page_response(
        &headers,
        "Analytics",
        "/analytics",
        &inner_content,
    ))
}
