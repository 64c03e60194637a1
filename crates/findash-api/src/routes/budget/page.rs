//! Budget page rendering - goal form and budget-vs-actual rows

use crate::{page_response, AppState};
use findash_core::{budget_report, format_usd};

/// Budget goals page
pub async fn page_budget(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let goal = state.budget.read().await.clone();
    let transactions = state.store.all();
    let report = budget_report(&goal, &transactions);

    let mut limit_inputs = String::new();
    for cb in &goal.category_budgets {
        limit_inputs.push_str(&format!(
            r#"<div class='flex items-center justify-between gap-3 py-1'>
                <label class='text-sm text-gray-700'>{}</label>
                <input type='number' min='0' step='0.01' value='{}' data-category='{}'
                    class='limit-input w-28 px-2 py-1 text-sm border rounded text-right'>
            </div>"#,
            cb.category, cb.limit, cb.category
        ));
    }

    let mut rows_html = String::new();
    for row in &report.rows {
        let status = if row.over_budget {
            "<span class='text-xs text-red-600 font-medium'>over budget</span>"
        } else {
            ""
        };
        let width = if row.limit > 0.0 {
            (row.spent / row.limit * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        let bar_color = if row.over_budget { "bg-red-500" } else { "bg-indigo-500" };
        rows_html.push_str(&format!(
            r#"<div class='mb-3'>
                <div class='flex justify-between text-sm mb-1'>
                    <span class='font-medium'>{} {}</span>
                    <span class='text-gray-500'>{} of {}</span>
                </div>
                <div class='h-2 bg-gray-100 rounded'><div class='h-2 {} rounded' style='width:{:.1}%'></div></div>
            </div>"#,
            row.category,
            status,
            format_usd(row.spent),
            format_usd(row.limit),
            bar_color,
            width
        ));
    }

    let inner_content = format!(
        r#"<h2 class='text-2xl font-bold mb-1'>Budget Goals</h2>
        <p class='text-gray-600 mb-4'>Set your financial targets and track your progress</p>
        <div class='grid grid-cols-1 lg:grid-cols-2 gap-4'>
            <div class='bg-white rounded-xl shadow-sm p-6'>
                <h3 class='font-bold mb-3'>Savings Goal</h3>
                <div class='space-y-3'>
                    <div>
                        <label class='text-sm text-gray-700 block mb-1'>Monthly Income ($)</label>
                        <input id='goal-income' type='number' min='0' step='0.01' value='{}' class='w-full px-3 py-2 border rounded-lg'>
                    </div>
                    <div>
                        <label class='text-sm text-gray-700 block mb-1'>Monthly Savings Goal ($)</label>
                        <input id='goal-savings' type='number' min='0' step='0.01' value='{}' class='w-full px-3 py-2 border rounded-lg'>
                    </div>
                    <div>
                        <label class='text-sm text-gray-700 block mb-1'>Target Date</label>
                        <input id='goal-date' type='date' value='{}' class='w-full px-3 py-2 border rounded-lg'>
                    </div>
                    <div>
                        <label class='text-sm text-gray-700 block mb-1'>Saving For</label>
                        <input id='goal-purpose' type='text' value='{}' placeholder='e.g. Vacation' class='w-full px-3 py-2 border rounded-lg'>
                    </div>
                    <div class='pt-2 border-t'>
                        <p class='text-sm font-medium text-gray-700 mb-1'>Category Limits</p>
                        {}
                    </div>
                    <button onclick='saveGoal()' class='w-full px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Save Goals</button>
                </div>
            </div>
            <div class='space-y-4'>
                <div class='bg-white rounded-xl shadow-sm p-6'>
                    <h3 class='font-bold mb-2'>Savings Progress</h3>
                    <p class='text-sm text-gray-500 mb-2'>Saved {} of {}</p>
                    <div class='h-3 bg-gray-100 rounded'><div class='h-3 bg-green-500 rounded' style='width:{:.1}%'></div></div>
                    <p class='text-right text-sm text-gray-500 mt-1'>{:.0}%</p>
                </div>
                <div class='bg-white rounded-xl shadow-sm p-6'>
                    <h3 class='font-bold mb-4'>Spending vs Limits</h3>
                    {}
                </div>
            </div>
        </div>
        <script>
        function saveGoal() {{
            const categoryBudgets = Array.from(document.querySelectorAll('.limit-input')).map(i => ({{
                category: i.dataset.category,
                limit: Number(i.value) || 0
            }}));
            const body = {{
                monthlyIncome: Number(document.getElementById('goal-income').value) || 0,
                savingsGoal: Number(document.getElementById('goal-savings').value) || 0,
                targetDate: document.getElementById('goal-date').value,
                savingPurpose: document.getElementById('goal-purpose').value,
                categoryBudgets: categoryBudgets
            }};
            fetch('/api/budget', {{
                method: 'PUT',
                headers: {{'Content-Type': 'application/json'}},
                body: JSON.stringify(body)
            }})
                .then(r => {{
                    if (!r.ok) throw new Error('Save failed');
                    window.location.reload();
                }})
                .catch(e => alert(e.message));
        }}
        </script>"#,
        goal.monthly_income,
        goal.savings_goal,
        goal.target_date,
        goal.saving_purpose,
        limit_inputs,
        report.saved_display,
        format_usd(report.savings_goal),
        report.savings_progress,
        report.savings_progress,
        rows_html
    );

    axum::response::Html(page_response(&headers, "Budget Goals", "/budget", &inner_content))
}
