//! Transactions page rendering - Full page endpoints
//!
//! The filter controls re-query `/transactions/list` via HTMX; the
//! add-transaction form posts JSON to the backend-backed API.

use crate::{page_response, AppState};
use findash_core::summary;

/// Transactions page with filter controls and an add form
pub async fn page_transactions(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let transactions = state.store.all();
    let totals = summary(&transactions);

    let mut form_categories = String::new();
    for category in &state.config.categories.expense {
        form_categories.push_str(&format!("<option>{}</option>", category));
    }
    let filter_categories = format!("<option>All Categories</option>{}", form_categories);

    let inner_content = format!(
        r#"<div class='flex items-center justify-between mb-4'>
            <h2 class='text-2xl font-bold'>Transactions</h2>
            <button onclick='document.getElementById("add-form").classList.toggle("hidden")'
                class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>+ Add Transaction</button>
        </div>
        <div class='grid grid-cols-2 md:grid-cols-3 gap-3 mb-4'>
            <div class='bg-green-50 p-3 rounded-lg border border-green-100'><p class='text-xs text-green-600'>Income</p><p class='text-xl font-bold'>{}</p></div>
            <div class='bg-red-50 p-3 rounded-lg border border-red-100'><p class='text-xs text-red-600'>Expenses</p><p class='text-xl font-bold'>{}</p></div>
            <div class='bg-indigo-50 p-3 rounded-lg border border-indigo-100'><p class='text-xs text-indigo-600'>Balance</p><p class='text-xl font-bold'>{}</p></div>
        </div>
        <div id='add-form' class='hidden bg-white rounded-xl shadow-sm p-6 mb-4'>
            <h3 class='font-bold mb-3'>New Transaction</h3>
            <div class='grid grid-cols-2 md:grid-cols-3 gap-3'>
                <input id='new-date' type='date' class='px-3 py-2 border rounded-lg'>
                <input id='new-description' type='text' placeholder='Description' class='px-3 py-2 border rounded-lg'>
                <input id='new-merchant' type='text' placeholder='Merchant' class='px-3 py-2 border rounded-lg'>
                <select id='new-type' class='px-3 py-2 border rounded-lg bg-white'>
                    <option value='expense'>Expense</option>
                    <option value='income'>Income</option>
                </select>
                <select id='new-category' class='px-3 py-2 border rounded-lg bg-white'>{}</select>
                <input id='new-amount' type='text' placeholder='Amount' class='px-3 py-2 border rounded-lg'>
            </div>
            <button onclick='submitTransaction()' class='mt-3 px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Save</button>
        </div>
        <div class='flex gap-2 mb-4'>
            <input type='text' name='q' placeholder='Search...'
                hx-get='/transactions/list' hx-target='#transactions-content'
                hx-trigger='keyup changed delay:500ms' hx-include='[name="type"],[name="category"]'
                class='px-4 py-2 border rounded-lg flex-1'>
            <select name='type' hx-get='/transactions/list' hx-target='#transactions-content'
                hx-trigger='change' hx-include='[name="q"],[name="category"]'
                class='px-4 py-2 border rounded-lg bg-white'>
                <option>All Types</option>
                <option>Expenses</option>
                <option>Income</option>
            </select>
            <select name='category' hx-get='/transactions/list' hx-target='#transactions-content'
                hx-trigger='change' hx-include='[name="q"],[name="type"]'
                class='px-4 py-2 border rounded-lg bg-white'>{}</select>
        </div>
        <div id='transactions-content' hx-get='/transactions/list' hx-trigger='load, refresh'
            class='bg-white rounded-xl shadow-sm p-6'>
            <p class='text-gray-500 text-center'>Loading...</p>
        </div>
        <script>
        function submitTransaction() {{
            const body = {{
                date: document.getElementById('new-date').value,
                description: document.getElementById('new-description').value,
                merchant: document.getElementById('new-merchant').value,
                type: document.getElementById('new-type').value,
                category: document.getElementById('new-category').value,
                amount: document.getElementById('new-amount').value
            }};
            fetch('/api/transactions', {{
                method: 'POST',
                headers: {{'Content-Type': 'application/json'}},
                body: JSON.stringify(body)
            }})
                .then(r => {{
                    if (!r.ok) throw new Error('Save failed');
                    document.getElementById('add-form').classList.add('hidden');
                    htmx.trigger('#transactions-content', 'refresh');
                }})
                .catch(e => alert(e.message));
        }}
        </script>"#,
        findash_core::format_usd(totals.total_income),
        findash_core::format_usd(totals.total_expenses),
        totals.balance_display,
        form_categories,
        filter_categories
    );

    axum::response::Html(page_response(
        &headers,
        "Transactions",
        "/transactions",
        &inner_content,
    ))
}
