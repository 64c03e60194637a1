//! HTTP server with JSON API and HTMX pages
//!
//! Routes are organized into modules:
//! - routes::transactions: Transaction list, filtering, CRUD
//! - routes::analytics: Monthly and category reports
//! - routes::budget: Budget goals and budget-vs-actual view

pub mod error;
pub mod routes;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use findash_client::TransactionsApi;
use findash_config::Config;
use findash_core::{format_usd, summary, BudgetGoal, TransactionStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Snapshot of the backend's transactions
    pub store: Arc<TransactionStore>,
    /// Backend client used for writes and refreshes
    pub client: Arc<dyn TransactionsApi>,
    /// Current budget goal
    pub budget: Arc<RwLock<BudgetGoal>>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::analytics::{api_category_report, api_monthly_report, api_summary, page_analytics};
    use routes::budget::{api_budget, api_budget_update, page_budget};
    use routes::transactions::{
        api_refresh, api_transaction_create, api_transaction_delete, api_transaction_detail,
        api_transaction_update, api_transactions, htmx_transactions_list, page_transactions,
    };

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/transactions", get(api_transactions))
        .route("/api/transactions", post(api_transaction_create))
        .route("/api/transactions/:id", get(api_transaction_detail))
        .route("/api/transactions/:id", put(api_transaction_update))
        .route("/api/transactions/:id", delete(api_transaction_delete))
        .route("/api/summary", get(api_summary))
        .route("/api/reports/monthly", get(api_monthly_report))
        .route("/api/reports/categories", get(api_category_report))
        .route("/api/budget", get(api_budget))
        .route("/api/budget", put(api_budget_update))
        .route("/api/refresh", post(api_refresh))
        // HTMX page routes
        .route("/", get(index_page))
        .route("/transactions", get(page_transactions))
        .route("/analytics", get(page_analytics))
        .route("/budget", get(page_budget))
        // HTMX partial routes
        .route("/transactions/list", get(htmx_transactions_list))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Findash</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        title, content
    )
}

/// Navigation sidebar
pub fn nav_sidebar(current_path: &str) -> String {
    let links = [
        ("/", "Dashboard", "dashboard"),
        ("/transactions", "Transactions", "transactions"),
        ("/analytics", "Analytics", "analytics"),
        ("/budget", "Budget Goals", "budget"),
    ];

    let mut nav = String::from("<div class='bg-white border-r h-screen flex flex-col'><div class='p-4 border-b'><h1 class='text-xl font-bold text-indigo-600'>Findash</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>");

    for (path, label, id) in &links {
        let is_active = if *path == "/" {
            current_path == "/"
        } else {
            current_path.starts_with(path)
        };
        let active_class = if is_active {
            "bg-indigo-50 text-indigo-600"
        } else {
            "text-gray-600 hover:bg-gray-50"
        };
        let icon = match *id {
            "dashboard" => "📊",
            "transactions" => "📋",
            "analytics" => "📈",
            "budget" => "🎯",
            _ => "📄",
        };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'>{}<span>{}</span></a></li>"#,
            path, active_class, icon, label
        ));
    }
    nav.push_str("</ul></div>");
    nav
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(
    headers: &axum::http::HeaderMap,
    title: &str,
    current_path: &str,
    inner_content: &str,
) -> String {
    if is_htmx_request(headers) {
        // HTMX partial - just the content area
        format!(
            r#"<main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>"#,
            inner_content
        )
    } else {
        base_html(
            title,
            &format!(
                r#"<div class='flex h-screen overflow-hidden'>
    <aside class='w-64 flex-shrink-0'>{}</aside>
    <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
</div>"#,
                nav_sidebar(current_path),
                inner_content
            ),
        )
    }
}

/// Dashboard page: summary cards and recent activity
async fn index_page(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let transactions = state.store.all();
    let totals = summary(&transactions);
    let recent = state.store.recent(5);

    let mut recent_html = String::new();
    if recent.is_empty() {
        recent_html.push_str("<p class='text-gray-500 text-center py-8'>No transactions yet</p>");
    } else {
        for t in &recent {
            let (sign, color) = match t.kind {
                findash_core::TransactionKind::Income => ("+", "text-green-600"),
                _ => ("-", "text-red-600"),
            };
            recent_html.push_str(&format!(
                r#"<div class='flex items-center justify-between py-3 border-b last:border-b-0'>
                    <div>
                        <p class='font-medium'>{}</p>
                        <p class='text-sm text-gray-500'>{} · {}</p>
                    </div>
                    <span class='font-medium {}'>{}{}</span>
                </div>"#,
                t.description,
                t.date,
                t.category,
                color,
                sign,
                format_usd(t.amount)
            ));
        }
    }

    let inner_content = format!(
        r#"<h2 class='text-2xl font-bold mb-4'>Dashboard</h2>
        <div class='grid grid-cols-1 md:grid-cols-3 gap-4 mb-6'>
            <div class='bg-white p-4 rounded-xl shadow-sm'><p class='text-sm text-gray-500'>Total Income</p><p class='text-2xl font-bold text-green-600'>{}</p></div>
            <div class='bg-white p-4 rounded-xl shadow-sm'><p class='text-sm text-gray-500'>Total Expenses</p><p class='text-2xl font-bold text-red-600'>{}</p></div>
            <div class='bg-white p-4 rounded-xl shadow-sm'><p class='text-sm text-gray-500'>Balance</p><p class='text-2xl font-bold'>{}</p></div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6'>
            <div class='flex items-center justify-between mb-2'>
                <h3 class='font-bold'>Recent Activity</h3>
                <a href='/transactions' class='text-sm text-indigo-600 hover:underline'>View all</a>
            </div>
            {}
        </div>"#,
        format_usd(totals.total_income),
        format_usd(totals.total_expenses),
        totals.balance_display,
        recent_html
    );

    axum::response::Html(page_response(&headers, "Dashboard", "/", &inner_content))
}

/// Start the HTTP server
pub async fn start_server(
    config: Config,
    store: Arc<TransactionStore>,
    client: Arc<dyn TransactionsApi>,
) {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        store,
        client,
        budget: Arc::new(RwLock::new(BudgetGoal::default())),
        config,
    };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await.unwrap();
    log::info!("Starting Findash server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Dashboard)");
    log::info!("  - /transactions (Transaction list)");
    log::info!("  - /analytics (Reports)");
    log::info!("  - /budget (Budget goals)");
    log::info!("  - /api/* (JSON API endpoints)");

    match axum::serve(listener, router).await {
        Ok(_) => log::info!("Server stopped gracefully"),
        Err(e) => log::error!("Server error: {}", e),
    }
}
