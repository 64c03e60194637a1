//! Analytics routes - monthly and category reports
//!
//! Structure:
//! - api.rs: JSON report endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{api_category_report, api_monthly_report, api_summary};
pub use page::page_analytics;
