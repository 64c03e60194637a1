//! Budget routes - goals and budget-vs-actual view
//!
//! Structure:
//! - api.rs: JSON goal endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{api_budget, api_budget_update};
pub use page::page_budget;
