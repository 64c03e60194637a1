//! Transaction routes - list, filtering, CRUD against the backend
//!
//! Features:
//! - List transactions with type/category/keyword filters
//! - Create, update, delete forwarded to the backend
//! - Snapshot refresh after every write
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{
    api_refresh, api_transaction_create, api_transaction_delete, api_transaction_detail,
    api_transaction_update, api_transactions, htmx_transactions_list,
};

pub use page::page_transactions;
