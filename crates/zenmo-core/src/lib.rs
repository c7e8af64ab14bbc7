//! Zenmo Core Library
//!
//! Shared functionality for the zenmo ZenMoney tool server:
//! - Transaction, category, and account models with classification rules
//! - Filter engine for date-range / year-month-day and category slicing
//! - Aggregation helpers (category/payee grouping, duplicate detection)
//! - ZenMoney diff API client (snapshot fetch and transaction updates)
//! - Text renderers for reports, listings, and CSV/JSON export
//! - MCP tool entry points shared by the server and the CLI

pub mod analysis;
pub mod client;
pub mod error;
pub mod export;
pub mod filter;
pub mod format;
pub mod models;
pub mod reports;
pub mod tools;
pub mod validate;

/// Test utilities including the mock ZenMoney API server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use client::{Snapshot, TransactionUpdate, ZenMoneyClient, DEFAULT_API_URL};
pub use error::{Error, Result};
pub use export::{ExportFormat, ExportRow};
pub use filter::TransactionFilter;
pub use models::{Account, Category, Transaction, TransactionKind, UNCATEGORIZED};
