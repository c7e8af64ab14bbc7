//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analysis` - Period analysis commands (analyze, uncategorized, duplicates)
//! - `catalog` - Reference data commands (categories, accounts, merchants)
//! - `export` - CSV/JSON export command
//! - `reports` - Report generation commands
//! - `serve` - MCP server command
//! - `transactions` - Transaction commands (list, show, set)

pub mod analysis;
pub mod catalog;
pub mod export;
pub mod reports;
pub mod serve;
pub mod transactions;

// Re-export command functions for main.rs
pub use analysis::*;
pub use catalog::*;
pub use export::*;
pub use reports::*;
pub use serve::*;
pub use transactions::*;

use anyhow::{Context, Result};
use zenmo_core::ZenMoneyClient;

/// Build the API client from the global CLI arguments
pub fn build_client(token: Option<&str>, api_url: &str) -> Result<ZenMoneyClient> {
    let token = token.context("ZenMoney token not set. Pass --token or set ZENMONEY_TOKEN")?;
    Ok(ZenMoneyClient::new(token, api_url))
}
