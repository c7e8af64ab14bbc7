//! MCP (Model Context Protocol) Server for Zenmo
//!
//! Exposes ZenMoney data to LLMs via MCP tools for conversational finance
//! queries. Every tool call fetches a fresh snapshot through the shared API
//! client; the only write path is `set_transaction`.
//!
//! # Example
//!
//! ```bash
//! # Streamable HTTP transport
//! zenmo serve --host 127.0.0.1 --port 3000
//!
//! # stdio transport for desktop MCP clients
//! zenmo serve --stdio
//! ```
//!
//! # Available Tools
//!
//! - `get_transactions` / `get_transaction_detail` / `set_transaction`
//! - `get_categories` / `get_accounts` / `get_merchants`
//! - `spending_report` / `category_breakdown` / `merchant_analysis`
//! - `income_report` / `cash_flow` / `analyze_period`
//! - `find_uncategorized` / `detect_duplicates`
//! - `export_transactions`

mod tools;

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use tracing::info;

use zenmo_core::ZenMoneyClient;

pub use tools::*;

/// Zenmo MCP server state
#[derive(Clone)]
pub struct ZenmoMcpServer {
    /// ZenMoney API client shared by all tool calls
    client: Arc<ZenMoneyClient>,
    /// Tool router for MCP operations
    tool_router: ToolRouter<Self>,
}

impl ZenmoMcpServer {
    /// Create a new MCP server around the given API client
    pub fn new(client: ZenMoneyClient) -> Self {
        Self {
            client: Arc::new(client),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_handler]
impl ServerHandler for ZenmoMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "zenmo".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Zenmo ZenMoney Tools".to_string()),
                website_url: Some("https://github.com/zenmo/zenmo".to_string()),
                icons: None,
            },
            instructions: Some(
                "Zenmo exposes a ZenMoney personal finance account. Use the available tools \
                 to list and update transactions, inspect categories and accounts, run \
                 spending, income, and cash-flow reports, find uncategorized records and \
                 duplicates, and export data as CSV or JSON."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl ZenmoMcpServer {
    /// List transactions matching the given filters
    #[tool(
        description = "List transactions with optional date, payee, and category filters. Returns a numbered list with date, amount, and payee per line."
    )]
    async fn get_transactions(
        &self,
        Parameters(params): Parameters<GetTransactionsParams>,
    ) -> Result<CallToolResult, McpError> {
        match tools::get_transactions(&self.client, params).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    /// Show every stored field of one transaction
    #[tool(
        description = "Show full details of one transaction: amounts, accounts, category, comment, fiscal receipt, and location."
    )]
    async fn get_transaction_detail(
        &self,
        Parameters(params): Parameters<TransactionDetailParams>,
    ) -> Result<CallToolResult, McpError> {
        match tools::get_transaction_detail(&self.client, params).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    /// Update category, comment, or payee on a transaction
    #[tool(
        description = "Update a transaction's category, comment, or payee. Changes are uploaded to ZenMoney immediately."
    )]
    async fn set_transaction(
        &self,
        Parameters(params): Parameters<SetTransactionParams>,
    ) -> Result<CallToolResult, McpError> {
        match tools::set_transaction(&self.client, params).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    /// List the category hierarchy
    #[tool(
        description = "List all categories as a parent/child hierarchy with their IDs. Use the IDs with set_transaction and filters."
    )]
    async fn get_categories(&self) -> Result<CallToolResult, McpError> {
        match tools::get_categories(&self.client).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    /// List accounts with balances
    #[tool(description = "List all accounts with type, balance, and currency.")]
    async fn get_accounts(&self) -> Result<CallToolResult, McpError> {
        match tools::get_accounts(&self.client).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    /// List merchants ranked by total spending
    #[tool(
        description = "List merchants ranked by total spending across all time, with amounts and purchase counts."
    )]
    async fn get_merchants(
        &self,
        Parameters(params): Parameters<MerchantsParams>,
    ) -> Result<CallToolResult, McpError> {
        match tools::get_merchants(&self.client, params).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    /// Export filtered transactions as CSV or JSON
    #[tool(
        description = "Export transactions as CSV or JSON. Supports date and transaction-type filters; output is wrapped in a code block."
    )]
    async fn export_transactions(
        &self,
        Parameters(params): Parameters<ExportParams>,
    ) -> Result<CallToolResult, McpError> {
        match tools::export_transactions(&self.client, params).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    /// Spending totals with a per-category breakdown
    #[tool(
        description = "Spending report for a period: total spent, transaction count, average, and per-category breakdown."
    )]
    async fn spending_report(
        &self,
        Parameters(params): Parameters<SpendingReportParams>,
    ) -> Result<CallToolResult, McpError> {
        match tools::spending_report(&self.client, params).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    /// Income, expenses, and balance per category
    #[tool(
        description = "Category breakdown for a period: income, expenses, and balance per category, sorted by spending."
    )]
    async fn category_breakdown(
        &self,
        Parameters(params): Parameters<CategoryBreakdownParams>,
    ) -> Result<CallToolResult, McpError> {
        match tools::category_breakdown(&self.client, params).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    /// Top merchants with purchase counts and average check
    #[tool(
        description = "Top merchants for a period by total spending, with purchase counts and average check."
    )]
    async fn merchant_analysis(
        &self,
        Parameters(params): Parameters<MerchantAnalysisParams>,
    ) -> Result<CallToolResult, McpError> {
        match tools::merchant_analysis(&self.client, params).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    /// Income totals, top sources, and per-category sums
    #[tool(
        description = "Income report for a period: total income, top sources, and per-category income sums."
    )]
    async fn income_report(
        &self,
        Parameters(params): Parameters<IncomeReportParams>,
    ) -> Result<CallToolResult, McpError> {
        match tools::income_report(&self.client, params).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    /// Income vs expenses vs transfers with a net-flow verdict
    #[tool(
        description = "Cash flow for a period: income vs expenses vs transfers, net flow, and a positive/negative verdict."
    )]
    async fn cash_flow(
        &self,
        Parameters(params): Parameters<CashFlowParams>,
    ) -> Result<CallToolResult, McpError> {
        match tools::cash_flow(&self.client, params).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    /// Headline numbers for one period
    #[tool(
        description = "Analyze a period: transaction count, income and expense totals, balance, and uncategorized count."
    )]
    async fn analyze_period(
        &self,
        Parameters(params): Parameters<AnalyzePeriodParams>,
    ) -> Result<CallToolResult, McpError> {
        match tools::analyze_period(&self.client, params).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    /// List transactions that still need a category
    #[tool(
        description = "List transactions without a category for a period, with IDs for follow-up set_transaction calls."
    )]
    async fn find_uncategorized(
        &self,
        Parameters(params): Parameters<FindUncategorizedParams>,
    ) -> Result<CallToolResult, McpError> {
        match tools::find_uncategorized(&self.client, params).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    /// Find potential duplicate transactions
    #[tool(
        description = "Detect potential duplicate transactions for a period: same date, same payee, amounts within 0.01."
    )]
    async fn detect_duplicates(
        &self,
        Parameters(params): Parameters<DetectDuplicatesParams>,
    ) -> Result<CallToolResult, McpError> {
        match tools::detect_duplicates(&self.client, params).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }
}

/// Start the MCP server over streamable HTTP on the given address
pub async fn start_mcp_server(
    client: ZenMoneyClient,
    host: &str,
    port: u16,
) -> anyhow::Result<()> {
    use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
    use rmcp::transport::streamable_http_server::StreamableHttpService;

    info!("Starting MCP server at http://{}:{}/mcp", host, port);

    let service = StreamableHttpService::new(
        move || Ok(ZenmoMcpServer::new(client.clone())),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let router = axum::Router::new().nest_service("/mcp", service);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("MCP server ready at http://{}/mcp", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            // Wait for shutdown signal
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}

/// Serve MCP over stdio for desktop clients
pub async fn serve_stdio(client: ZenMoneyClient) -> anyhow::Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting MCP server on stdio");

    let service = ZenmoMcpServer::new(client).serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> ZenmoMcpServer {
        ZenmoMcpServer::new(ZenMoneyClient::new("test-token", "http://127.0.0.1:0"))
    }

    #[test]
    fn test_server_info_advertises_tools() {
        let info = server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert_eq!(info.server_info.name, "zenmo");
    }

    #[test]
    fn test_tool_router_lists_all_tools() {
        let router = ZenmoMcpServer::tool_router();
        let tools = router.list_all();
        assert_eq!(tools.len(), 15);
        assert!(tools.iter().any(|t| t.name == "get_transactions"));
        assert!(tools.iter().any(|t| t.name == "set_transaction"));
        assert!(tools.iter().any(|t| t.name == "detect_duplicates"));
    }
}
