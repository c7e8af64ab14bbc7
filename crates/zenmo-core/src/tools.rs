//! MCP tool implementations for zenmo
//!
//! Each tool fetches one fresh snapshot from the ZenMoney diff API, narrows
//! it with the filter engine, and renders human-readable text. They are used
//! by:
//! 1. The MCP server for external LLM clients (Claude Desktop, etc.)
//! 2. The CLI, which prints the same text to stdout
//!
//! Invalid period parameters come back as the tool output rather than an
//! error, so an LLM caller can read the message and correct its call.

use serde::Deserialize;

use crate::client::{TransactionUpdate, ZenMoneyClient};
use crate::error::Result;
use crate::export::{self, ExportFormat};
use crate::filter::{self, TransactionFilter};
use crate::format;
use crate::reports;
use crate::validate;

// =============================================================================
// Period parameters (shared utilities)
// =============================================================================

/// Build a filter engine spec from tool period parameters.
fn period_filter(
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    date_from: Option<String>,
    date_to: Option<String>,
) -> TransactionFilter {
    TransactionFilter {
        year,
        month,
        day,
        date_from,
        date_to,
        ..TransactionFilter::default()
    }
}

/// Period validation failures rendered as tool output, if any.
fn period_errors(year: Option<i32>, month: Option<u32>) -> Option<String> {
    let errors = validate::validate_period(year, month);
    if errors.is_empty() {
        None
    } else {
        Some(errors.join("\n"))
    }
}

// =============================================================================
// get_transactions
// =============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct GetTransactionsParams {
    /// Calendar year filter
    #[schemars(description = "Filter by year, e.g. 2025")]
    pub year: Option<i32>,

    /// Month filter, requires year
    #[schemars(description = "Filter by month 1-12 (used together with year)")]
    pub month: Option<u32>,

    /// Day filter, requires year and month
    #[schemars(description = "Filter by day 1-31 (used together with year and month)")]
    pub day: Option<u32>,

    /// Inclusive range start; overrides year/month/day when set
    #[schemars(description = "Start date in YYYY-MM-DD format (overrides year/month/day)")]
    pub date_from: Option<String>,

    /// Inclusive range end; overrides year/month/day when set
    #[schemars(description = "End date in YYYY-MM-DD format (overrides year/month/day)")]
    pub date_to: Option<String>,

    /// Case-insensitive payee substring
    #[schemars(description = "Filter by payee name (case-insensitive substring)")]
    pub payee: Option<String>,

    /// Category ids or titles, matched per the name-or-id rule
    #[schemars(description = "Filter by categories: IDs or human-readable titles")]
    pub category: Option<Vec<String>>,

    /// Keep only records without a category reference
    #[schemars(description = "Show only transactions without a category")]
    pub uncategorized_only: Option<bool>,

    /// Maximum rows to render (default 50)
    #[schemars(description = "Maximum number of transactions to show (default 50)")]
    pub limit: Option<usize>,

    /// Append transaction ids to every line
    #[schemars(description = "Include transaction IDs in the listing (default false)")]
    pub show_ids: Option<bool>,
}

/// List transactions matching period, payee, and category filters.
pub async fn get_transactions(
    client: &ZenMoneyClient,
    params: GetTransactionsParams,
) -> Result<String> {
    if let Some(errors) = period_errors(params.year, params.month) {
        return Ok(errors);
    }

    let snapshot = client.fetch_snapshot().await?;
    let mut spec = period_filter(
        params.year,
        params.month,
        params.day,
        params.date_from,
        params.date_to,
    );
    spec.uncategorized_only = params.uncategorized_only.unwrap_or(false);

    let mut transactions = filter::filter_transactions(&snapshot.transactions, &spec);
    if let Some(query) = params.payee.as_deref() {
        transactions = filter::filter_by_payee(&transactions, query);
    }
    if let Some(tokens) = params.category.as_deref() {
        transactions = filter::filter_by_category_names(&transactions, tokens, &snapshot.categories);
    }

    Ok(format::format_transaction_list(
        &transactions,
        params.limit.unwrap_or(50),
        params.show_ids.unwrap_or(false),
    ))
}

// =============================================================================
// get_transaction_detail
// =============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct TransactionDetailParams {
    /// Id of the record to show
    #[schemars(description = "Transaction ID to show")]
    pub transaction_id: String,
}

/// Full field dump for one transaction, receipt and location included.
pub async fn get_transaction_detail(
    client: &ZenMoneyClient,
    params: TransactionDetailParams,
) -> Result<String> {
    let snapshot = client.fetch_snapshot().await?;
    let Some(transaction) = snapshot
        .transactions
        .iter()
        .find(|t| t.id == params.transaction_id)
    else {
        return Ok(format!("Transaction {} not found", params.transaction_id));
    };
    Ok(format::format_transaction_detail(
        transaction,
        &snapshot.categories,
        &snapshot.accounts,
    ))
}

// =============================================================================
// set_transaction
// =============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct SetTransactionParams {
    /// Id of the record to change
    #[schemars(description = "Transaction ID to update")]
    pub transaction_id: String,

    /// Category id to assign; an empty string clears the category
    #[schemars(description = "Category ID to set (empty string removes the category)")]
    pub category: Option<String>,

    /// Replacement comment
    #[schemars(description = "Comment to set")]
    pub comment: Option<String>,

    /// Replacement payee
    #[schemars(description = "Payee to set")]
    pub payee: Option<String>,
}

/// Update category, comment, or payee on a transaction via diff upload.
pub async fn set_transaction(
    client: &ZenMoneyClient,
    params: SetTransactionParams,
) -> Result<String> {
    let update = TransactionUpdate {
        category: params.category,
        comment: params.comment,
        payee: params.payee,
    };
    if update.is_empty() {
        return Ok("No fields to update".to_string());
    }

    let fields = update.field_names().join(", ");
    if client
        .update_transaction(&params.transaction_id, &update)
        .await?
    {
        Ok(format!(
            "✅ Transaction {} updated ({})",
            params.transaction_id, fields
        ))
    } else {
        Ok(format!("Transaction {} not found", params.transaction_id))
    }
}

// =============================================================================
// get_categories
// =============================================================================

/// Hierarchical category listing with orphan detection.
pub async fn get_categories(client: &ZenMoneyClient) -> Result<String> {
    let snapshot = client.fetch_snapshot().await?;
    Ok(format::format_categories(&snapshot.categories))
}

// =============================================================================
// get_accounts
// =============================================================================

/// Account listing with type and balance.
pub async fn get_accounts(client: &ZenMoneyClient) -> Result<String> {
    let snapshot = client.fetch_snapshot().await?;
    Ok(format::format_accounts(&snapshot.accounts))
}

// =============================================================================
// get_merchants
// =============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct MerchantsParams {
    /// Maximum merchants to list (default 50)
    #[schemars(description = "Maximum number of merchants to show (default 50)")]
    pub limit: Option<usize>,
}

/// All-time merchants ranked by total spend.
pub async fn get_merchants(client: &ZenMoneyClient, params: MerchantsParams) -> Result<String> {
    let snapshot = client.fetch_snapshot().await?;
    Ok(reports::merchant_list(
        &snapshot.transactions,
        params.limit.unwrap_or(50),
    ))
}

// =============================================================================
// export_transactions
// =============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ExportParams {
    /// Output format (default csv)
    #[schemars(description = "Export format: csv or json (default csv)")]
    pub format: Option<String>,

    /// Calendar year filter
    #[schemars(description = "Filter by year, e.g. 2025")]
    pub year: Option<i32>,

    /// Month filter, requires year
    #[schemars(description = "Filter by month 1-12 (used together with year)")]
    pub month: Option<u32>,

    /// Day filter, requires year and month
    #[schemars(description = "Filter by day 1-31 (used together with year and month)")]
    pub day: Option<u32>,

    /// Inclusive range start; overrides year/month/day when set
    #[schemars(description = "Start date in YYYY-MM-DD format (overrides year/month/day)")]
    pub date_from: Option<String>,

    /// Inclusive range end; overrides year/month/day when set
    #[schemars(description = "End date in YYYY-MM-DD format (overrides year/month/day)")]
    pub date_to: Option<String>,

    /// Classified type to keep (default all)
    #[schemars(description = "Transaction type: all, income, expense, or transfer (default all)")]
    pub transaction_type: Option<String>,

    /// Maximum rows to export (default 1000)
    #[schemars(description = "Maximum number of rows to export (default 1000)")]
    pub limit: Option<usize>,
}

/// Export filtered transactions as CSV or pretty-printed JSON.
pub async fn export_transactions(client: &ZenMoneyClient, params: ExportParams) -> Result<String> {
    if let Some(errors) = period_errors(params.year, params.month) {
        return Ok(errors);
    }
    let format = match params.format.as_deref().unwrap_or("csv").parse::<ExportFormat>() {
        Ok(format) => format,
        Err(message) => return Ok(message),
    };

    let snapshot = client.fetch_snapshot().await?;
    let spec = period_filter(
        params.year,
        params.month,
        params.day,
        params.date_from,
        params.date_to,
    );
    let mut transactions = filter::filter_transactions(&snapshot.transactions, &spec);
    if let Some(type_filter) = params.transaction_type.as_deref() {
        transactions = export::filter_by_type(&transactions, type_filter);
    }
    transactions.truncate(params.limit.unwrap_or(1000));

    export::render_export(&transactions, &snapshot.categories, format)
}

// =============================================================================
// spending_report
// =============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct SpendingReportParams {
    /// Calendar year filter
    #[schemars(description = "Filter by year, e.g. 2025")]
    pub year: Option<i32>,

    /// Month filter, requires year
    #[schemars(description = "Filter by month 1-12 (used together with year)")]
    pub month: Option<u32>,

    /// Day filter, requires year and month
    #[schemars(description = "Filter by day 1-31 (used together with year and month)")]
    pub day: Option<u32>,

    /// Inclusive range start; overrides year/month/day when set
    #[schemars(description = "Start date in YYYY-MM-DD format (overrides year/month/day)")]
    pub date_from: Option<String>,

    /// Inclusive range end; overrides year/month/day when set
    #[schemars(description = "End date in YYYY-MM-DD format (overrides year/month/day)")]
    pub date_to: Option<String>,
}

/// Expense totals with a per-category breakdown.
pub async fn spending_report(
    client: &ZenMoneyClient,
    params: SpendingReportParams,
) -> Result<String> {
    if let Some(errors) = period_errors(params.year, params.month) {
        return Ok(errors);
    }

    let snapshot = client.fetch_snapshot().await?;
    let spec = period_filter(
        params.year,
        params.month,
        params.day,
        params.date_from,
        params.date_to,
    );
    let transactions = filter::filter_transactions(&snapshot.transactions, &spec);
    let period = format::describe_period(&spec);
    Ok(reports::spending_report(
        &transactions,
        &snapshot.categories,
        &period,
    ))
}

// =============================================================================
// category_breakdown
// =============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct CategoryBreakdownParams {
    /// Calendar year filter
    #[schemars(description = "Filter by year, e.g. 2025")]
    pub year: Option<i32>,

    /// Month filter, requires year
    #[schemars(description = "Filter by month 1-12 (used together with year)")]
    pub month: Option<u32>,
}

/// Per-category income/expense/balance table.
pub async fn category_breakdown(
    client: &ZenMoneyClient,
    params: CategoryBreakdownParams,
) -> Result<String> {
    if let Some(errors) = period_errors(params.year, params.month) {
        return Ok(errors);
    }

    let snapshot = client.fetch_snapshot().await?;
    let spec = period_filter(params.year, params.month, None, None, None);
    let transactions = filter::filter_transactions(&snapshot.transactions, &spec);
    let period = format::describe_period(&spec);
    Ok(reports::category_breakdown(
        &transactions,
        &snapshot.categories,
        &period,
    ))
}

// =============================================================================
// merchant_analysis
// =============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct MerchantAnalysisParams {
    /// Calendar year filter
    #[schemars(description = "Filter by year, e.g. 2025")]
    pub year: Option<i32>,

    /// Month filter, requires year
    #[schemars(description = "Filter by month 1-12 (used together with year)")]
    pub month: Option<u32>,

    /// Day filter, requires year and month
    #[schemars(description = "Filter by day 1-31 (used together with year and month)")]
    pub day: Option<u32>,

    /// Inclusive range start; overrides year/month/day when set
    #[schemars(description = "Start date in YYYY-MM-DD format (overrides year/month/day)")]
    pub date_from: Option<String>,

    /// Inclusive range end; overrides year/month/day when set
    #[schemars(description = "End date in YYYY-MM-DD format (overrides year/month/day)")]
    pub date_to: Option<String>,

    /// How many merchants to rank (default 10)
    #[schemars(description = "Number of top merchants to show (default 10)")]
    pub top: Option<usize>,
}

/// Top merchants by spend with purchase counts and average check.
pub async fn merchant_analysis(
    client: &ZenMoneyClient,
    params: MerchantAnalysisParams,
) -> Result<String> {
    if let Some(errors) = period_errors(params.year, params.month) {
        return Ok(errors);
    }

    let snapshot = client.fetch_snapshot().await?;
    let spec = period_filter(
        params.year,
        params.month,
        params.day,
        params.date_from,
        params.date_to,
    );
    let transactions = filter::filter_transactions(&snapshot.transactions, &spec);
    let period = format::describe_period(&spec);
    Ok(reports::merchant_analysis(
        &transactions,
        &period,
        params.top.unwrap_or(10),
    ))
}

// =============================================================================
// income_report
// =============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct IncomeReportParams {
    /// Calendar year filter
    #[schemars(description = "Filter by year, e.g. 2025")]
    pub year: Option<i32>,

    /// Month filter, requires year
    #[schemars(description = "Filter by month 1-12 (used together with year)")]
    pub month: Option<u32>,
}

/// Income totals, top sources, and per-category income sums.
pub async fn income_report(client: &ZenMoneyClient, params: IncomeReportParams) -> Result<String> {
    if let Some(errors) = period_errors(params.year, params.month) {
        return Ok(errors);
    }

    let snapshot = client.fetch_snapshot().await?;
    let spec = period_filter(params.year, params.month, None, None, None);
    let transactions = filter::filter_transactions(&snapshot.transactions, &spec);
    let period = format::describe_period(&spec);
    Ok(reports::income_report(
        &transactions,
        &snapshot.categories,
        &period,
    ))
}

// =============================================================================
// cash_flow
// =============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct CashFlowParams {
    /// Calendar year filter
    #[schemars(description = "Filter by year, e.g. 2025")]
    pub year: Option<i32>,

    /// Month filter, requires year
    #[schemars(description = "Filter by month 1-12 (used together with year)")]
    pub month: Option<u32>,

    /// Day filter, requires year and month
    #[schemars(description = "Filter by day 1-31 (used together with year and month)")]
    pub day: Option<u32>,

    /// Inclusive range start; overrides year/month/day when set
    #[schemars(description = "Start date in YYYY-MM-DD format (overrides year/month/day)")]
    pub date_from: Option<String>,

    /// Inclusive range end; overrides year/month/day when set
    #[schemars(description = "End date in YYYY-MM-DD format (overrides year/month/day)")]
    pub date_to: Option<String>,
}

/// Income vs expenses vs transfers with a net-flow verdict.
pub async fn cash_flow(client: &ZenMoneyClient, params: CashFlowParams) -> Result<String> {
    if let Some(errors) = period_errors(params.year, params.month) {
        return Ok(errors);
    }

    let snapshot = client.fetch_snapshot().await?;
    let spec = period_filter(
        params.year,
        params.month,
        params.day,
        params.date_from,
        params.date_to,
    );
    let transactions = filter::filter_transactions(&snapshot.transactions, &spec);
    let period = format::describe_period(&spec);
    Ok(reports::cash_flow_report(&transactions, &period))
}

// =============================================================================
// analyze_period
// =============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct AnalyzePeriodParams {
    /// Calendar year filter
    #[schemars(description = "Filter by year, e.g. 2025")]
    pub year: Option<i32>,

    /// Month filter, requires year
    #[schemars(description = "Filter by month 1-12 (used together with year)")]
    pub month: Option<u32>,
}

/// Count, totals, balance, and uncategorized count for a period.
pub async fn analyze_period(
    client: &ZenMoneyClient,
    params: AnalyzePeriodParams,
) -> Result<String> {
    if let Some(errors) = period_errors(params.year, params.month) {
        return Ok(errors);
    }

    let snapshot = client.fetch_snapshot().await?;
    let spec = period_filter(params.year, params.month, None, None, None);
    let transactions = filter::filter_transactions(&snapshot.transactions, &spec);
    let period = format::describe_period(&spec);
    Ok(reports::period_analysis(&transactions, &period))
}

// =============================================================================
// find_uncategorized
// =============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct FindUncategorizedParams {
    /// Calendar year filter
    #[schemars(description = "Filter by year, e.g. 2025")]
    pub year: Option<i32>,

    /// Month filter, requires year
    #[schemars(description = "Filter by month 1-12 (used together with year)")]
    pub month: Option<u32>,
}

/// List transactions without a category for a period.
pub async fn find_uncategorized(
    client: &ZenMoneyClient,
    params: FindUncategorizedParams,
) -> Result<String> {
    if let Some(errors) = period_errors(params.year, params.month) {
        return Ok(errors);
    }

    let snapshot = client.fetch_snapshot().await?;
    let spec = TransactionFilter {
        year: params.year,
        month: params.month,
        uncategorized_only: true,
        ..TransactionFilter::default()
    };
    let transactions = filter::filter_transactions(&snapshot.transactions, &spec);
    let period = format::describe_period(&spec);
    Ok(reports::uncategorized_report(&transactions, &period))
}

// =============================================================================
// detect_duplicates
// =============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct DetectDuplicatesParams {
    /// Calendar year filter
    #[schemars(description = "Filter by year, e.g. 2025")]
    pub year: Option<i32>,

    /// Month filter, requires year
    #[schemars(description = "Filter by month 1-12 (used together with year)")]
    pub month: Option<u32>,
}

/// Greedy duplicate grouping over a bounded period.
pub async fn detect_duplicates(
    client: &ZenMoneyClient,
    params: DetectDuplicatesParams,
) -> Result<String> {
    if let Some(errors) = period_errors(params.year, params.month) {
        return Ok(errors);
    }

    let snapshot = client.fetch_snapshot().await?;
    let spec = period_filter(params.year, params.month, None, None, None);
    let transactions = filter::filter_transactions(&snapshot.transactions, &spec);
    let period = format::describe_period(&spec);
    Ok(reports::duplicates_report(&transactions, &period))
}
