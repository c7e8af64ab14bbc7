//! MCP Tool implementations for Zenmo
//!
//! Re-exports from zenmo_core::tools for MCP server use.
//! The actual implementations live in zenmo-core so they can be shared
//! with the CLI.

// Re-export all tool types and functions from zenmo-core
pub use zenmo_core::tools::{
    // Functions
    analyze_period,
    cash_flow,
    category_breakdown,
    detect_duplicates,
    export_transactions,
    find_uncategorized,
    get_accounts,
    get_categories,
    get_merchants,
    get_transaction_detail,
    get_transactions,
    income_report,
    merchant_analysis,
    set_transaction,
    spending_report,
    // Params types
    AnalyzePeriodParams,
    CashFlowParams,
    CategoryBreakdownParams,
    DetectDuplicatesParams,
    ExportParams,
    FindUncategorizedParams,
    GetTransactionsParams,
    IncomeReportParams,
    MerchantAnalysisParams,
    MerchantsParams,
    SetTransactionParams,
    SpendingReportParams,
    TransactionDetailParams,
};
