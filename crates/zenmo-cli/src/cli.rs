//! CLI argument definitions

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "zenmo")]
#[command(about = "ZenMoney reports, categorization, and MCP tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// ZenMoney API token
    #[arg(long, global = true, env = "ZENMONEY_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// ZenMoney API base URL
    #[arg(
        long,
        global = true,
        env = "ZENMONEY_API_URL",
        default_value = zenmo_core::DEFAULT_API_URL
    )]
    pub api_url: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse and edit transactions
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// List categories with their ids
    Categories,

    /// List accounts with balances
    Accounts,

    /// Top merchants by total spending
    Merchants {
        /// Number of merchants to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Spending, income, and cash-flow reports
    Report {
        #[command(subcommand)]
        report: ReportType,
    },

    /// Period overview: totals, balance, uncategorized count
    Analyze {
        /// Year, e.g. 2025 (defaults to all time)
        #[arg(long)]
        year: Option<i32>,

        /// Month 1-12 (requires --year)
        #[arg(long)]
        month: Option<u32>,
    },

    /// List transactions without a category
    Uncategorized {
        /// Year, e.g. 2025 (defaults to all time)
        #[arg(long)]
        year: Option<i32>,

        /// Month 1-12 (requires --year)
        #[arg(long)]
        month: Option<u32>,
    },

    /// Find potential duplicate transactions
    Duplicates {
        /// Year, e.g. 2025 (defaults to all time)
        #[arg(long)]
        year: Option<i32>,

        /// Month 1-12 (requires --year)
        #[arg(long)]
        month: Option<u32>,
    },

    /// Export transactions as CSV or JSON
    Export {
        /// Output format: csv or json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Year filter
        #[arg(long)]
        year: Option<i32>,

        /// Month 1-12 (requires --year)
        #[arg(long)]
        month: Option<u32>,

        /// Day of month (requires --year and --month)
        #[arg(long)]
        day: Option<u32>,

        /// Range start YYYY-MM-DD (overrides --year/--month/--day)
        #[arg(long)]
        date_from: Option<String>,

        /// Range end YYYY-MM-DD
        #[arg(long)]
        date_to: Option<String>,

        /// Keep only one kind: income, expense, or transfer
        #[arg(long = "type", default_value = "all")]
        transaction_type: String,

        /// Maximum rows to export
        #[arg(short, long, default_value = "1000")]
        limit: usize,
    },

    /// Start the MCP server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Speak MCP over stdin/stdout instead of HTTP
        #[arg(long)]
        stdio: bool,
    },
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List transactions with optional filters
    List {
        /// Year filter
        #[arg(long)]
        year: Option<i32>,

        /// Month 1-12 (requires --year)
        #[arg(long)]
        month: Option<u32>,

        /// Day of month (requires --year and --month)
        #[arg(long)]
        day: Option<u32>,

        /// Range start YYYY-MM-DD (overrides --year/--month/--day)
        #[arg(long)]
        date_from: Option<String>,

        /// Range end YYYY-MM-DD
        #[arg(long)]
        date_to: Option<String>,

        /// Case-insensitive payee substring
        #[arg(long)]
        payee: Option<String>,

        /// Category id or title (repeat the flag to pass several)
        #[arg(long)]
        category: Vec<String>,

        /// Only transactions without a category
        #[arg(long)]
        uncategorized: bool,

        /// Maximum transactions to show
        #[arg(short, long, default_value = "50")]
        limit: usize,

        /// Include transaction ids in the listing
        #[arg(long)]
        ids: bool,
    },

    /// Show one transaction in full
    Show {
        /// Transaction id
        id: String,
    },

    /// Update category, comment, or payee on a transaction
    Set {
        /// Transaction id
        id: String,

        /// New category id (empty string clears the category)
        #[arg(long)]
        category: Option<String>,

        /// New comment
        #[arg(long)]
        comment: Option<String>,

        /// New payee
        #[arg(long)]
        payee: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Spending total with a per-category breakdown
    Spending {
        /// Year filter
        #[arg(long)]
        year: Option<i32>,

        /// Month 1-12 (requires --year)
        #[arg(long)]
        month: Option<u32>,

        /// Day of month (requires --year and --month)
        #[arg(long)]
        day: Option<u32>,

        /// Range start YYYY-MM-DD (overrides --year/--month/--day)
        #[arg(long)]
        date_from: Option<String>,

        /// Range end YYYY-MM-DD
        #[arg(long)]
        date_to: Option<String>,
    },

    /// Income, expenses, and balance per category
    Categories {
        /// Year, e.g. 2025 (defaults to all time)
        #[arg(long)]
        year: Option<i32>,

        /// Month 1-12 (requires --year)
        #[arg(long)]
        month: Option<u32>,
    },

    /// Top merchants with visit counts and average check
    Merchants {
        /// Year filter
        #[arg(long)]
        year: Option<i32>,

        /// Month 1-12 (requires --year)
        #[arg(long)]
        month: Option<u32>,

        /// Day of month (requires --year and --month)
        #[arg(long)]
        day: Option<u32>,

        /// Range start YYYY-MM-DD (overrides --year/--month/--day)
        #[arg(long)]
        date_from: Option<String>,

        /// Range end YYYY-MM-DD
        #[arg(long)]
        date_to: Option<String>,

        /// Number of merchants to show
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Income total with top sources
    Income {
        /// Year, e.g. 2025 (defaults to all time)
        #[arg(long)]
        year: Option<i32>,

        /// Month 1-12 (requires --year)
        #[arg(long)]
        month: Option<u32>,
    },

    /// Income vs expenses with net flow
    CashFlow {
        /// Year filter
        #[arg(long)]
        year: Option<i32>,

        /// Month 1-12 (requires --year)
        #[arg(long)]
        month: Option<u32>,

        /// Day of month (requires --year and --month)
        #[arg(long)]
        day: Option<u32>,

        /// Range start YYYY-MM-DD (overrides --year/--month/--day)
        #[arg(long)]
        date_from: Option<String>,

        /// Range end YYYY-MM-DD
        #[arg(long)]
        date_to: Option<String>,
    },
}
