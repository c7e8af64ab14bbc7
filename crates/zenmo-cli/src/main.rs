//! Zenmo CLI - ZenMoney reports and MCP tools
//!
//! Usage:
//!   zenmo transactions list --year 2025 --month 6
//!   zenmo transactions set <ID> --category <CATEGORY_ID>
//!   zenmo report spending --year 2025
//!   zenmo serve --port 3000

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use zenmo_core::tools::{ExportParams, GetTransactionsParams};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr; stdout carries report output and the stdio MCP transport
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let client = commands::build_client(cli.token.as_deref(), &cli.api_url)?;

    match cli.command {
        Commands::Transactions { action } => match action {
            None => {
                commands::cmd_transactions_list(&client, GetTransactionsParams::default()).await
            }
            Some(TransactionsAction::List {
                year,
                month,
                day,
                date_from,
                date_to,
                payee,
                category,
                uncategorized,
                limit,
                ids,
            }) => {
                let params = GetTransactionsParams {
                    year,
                    month,
                    day,
                    date_from,
                    date_to,
                    payee,
                    category: if category.is_empty() {
                        None
                    } else {
                        Some(category)
                    },
                    uncategorized_only: Some(uncategorized),
                    limit: Some(limit),
                    show_ids: Some(ids),
                };
                commands::cmd_transactions_list(&client, params).await
            }
            Some(TransactionsAction::Show { id }) => {
                commands::cmd_transactions_show(&client, &id).await
            }
            Some(TransactionsAction::Set {
                id,
                category,
                comment,
                payee,
            }) => commands::cmd_transactions_set(&client, &id, category, comment, payee).await,
        },
        Commands::Categories => commands::cmd_categories(&client).await,
        Commands::Accounts => commands::cmd_accounts(&client).await,
        Commands::Merchants { limit } => commands::cmd_merchants(&client, limit).await,
        Commands::Report { report } => match report {
            ReportType::Spending {
                year,
                month,
                day,
                date_from,
                date_to,
            } => {
                commands::cmd_report_spending(&client, year, month, day, date_from, date_to).await
            }
            ReportType::Categories { year, month } => {
                commands::cmd_report_categories(&client, year, month).await
            }
            ReportType::Merchants {
                year,
                month,
                day,
                date_from,
                date_to,
                top,
            } => {
                commands::cmd_report_merchants(&client, year, month, day, date_from, date_to, top)
                    .await
            }
            ReportType::Income { year, month } => {
                commands::cmd_report_income(&client, year, month).await
            }
            ReportType::CashFlow {
                year,
                month,
                day,
                date_from,
                date_to,
            } => {
                commands::cmd_report_cash_flow(&client, year, month, day, date_from, date_to).await
            }
        },
        Commands::Analyze { year, month } => commands::cmd_analyze(&client, year, month).await,
        Commands::Uncategorized { year, month } => {
            commands::cmd_uncategorized(&client, year, month).await
        }
        Commands::Duplicates { year, month } => {
            commands::cmd_duplicates(&client, year, month).await
        }
        Commands::Export {
            format,
            year,
            month,
            day,
            date_from,
            date_to,
            transaction_type,
            limit,
        } => {
            let params = ExportParams {
                format: Some(format),
                year,
                month,
                day,
                date_from,
                date_to,
                transaction_type: Some(transaction_type),
                limit: Some(limit),
            };
            commands::cmd_export(&client, params).await
        }
        Commands::Serve { host, port, stdio } => {
            commands::cmd_serve(&client, &host, port, stdio).await
        }
    }
}
