//! Report commands: spending, categories, merchants, income, cash-flow

use anyhow::Result;
use zenmo_core::tools::{
    self, CashFlowParams, CategoryBreakdownParams, IncomeReportParams, MerchantAnalysisParams,
    SpendingReportParams,
};
use zenmo_core::ZenMoneyClient;

pub async fn cmd_report_spending(
    client: &ZenMoneyClient,
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    date_from: Option<String>,
    date_to: Option<String>,
) -> Result<()> {
    let params = SpendingReportParams {
        year,
        month,
        day,
        date_from,
        date_to,
    };
    let output = tools::spending_report(client, params).await?;
    println!("{}", output);
    Ok(())
}

pub async fn cmd_report_categories(
    client: &ZenMoneyClient,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<()> {
    let params = CategoryBreakdownParams { year, month };
    let output = tools::category_breakdown(client, params).await?;
    println!("{}", output);
    Ok(())
}

pub async fn cmd_report_merchants(
    client: &ZenMoneyClient,
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    date_from: Option<String>,
    date_to: Option<String>,
    top: usize,
) -> Result<()> {
    let params = MerchantAnalysisParams {
        year,
        month,
        day,
        date_from,
        date_to,
        top: Some(top),
    };
    let output = tools::merchant_analysis(client, params).await?;
    println!("{}", output);
    Ok(())
}

pub async fn cmd_report_income(
    client: &ZenMoneyClient,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<()> {
    let params = IncomeReportParams { year, month };
    let output = tools::income_report(client, params).await?;
    println!("{}", output);
    Ok(())
}

pub async fn cmd_report_cash_flow(
    client: &ZenMoneyClient,
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    date_from: Option<String>,
    date_to: Option<String>,
) -> Result<()> {
    let params = CashFlowParams {
        year,
        month,
        day,
        date_from,
        date_to,
    };
    let output = tools::cash_flow(client, params).await?;
    println!("{}", output);
    Ok(())
}
