//! Period analysis commands: analyze, uncategorized, duplicates

use anyhow::Result;
use zenmo_core::tools::{
    self, AnalyzePeriodParams, DetectDuplicatesParams, FindUncategorizedParams,
};
use zenmo_core::ZenMoneyClient;

pub async fn cmd_analyze(
    client: &ZenMoneyClient,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<()> {
    let params = AnalyzePeriodParams { year, month };
    let output = tools::analyze_period(client, params).await?;
    println!("{}", output);
    Ok(())
}

pub async fn cmd_uncategorized(
    client: &ZenMoneyClient,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<()> {
    let params = FindUncategorizedParams { year, month };
    let output = tools::find_uncategorized(client, params).await?;
    println!("{}", output);
    Ok(())
}

pub async fn cmd_duplicates(
    client: &ZenMoneyClient,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<()> {
    let params = DetectDuplicatesParams { year, month };
    let output = tools::detect_duplicates(client, params).await?;
    println!("{}", output);
    Ok(())
}
