//! Reference data commands: categories, accounts, merchants

use anyhow::Result;
use zenmo_core::tools::{self, MerchantsParams};
use zenmo_core::ZenMoneyClient;

pub async fn cmd_categories(client: &ZenMoneyClient) -> Result<()> {
    let output = tools::get_categories(client).await?;
    println!("{}", output);
    Ok(())
}

pub async fn cmd_accounts(client: &ZenMoneyClient) -> Result<()> {
    let output = tools::get_accounts(client).await?;
    println!("{}", output);
    Ok(())
}

pub async fn cmd_merchants(client: &ZenMoneyClient, limit: usize) -> Result<()> {
    let params = MerchantsParams { limit: Some(limit) };
    let output = tools::get_merchants(client, params).await?;
    println!("{}", output);
    Ok(())
}
