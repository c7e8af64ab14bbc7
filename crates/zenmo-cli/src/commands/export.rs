//! Export command

use anyhow::Result;
use zenmo_core::tools::{self, ExportParams};
use zenmo_core::ZenMoneyClient;

pub async fn cmd_export(client: &ZenMoneyClient, params: ExportParams) -> Result<()> {
    let output = tools::export_transactions(client, params).await?;
    println!("{}", output);
    Ok(())
}
