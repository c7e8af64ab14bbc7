//! Transaction commands: list, show, set

use anyhow::Result;
use zenmo_core::tools::{
    self, GetTransactionsParams, SetTransactionParams, TransactionDetailParams,
};
use zenmo_core::ZenMoneyClient;

pub async fn cmd_transactions_list(
    client: &ZenMoneyClient,
    params: GetTransactionsParams,
) -> Result<()> {
    let output = tools::get_transactions(client, params).await?;
    println!("{}", output);
    Ok(())
}

pub async fn cmd_transactions_show(client: &ZenMoneyClient, id: &str) -> Result<()> {
    let params = TransactionDetailParams {
        transaction_id: id.to_string(),
    };
    let output = tools::get_transaction_detail(client, params).await?;
    println!("{}", output);
    Ok(())
}

pub async fn cmd_transactions_set(
    client: &ZenMoneyClient,
    id: &str,
    category: Option<String>,
    comment: Option<String>,
    payee: Option<String>,
) -> Result<()> {
    let params = SetTransactionParams {
        transaction_id: id.to_string(),
        category,
        comment,
        payee,
    };
    let output = tools::set_transaction(client, params).await?;
    println!("{}", output);
    Ok(())
}
