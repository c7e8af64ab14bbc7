//! ZenMoney diff API client
//!
//! The diff endpoint is a single POST that both returns the full object
//! snapshot and accepts uploaded changes. Fetching sends a zero server
//! timestamp; updates re-fetch, merge into the raw JSON object, and post
//! the merged object back under the snapshot's server timestamp.

use std::collections::HashMap;

use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Account, Category, Transaction};

/// Default API endpoint
pub const DEFAULT_API_URL: &str = "https://api.zenmoney.ru";

/// One diff response parsed into usable collections
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub categories: HashMap<String, Category>,
    pub accounts: HashMap<String, Account>,
    pub server_timestamp: i64,
}

/// Fields a transaction update may change
#[derive(Debug, Clone, Default)]
pub struct TransactionUpdate {
    /// New category id, written as the `tag` list; empty string clears it
    pub category: Option<String>,
    pub comment: Option<String>,
    pub payee: Option<String>,
}

impl TransactionUpdate {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.comment.is_none() && self.payee.is_none()
    }

    /// Names of the fields this update touches, for the result message
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.category.is_some() {
            fields.push("category");
        }
        if self.comment.is_some() {
            fields.push("comment");
        }
        if self.payee.is_some() {
            fields.push("payee");
        }
        fields
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DiffRequest {
    server_timestamp: i64,
    current_client_timestamp: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadRequest {
    server_timestamp: i64,
    current_client_timestamp: i64,
    transaction: Vec<Value>,
}

/// HTTP client for the ZenMoney diff API
#[derive(Debug, Clone)]
pub struct ZenMoneyClient {
    http_client: Client,
    base_url: String,
    token: String,
}

impl ZenMoneyClient {
    pub fn new(token: &str, base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// Create from `ZENMONEY_TOKEN` / `ZENMONEY_API_URL`
    pub fn from_env() -> Option<Self> {
        let token = std::env::var("ZENMONEY_TOKEN").ok()?;
        let base_url =
            std::env::var("ZENMONEY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Some(Self::new(&token, &base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_diff<T: Serialize>(&self, request: &T) -> Result<Value> {
        let response = self
            .http_client
            .post(format!("{}/v8/diff/", self.base_url))
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn fetch_diff(&self) -> Result<Value> {
        let request = DiffRequest {
            server_timestamp: 0,
            current_client_timestamp: Utc::now().timestamp(),
        };
        self.post_diff(&request).await
    }

    /// Fetch one fresh snapshot of transactions, categories, and accounts
    pub async fn fetch_snapshot(&self) -> Result<Snapshot> {
        let diff = self.fetch_diff().await?;
        let snapshot = parse_snapshot(&diff)?;
        debug!(
            "Snapshot: {} transactions, {} categories, {} accounts",
            snapshot.transactions.len(),
            snapshot.categories.len(),
            snapshot.accounts.len()
        );
        Ok(snapshot)
    }

    /// Apply field updates to one transaction
    ///
    /// Merges the update into the raw JSON object so fields this client
    /// does not model survive the round trip. Returns `Ok(false)` when the
    /// id is not present in the current snapshot.
    pub async fn update_transaction(&self, id: &str, update: &TransactionUpdate) -> Result<bool> {
        let diff = self.fetch_diff().await?;
        let server_timestamp = diff
            .get("serverTimestamp")
            .and_then(Value::as_i64)
            .unwrap_or(0);

        let raw = diff
            .get("transaction")
            .and_then(Value::as_array)
            .and_then(|list| {
                list.iter()
                    .find(|t| t.get("id").and_then(Value::as_str) == Some(id))
            })
            .cloned();
        let Some(mut raw) = raw else {
            return Ok(false);
        };

        let object = raw
            .as_object_mut()
            .ok_or_else(|| Error::InvalidData(format!("transaction {} is not a JSON object", id)))?;
        if let Some(category) = &update.category {
            let tags = if category.is_empty() {
                Vec::new()
            } else {
                vec![Value::String(category.clone())]
            };
            object.insert("tag".to_string(), Value::Array(tags));
        }
        if let Some(comment) = &update.comment {
            object.insert("comment".to_string(), Value::String(comment.clone()));
        }
        if let Some(payee) = &update.payee {
            object.insert("payee".to_string(), Value::String(payee.clone()));
        }
        object.insert("changed".to_string(), Value::from(Utc::now().timestamp()));

        let request = UploadRequest {
            server_timestamp,
            current_client_timestamp: Utc::now().timestamp(),
            transaction: vec![raw],
        };
        self.post_diff(&request).await?;
        debug!("Uploaded update for transaction {}", id);
        Ok(true)
    }
}

fn parse_snapshot(diff: &Value) -> Result<Snapshot> {
    let transactions: Vec<Transaction> = match diff.get("transaction") {
        Some(array) => serde_json::from_value(array.clone())?,
        None => Vec::new(),
    };
    let categories: Vec<Category> = match diff.get("tag") {
        Some(array) => serde_json::from_value(array.clone())?,
        None => Vec::new(),
    };
    let accounts: Vec<Account> = match diff.get("account") {
        Some(array) => serde_json::from_value(array.clone())?,
        None => Vec::new(),
    };

    Ok(Snapshot {
        transactions,
        categories: categories.into_iter().map(|c| (c.id.clone(), c)).collect(),
        accounts: accounts.into_iter().map(|a| (a.id.clone(), a)).collect(),
        server_timestamp: diff
            .get("serverTimestamp")
            .and_then(Value::as_i64)
            .unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockZenMoneyServer;
    use serde_json::json;

    fn sample_diff() -> Value {
        json!({
            "serverTimestamp": 1726000000,
            "transaction": [
                {
                    "id": "t1",
                    "date": "2025-01-15",
                    "income": null,
                    "outcome": 1000.0,
                    "payee": "Store",
                    "opIncome": 5.0
                },
                {"id": "t2", "date": "2025-01-16", "income": 250.0, "outcome": 0.0}
            ],
            "tag": [
                {"id": "cat-1", "title": "Groceries"},
                {"id": "cat-2", "title": "Restaurants", "parent": "cat-1"}
            ],
            "account": [
                {"id": "a1", "title": "Card", "balance": 5000.0, "type": "ccard", "currency": "RUB"}
            ]
        })
    }

    #[tokio::test]
    async fn test_fetch_snapshot_parses_diff() {
        let server = MockZenMoneyServer::start(sample_diff()).await;
        let client = ZenMoneyClient::new("test-token", &server.url());

        let snapshot = client.fetch_snapshot().await.unwrap();
        assert_eq!(snapshot.server_timestamp, 1726000000);
        assert_eq!(snapshot.transactions.len(), 2);
        assert_eq!(snapshot.transactions[0].income, 0.0);
        assert_eq!(snapshot.categories["cat-2"].parent.as_deref(), Some("cat-1"));
        assert_eq!(snapshot.accounts["a1"].title, "Card");

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].body["serverTimestamp"], 0);
        assert_eq!(
            requests[0].authorization.as_deref(),
            Some("Bearer test-token")
        );
    }

    #[tokio::test]
    async fn test_fetch_snapshot_defaults_missing_arrays() {
        let server = MockZenMoneyServer::start(json!({"serverTimestamp": 7})).await;
        let client = ZenMoneyClient::new("test-token", &server.url());

        let snapshot = client.fetch_snapshot().await.unwrap();
        assert_eq!(snapshot.server_timestamp, 7);
        assert!(snapshot.transactions.is_empty());
        assert!(snapshot.categories.is_empty());
        assert!(snapshot.accounts.is_empty());
    }

    #[tokio::test]
    async fn test_update_transaction_merges_raw_object() {
        let server = MockZenMoneyServer::start(sample_diff()).await;
        let client = ZenMoneyClient::new("test-token", &server.url());

        let update = TransactionUpdate {
            category: Some("cat-1".to_string()),
            comment: Some("weekly run".to_string()),
            payee: None,
        };
        assert!(client.update_transaction("t1", &update).await.unwrap());

        let requests = server.requests();
        assert_eq!(requests.len(), 2);
        let upload = &requests[1].body;
        assert_eq!(upload["serverTimestamp"], 1726000000);
        let merged = &upload["transaction"][0];
        assert_eq!(merged["id"], "t1");
        assert_eq!(merged["tag"], json!(["cat-1"]));
        assert_eq!(merged["comment"], "weekly run");
        // Unmodeled fields survive the round trip untouched
        assert_eq!(merged["opIncome"], 5.0);
        assert_eq!(merged["payee"], "Store");
        assert!(merged["changed"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_update_transaction_clears_category() {
        let server = MockZenMoneyServer::start(sample_diff()).await;
        let client = ZenMoneyClient::new("test-token", &server.url());

        let update = TransactionUpdate {
            category: Some(String::new()),
            ..Default::default()
        };
        assert!(client.update_transaction("t2", &update).await.unwrap());

        let upload = &server.requests()[1].body;
        assert_eq!(upload["transaction"][0]["tag"], json!([]));
    }

    #[tokio::test]
    async fn test_update_transaction_unknown_id() {
        let server = MockZenMoneyServer::start(sample_diff()).await;
        let client = ZenMoneyClient::new("test-token", &server.url());

        let update = TransactionUpdate {
            comment: Some("x".to_string()),
            ..Default::default()
        };
        assert!(!client.update_transaction("missing", &update).await.unwrap());
        // Nothing uploaded after the failed lookup
        assert_eq!(server.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_http_error_surfaces() {
        let server = MockZenMoneyServer::start_with_status(401).await;
        let client = ZenMoneyClient::new("bad-token", &server.url());

        let err = client.fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }

    #[test]
    fn test_update_field_names() {
        let update = TransactionUpdate {
            category: Some("cat-1".to_string()),
            payee: Some("New".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
        assert_eq!(update.field_names(), ["category", "payee"]);
        assert!(TransactionUpdate::default().is_empty());
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let client = ZenMoneyClient::new("t", "https://api.zenmoney.ru/");
        assert_eq!(client.base_url(), "https://api.zenmoney.ru");
    }

    #[test]
    fn test_from_env_without_token() {
        // When ZENMONEY_TOKEN is not set, from_env returns None
        std::env::remove_var("ZENMONEY_TOKEN");
        assert!(ZenMoneyClient::from_env().is_none());
    }
}
