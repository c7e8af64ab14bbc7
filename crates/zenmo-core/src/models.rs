//! Domain models for Zenmo
//!
//! Wire-format structs for the ZenMoney diff API plus the classification
//! rules that label a transaction as income, expense, or transfer.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Label used wherever a transaction has no resolvable category.
/// The same constant drives grouping, display, and name-based filtering.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Default tolerance when matching the two legs of a split transfer
pub const PAIRING_TOLERANCE: f64 = 0.01;

/// One ledger entry from the ZenMoney diff API
///
/// Wire field names are camelCase (`incomeAccount`, `qrCode`). Absent or
/// null amounts normalize to 0 here, at deserialization, so the
/// classification predicates never have to handle missing values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    /// ISO `YYYY-MM-DD`; fixed width, so string order equals date order
    pub date: String,
    #[serde(default, deserialize_with = "null_to_zero")]
    pub income: f64,
    #[serde(default, deserialize_with = "null_to_zero")]
    pub outcome: f64,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub income_account: Option<String>,
    #[serde(default)]
    pub outcome_account: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Ordered category references; the first entry is the fallback when
    /// `category` is absent or unknown
    #[serde(default)]
    pub tag: Option<Vec<String>>,
    #[serde(default)]
    pub payee: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    /// Raw fiscal receipt query string (`t=...&s=...&fn=...`)
    #[serde(default)]
    pub qr_code: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub original_payee: Option<String>,
}

/// ZenMoney sends `null` for amounts it considers unset
fn null_to_zero<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

impl Transaction {
    /// Signed amount: positive for income, negative for expenses
    pub fn amount(&self) -> f64 {
        self.income - self.outcome
    }

    /// A transfer moves money between two distinct accounts
    pub fn is_transfer(&self) -> bool {
        match (&self.income_account, &self.outcome_account) {
            (Some(from), Some(to)) => from != to,
            _ => false,
        }
    }

    /// Any positive outcome that is not a transfer counts as an expense,
    /// including wash entries where income is also positive
    pub fn is_expense(&self) -> bool {
        self.outcome > 0.0 && !self.is_transfer()
    }

    /// Income requires a positive income amount with no outcome; a record
    /// with both amounts positive classifies as expense, never income
    pub fn is_income(&self) -> bool {
        self.income > 0.0 && !self.is_transfer() && self.outcome <= 0.0
    }

    /// Classified operation type
    pub fn kind(&self) -> TransactionKind {
        if self.is_transfer() {
            TransactionKind::Transfer
        } else if self.is_income() {
            TransactionKind::Income
        } else if self.is_expense() {
            TransactionKind::Expense
        } else {
            TransactionKind::Other
        }
    }

    /// Whether this record and `other` look like the two single-leg halves
    /// of one transfer the source system failed to merge: same date, one
    /// pure outcome leg and one pure income leg, amounts within tolerance
    pub fn is_paired_with(&self, other: &Transaction) -> bool {
        self.is_paired_within(other, PAIRING_TOLERANCE)
    }

    /// Pairing check with an explicit amount tolerance
    pub fn is_paired_within(&self, other: &Transaction, tolerance: f64) -> bool {
        if self.date != other.date {
            return false;
        }
        let outgoing_leg = |a: &Transaction, b: &Transaction| {
            a.outcome > 0.0
                && b.income > 0.0
                && a.income == 0.0
                && b.outcome == 0.0
                && (a.outcome - b.income).abs() <= tolerance
        };
        outgoing_leg(self, other) || outgoing_leg(other, self)
    }

    /// Category title shown for this transaction: the `category` reference
    /// if known, else the first `tag` entry if known, else the
    /// uncategorized label
    pub fn category_name(&self, categories: &HashMap<String, Category>) -> String {
        if let Some(id) = &self.category {
            if let Some(cat) = categories.get(id) {
                return cat.title.clone();
            }
        }
        if let Some(first) = self.tag.as_ref().and_then(|tags| tags.first()) {
            if let Some(cat) = categories.get(first) {
                return cat.title.clone();
            }
        }
        UNCATEGORIZED.to_string()
    }
}

/// Classified operation type derived from amounts and account references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
    Transfer,
    Other,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Transfer => "transfer",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A spending category
///
/// ZenMoney calls these tags on the wire; they form a two-level forest of
/// parents and their direct children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub parent: Option<String>,
}

impl Category {
    pub fn is_parent(&self) -> bool {
        self.parent.is_none()
    }
}

/// A money account, lookup entity only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub balance: f64,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "RUB".to_string()
}
