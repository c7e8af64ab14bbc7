//! Transaction filtering
//!
//! Narrows a snapshot's transaction list by date and category. An explicit
//! `date_from`/`date_to` range always wins over year/month/day fields, even
//! when both are populated.

use std::collections::{HashMap, HashSet};

use crate::models::{Category, Transaction};

/// Requested slice of the transaction history, built fresh per request
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
    /// Exact-day match; only honored together with `month`
    pub day: Option<u32>,
    /// Inclusive `YYYY-MM-DD` lower bound
    pub date_from: Option<String>,
    /// Inclusive `YYYY-MM-DD` upper bound
    pub date_to: Option<String>,
    /// Raw category references; empty means no category restriction
    pub category_ids: HashSet<String>,
    /// Keep only records with no `category` reference at all
    pub uncategorized_only: bool,
}

/// Order-preserving filter pass over `transactions`
///
/// Dates are fixed-width ISO strings, so lexicographic comparison is
/// chronological comparison and prefix match selects a year or month.
pub fn filter_transactions(
    transactions: &[Transaction],
    filter: &TransactionFilter,
) -> Vec<Transaction> {
    let mut filtered: Vec<Transaction> = transactions.to_vec();

    if filter.date_from.is_some() || filter.date_to.is_some() {
        filtered.retain(|t| {
            let from_ok = filter
                .date_from
                .as_ref()
                .map_or(true, |from| t.date.as_str() >= from.as_str());
            let to_ok = filter
                .date_to
                .as_ref()
                .map_or(true, |to| t.date.as_str() <= to.as_str());
            from_ok && to_ok
        });
    } else if let Some(year) = filter.year {
        match (filter.month, filter.day) {
            (Some(month), Some(day)) => {
                let exact = format!("{}-{:02}-{:02}", year, month, day);
                filtered.retain(|t| t.date == exact);
            }
            (Some(month), _) => {
                let prefix = format!("{}-{:02}", year, month);
                filtered.retain(|t| t.date.starts_with(&prefix));
            }
            _ => {
                let prefix = year.to_string();
                filtered.retain(|t| t.date.starts_with(&prefix));
            }
        }
    }

    if filter.uncategorized_only {
        filtered.retain(|t| t.category.as_deref().unwrap_or("").is_empty());
    }

    if !filter.category_ids.is_empty() {
        filtered.retain(|t| {
            t.category
                .as_ref()
                .map_or(false, |id| filter.category_ids.contains(id))
        });
    }

    filtered
}

/// Keep only transactions whose payee contains `query`, case-insensitively.
/// Records without a payee never match.
pub fn filter_by_payee(transactions: &[Transaction], query: &str) -> Vec<Transaction> {
    let needle = query.to_lowercase();
    transactions
        .iter()
        .filter(|t| {
            t.payee
                .as_ref()
                .map_or(false, |p| p.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Resolve user-supplied category tokens into the set of accepted display
/// names. Each token may be a raw category reference, a human-entered title
/// (matched case-insensitively), or a literal pseudo-title kept as-is.
pub fn resolve_category_tokens(
    tokens: &[String],
    categories: &HashMap<String, Category>,
) -> HashSet<String> {
    let mut accepted = HashSet::new();
    for token in tokens {
        if let Some(cat) = categories.get(token) {
            accepted.insert(cat.title.clone());
        } else if let Some(cat) = categories
            .values()
            .find(|c| c.title.to_lowercase() == token.to_lowercase())
        {
            accepted.insert(cat.title.clone());
        } else {
            accepted.insert(token.clone());
        }
    }
    accepted
}

/// Name-or-id category filter used by the transaction listing. A transaction
/// passes when its resolved display name is among the accepted titles.
pub fn filter_by_category_names(
    transactions: &[Transaction],
    tokens: &[String],
    categories: &HashMap<String, Category>,
) -> Vec<Transaction> {
    if tokens.is_empty() {
        return transactions.to_vec();
    }
    let accepted = resolve_category_tokens(tokens, categories);
    transactions
        .iter()
        .filter(|t| accepted.contains(&t.category_name(categories)))
        .cloned()
        .collect()
}
