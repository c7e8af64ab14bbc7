//! Aggregation helpers
//!
//! Pure folds over an already-filtered transaction list: group-and-sum by
//! category or payee, period totals, and duplicate detection. Transfers are
//! excluded from every income/expense aggregate.

use std::collections::HashMap;

use crate::models::{Category, Transaction};

/// Amount difference treated as equal when hunting duplicates
const DUPLICATE_TOLERANCE: f64 = 0.01;

/// Fallback key for income records without a payee
pub const UNKNOWN_SOURCE: &str = "Unknown source";

/// Accumulated totals for one group key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupStats {
    pub count: usize,
    pub income: f64,
    pub outcome: f64,
}

impl GroupStats {
    /// Net balance of the group, income minus outcome
    pub fn balance(&self) -> f64 {
        self.income - self.outcome
    }
}

/// Group non-transfer records by resolved category display name.
/// Income records add to the income sum, expenses to the outcome sum.
pub fn group_by_category(
    transactions: &[Transaction],
    categories: &HashMap<String, Category>,
) -> HashMap<String, GroupStats> {
    let mut groups: HashMap<String, GroupStats> = HashMap::new();
    for t in transactions {
        if t.is_transfer() {
            continue;
        }
        let stats = groups.entry(t.category_name(categories)).or_default();
        stats.count += 1;
        if t.is_income() {
            stats.income += t.income;
        } else if t.is_expense() {
            stats.outcome += t.outcome;
        }
    }
    groups
}

/// Group expense records by payee. Records without a payee are skipped,
/// not bucketed under a placeholder.
pub fn group_expenses_by_payee(transactions: &[Transaction]) -> HashMap<String, GroupStats> {
    let mut groups: HashMap<String, GroupStats> = HashMap::new();
    for t in transactions {
        if !t.is_expense() {
            continue;
        }
        let Some(payee) = t.payee.as_deref().filter(|p| !p.is_empty()) else {
            continue;
        };
        let stats = groups.entry(payee.to_string()).or_default();
        stats.count += 1;
        stats.outcome += t.outcome;
    }
    groups
}

/// Group income records by payee, falling back to [`UNKNOWN_SOURCE`]
pub fn group_income_by_source(transactions: &[Transaction]) -> HashMap<String, GroupStats> {
    let mut groups: HashMap<String, GroupStats> = HashMap::new();
    for t in transactions {
        if !t.is_income() {
            continue;
        }
        let source = t
            .payee
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(UNKNOWN_SOURCE);
        let stats = groups.entry(source.to_string()).or_default();
        stats.count += 1;
        stats.income += t.income;
    }
    groups
}

/// Income, expense, and transfer totals over one filtered window
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowTotals {
    pub income_total: f64,
    pub income_count: usize,
    pub expense_total: f64,
    pub expense_count: usize,
    pub transfer_count: usize,
}

impl FlowTotals {
    pub fn net(&self) -> f64 {
        self.income_total - self.expense_total
    }
}

pub fn flow_totals(transactions: &[Transaction]) -> FlowTotals {
    let mut totals = FlowTotals::default();
    for t in transactions {
        if t.is_transfer() {
            totals.transfer_count += 1;
        } else if t.is_income() {
            totals.income_count += 1;
            totals.income_total += t.income;
        } else if t.is_expense() {
            totals.expense_count += 1;
            totals.expense_total += t.outcome;
        }
    }
    totals
}

/// Headline numbers for the period analysis tool
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodSummary {
    pub transaction_count: usize,
    pub total_income: f64,
    pub total_expenses: f64,
    /// Records with no raw `category` reference, matching what the
    /// uncategorized filter would return for the same window
    pub uncategorized_count: usize,
}

impl PeriodSummary {
    pub fn balance(&self) -> f64 {
        self.total_income - self.total_expenses
    }
}

pub fn summarize_period(transactions: &[Transaction]) -> PeriodSummary {
    let totals = flow_totals(transactions);
    PeriodSummary {
        transaction_count: transactions.len(),
        total_income: totals.income_total,
        total_expenses: totals.expense_total,
        uncategorized_count: transactions
            .iter()
            .filter(|t| t.category.as_deref().unwrap_or("").is_empty())
            .count(),
    }
}

/// Greedy O(n²) duplicate scan
///
/// Two records are duplicate candidates when they share the same date, their
/// signed amounts differ by at most 0.01, and their payees are identical
/// (both absent counts as identical). Each record joins at most one group,
/// first match in order of appearance; singleton groups are dropped.
pub fn find_duplicates(transactions: &[Transaction]) -> Vec<Vec<Transaction>> {
    let mut groups = Vec::new();
    let mut processed = vec![false; transactions.len()];

    for i in 0..transactions.len() {
        if processed[i] {
            continue;
        }
        let mut group = vec![transactions[i].clone()];
        for j in (i + 1)..transactions.len() {
            if processed[j] {
                continue;
            }
            let a = &transactions[i];
            let b = &transactions[j];
            if a.date == b.date
                && (a.amount() - b.amount()).abs() <= DUPLICATE_TOLERANCE
                && a.payee == b.payee
            {
                group.push(b.clone());
                processed[j] = true;
            }
        }
        if group.len() > 1 {
            processed[i] = true;
            groups.push(group);
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UNCATEGORIZED;

    fn tx(id: &str, date: &str, income: f64, outcome: f64) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: date.to_string(),
            income,
            outcome,
            ..Default::default()
        }
    }

    fn with_payee(mut t: Transaction, payee: &str) -> Transaction {
        t.payee = Some(payee.to_string());
        t
    }

    fn categories() -> HashMap<String, Category> {
        let mut map = HashMap::new();
        map.insert(
            "cat-1".to_string(),
            Category {
                id: "cat-1".to_string(),
                title: "Groceries".to_string(),
                parent: None,
            },
        );
        map
    }

    #[test]
    fn test_uncategorized_records_group_together() {
        // Expense of 1000 and income of 1000, neither categorized
        let txs = vec![
            with_payee(tx("t1", "2025-01-15", 0.0, 1000.0), "Store"),
            with_payee(tx("t2", "2025-01-15", 1000.0, 0.0), "Employer"),
        ];
        let groups = group_by_category(&txs, &HashMap::new());
        assert_eq!(groups.len(), 1);
        let stats = &groups[UNCATEGORIZED];
        assert_eq!(stats.count, 2);
        assert_eq!(stats.income, 1000.0);
        assert_eq!(stats.outcome, 1000.0);
        assert_eq!(stats.balance(), 0.0);
    }

    #[test]
    fn test_transfers_are_excluded_from_category_groups() {
        let mut transfer = tx("t3", "2025-02-01", 500.0, 500.0);
        transfer.income_account = Some("A".to_string());
        transfer.outcome_account = Some("B".to_string());
        let txs = vec![transfer, tx("t4", "2025-02-01", 0.0, 100.0)];
        let groups = group_by_category(&txs, &HashMap::new());
        let stats = &groups[UNCATEGORIZED];
        assert_eq!(stats.count, 1);
        assert_eq!(stats.income, 0.0);
        assert_eq!(stats.outcome, 100.0);
    }

    #[test]
    fn test_wash_entry_adds_to_outcome_only() {
        let txs = vec![tx("wash", "2025-03-01", 100.0, 100.0)];
        let groups = group_by_category(&txs, &HashMap::new());
        let stats = &groups[UNCATEGORIZED];
        assert_eq!(stats.income, 0.0);
        assert_eq!(stats.outcome, 100.0);
    }

    #[test]
    fn test_group_by_category_uses_resolved_titles() {
        let mut t = tx("t1", "2025-01-10", 0.0, 250.0);
        t.category = Some("cat-1".to_string());
        let groups = group_by_category(&[t], &categories());
        assert!(groups.contains_key("Groceries"));
    }

    #[test]
    fn test_group_expenses_by_payee_skips_missing_payee() {
        let txs = vec![
            with_payee(tx("t1", "2025-01-01", 0.0, 100.0), "Magnit"),
            with_payee(tx("t2", "2025-01-02", 0.0, 50.0), "Magnit"),
            tx("t3", "2025-01-03", 0.0, 999.0),
            with_payee(tx("t4", "2025-01-04", 200.0, 0.0), "Magnit"),
        ];
        let groups = group_expenses_by_payee(&txs);
        assert_eq!(groups.len(), 1);
        let stats = &groups["Magnit"];
        assert_eq!(stats.count, 2);
        assert_eq!(stats.outcome, 150.0);
    }

    #[test]
    fn test_group_income_by_source_fallback() {
        let txs = vec![
            with_payee(tx("t1", "2025-01-01", 1000.0, 0.0), "Employer"),
            tx("t2", "2025-01-02", 500.0, 0.0),
        ];
        let groups = group_income_by_source(&txs);
        assert_eq!(groups["Employer"].income, 1000.0);
        assert_eq!(groups[UNKNOWN_SOURCE].income, 500.0);
    }

    #[test]
    fn test_flow_totals() {
        let mut transfer = tx("t", "2025-01-05", 300.0, 300.0);
        transfer.income_account = Some("A".to_string());
        transfer.outcome_account = Some("B".to_string());
        let txs = vec![
            tx("i1", "2025-01-01", 1000.0, 0.0),
            tx("e1", "2025-01-02", 0.0, 400.0),
            tx("e2", "2025-01-03", 0.0, 100.0),
            transfer,
        ];
        let totals = flow_totals(&txs);
        assert_eq!(totals.income_total, 1000.0);
        assert_eq!(totals.income_count, 1);
        assert_eq!(totals.expense_total, 500.0);
        assert_eq!(totals.expense_count, 2);
        assert_eq!(totals.transfer_count, 1);
        assert_eq!(totals.net(), 500.0);
    }

    #[test]
    fn test_summarize_period_counts_uncategorized() {
        let mut categorized = tx("c", "2025-01-01", 0.0, 50.0);
        categorized.category = Some("cat-1".to_string());
        let txs = vec![
            categorized,
            tx("u1", "2025-01-02", 0.0, 20.0),
            tx("u2", "2025-01-03", 100.0, 0.0),
        ];
        let summary = summarize_period(&txs);
        assert_eq!(summary.transaction_count, 3);
        assert_eq!(summary.total_income, 100.0);
        assert_eq!(summary.total_expenses, 70.0);
        assert_eq!(summary.uncategorized_count, 2);
        assert_eq!(summary.balance(), 30.0);
    }

    #[test]
    fn test_duplicates_grouped_within_tolerance() {
        let txs = vec![
            with_payee(tx("a", "2025-01-10", 0.0, 100.0), "Shop"),
            with_payee(tx("b", "2025-01-10", 0.0, 100.005), "Shop"),
        ];
        let groups = find_duplicates(&txs);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
    }

    #[test]
    fn test_duplicates_not_grouped_outside_tolerance() {
        let txs = vec![
            with_payee(tx("a", "2025-01-10", 0.0, 100.0), "Shop"),
            with_payee(tx("b", "2025-01-10", 0.0, 100.02), "Shop"),
        ];
        assert!(find_duplicates(&txs).is_empty());
    }

    #[test]
    fn test_duplicates_require_identical_payee() {
        let txs = vec![
            with_payee(tx("a", "2025-01-10", 0.0, 100.0), "Shop"),
            with_payee(tx("b", "2025-01-10", 0.0, 100.0), "Other"),
        ];
        assert!(find_duplicates(&txs).is_empty());

        // Both payees absent counts as identical
        let bare = vec![
            tx("c", "2025-01-11", 0.0, 100.0),
            tx("d", "2025-01-11", 0.0, 100.0),
        ];
        assert_eq!(find_duplicates(&bare).len(), 1);
    }

    #[test]
    fn test_duplicates_require_same_date() {
        let txs = vec![
            with_payee(tx("a", "2025-01-10", 0.0, 100.0), "Shop"),
            with_payee(tx("b", "2025-01-11", 0.0, 100.0), "Shop"),
        ];
        assert!(find_duplicates(&txs).is_empty());
    }

    #[test]
    fn test_duplicate_grouping_is_greedy_first_match() {
        // b joins a's group; c is only within tolerance of b, and b is
        // already taken, so c stays a singleton
        let txs = vec![
            with_payee(tx("a", "2025-01-10", 0.0, 100.000), "Shop"),
            with_payee(tx("b", "2025-01-10", 0.0, 100.009), "Shop"),
            with_payee(tx("c", "2025-01-10", 0.0, 100.018), "Shop"),
        ];
        let groups = find_duplicates(&txs);
        assert_eq!(groups.len(), 1);
        let ids: Vec<&str> = groups[0].iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }
}
