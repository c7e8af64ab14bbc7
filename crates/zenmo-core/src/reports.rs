//! Report renderers
//!
//! Each renderer takes an already-filtered transaction window plus the
//! category map and returns the finished report text. Period labels are
//! produced by the caller via [`crate::format::describe_period`].

use std::collections::HashMap;

use crate::analysis::{
    find_duplicates, flow_totals, group_by_category, group_expenses_by_payee,
    group_income_by_source, summarize_period, GroupStats,
};
use crate::format::{fmt_money, fmt_money_signed, format_transaction_list, truncate};
use crate::models::{Category, Transaction};

/// Sources shown in the income report before cutting off
const TOP_SOURCES: usize = 10;

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn sorted_by_outcome(groups: HashMap<String, GroupStats>) -> Vec<(String, GroupStats)> {
    let mut rows: Vec<_> = groups.into_iter().collect();
    rows.sort_by(|a, b| b.1.outcome.total_cmp(&a.1.outcome).then(a.0.cmp(&b.0)));
    rows
}

fn sorted_by_income(groups: HashMap<String, GroupStats>) -> Vec<(String, GroupStats)> {
    let mut rows: Vec<_> = groups.into_iter().collect();
    rows.sort_by(|a, b| b.1.income.total_cmp(&a.1.income).then(a.0.cmp(&b.0)));
    rows
}

/// Expense totals with a per-category breakdown
pub fn spending_report(
    transactions: &[Transaction],
    categories: &HashMap<String, Category>,
    period: &str,
) -> String {
    let totals = flow_totals(transactions);
    if totals.expense_count == 0 {
        return format!("No expenses found for {}", period);
    }

    let mut out = format!("📊 Spending report for {}\n\n", period);
    out.push_str(&format!("Total spent: {}\n", fmt_money(totals.expense_total)));
    out.push_str(&format!("Transactions: {}\n", totals.expense_count));
    out.push_str(&format!(
        "Average: {}\n",
        fmt_money(totals.expense_total / totals.expense_count as f64)
    ));

    out.push_str("\nBy category:\n");
    for (name, stats) in sorted_by_outcome(group_by_category(transactions, categories)) {
        if stats.outcome > 0.0 {
            out.push_str(&format!(
                "  {}: {} ({})\n",
                name,
                fmt_money(stats.outcome),
                stats.count
            ));
        }
    }
    out.trim_end().to_string()
}

/// Per-category income/expense/balance table, sorted by outcome
pub fn category_breakdown(
    transactions: &[Transaction],
    categories: &HashMap<String, Category>,
    period: &str,
) -> String {
    let rows = sorted_by_outcome(group_by_category(transactions, categories));
    let rows: Vec<_> = rows
        .into_iter()
        .filter(|(_, stats)| stats.income > 0.0 || stats.outcome > 0.0)
        .collect();
    if rows.is_empty() {
        return format!("No transactions found for {}", period);
    }

    let mut out = format!("📊 Category breakdown for {}\n\n", period);
    for (name, stats) in rows {
        out.push_str(&format!("{} ({})\n", name, stats.count));
        out.push_str(&format!(
            "  Income: {} | Expenses: {} | Balance: {}\n\n",
            fmt_money(stats.income),
            fmt_money(stats.outcome),
            fmt_money_signed(stats.balance())
        ));
    }
    out.trim_end().to_string()
}

/// All-time merchant listing for the data tool, limited by the caller
pub fn merchant_list(transactions: &[Transaction], limit: usize) -> String {
    let rows = sorted_by_outcome(group_expenses_by_payee(transactions));
    if rows.is_empty() {
        return "No merchants found".to_string();
    }

    let total = rows.len();
    let mut out = format!("🏪 Merchants ({} total)\n\n", total);
    for (i, (payee, stats)) in rows.iter().take(limit).enumerate() {
        out.push_str(&format!(
            "{:2}. {}: {} ({})\n",
            i + 1,
            truncate(payee, 25),
            fmt_money(stats.outcome),
            stats.count
        ));
    }
    if total > limit {
        out.push_str(&format!("\n... and {} more\n", total - limit));
    }
    out.trim_end().to_string()
}

/// Top merchants by spend with purchase counts and average check
pub fn merchant_analysis(transactions: &[Transaction], period: &str, top: usize) -> String {
    let rows = sorted_by_outcome(group_expenses_by_payee(transactions));
    if rows.is_empty() {
        return format!("No merchant data found for {}", period);
    }

    let mut out = format!("🏪 Top merchants for {}\n\n", period);
    for (i, (payee, stats)) in rows.iter().take(top).enumerate() {
        out.push_str(&format!(
            "{:2}. {}: {} ({} purchase{}, avg {})\n",
            i + 1,
            truncate(payee, 25),
            fmt_money(stats.outcome),
            stats.count,
            plural(stats.count),
            fmt_money(stats.outcome / stats.count as f64)
        ));
    }
    out.trim_end().to_string()
}

/// Income totals, top sources, and per-category income sums
pub fn income_report(
    transactions: &[Transaction],
    categories: &HashMap<String, Category>,
    period: &str,
) -> String {
    let totals = flow_totals(transactions);
    if totals.income_count == 0 {
        return format!("No income found for {}", period);
    }

    let mut out = format!("💰 Income report for {}\n\n", period);
    out.push_str(&format!("Total income: {}\n", fmt_money(totals.income_total)));
    out.push_str(&format!("Payments: {}\n", totals.income_count));
    out.push_str(&format!(
        "Average: {}\n",
        fmt_money(totals.income_total / totals.income_count as f64)
    ));

    out.push_str("\nTop sources:\n");
    let sources = sorted_by_income(group_income_by_source(transactions));
    for (i, (source, stats)) in sources.iter().take(TOP_SOURCES).enumerate() {
        out.push_str(&format!(
            "{:2}. {}: {} ({} payment{}, avg {})\n",
            i + 1,
            source,
            fmt_money(stats.income),
            stats.count,
            plural(stats.count),
            fmt_money(stats.income / stats.count as f64)
        ));
    }

    out.push_str("\nBy category:\n");
    for (name, stats) in sorted_by_income(group_by_category(transactions, categories)) {
        if stats.income > 0.0 {
            out.push_str(&format!("  {}: {}\n", name, fmt_money(stats.income)));
        }
    }
    out.trim_end().to_string()
}

/// Income vs expense totals with a net-flow verdict
pub fn cash_flow_report(transactions: &[Transaction], period: &str) -> String {
    if transactions.is_empty() {
        return format!("No transactions found for {}", period);
    }
    let totals = flow_totals(transactions);

    let mut out = format!("💰 Cash flow for {}\n\n", period);
    out.push_str(&format!(
        "Income: {} ({})\n",
        fmt_money(totals.income_total),
        totals.income_count
    ));
    out.push_str(&format!(
        "Expenses: {} ({})\n",
        fmt_money(totals.expense_total),
        totals.expense_count
    ));
    out.push_str(&format!("Transfers: {}\n", totals.transfer_count));
    out.push_str(&format!("Net flow: {}\n", fmt_money_signed(totals.net())));

    let net = totals.net();
    if net > 0.0 {
        out.push_str("\n✅ Positive cash flow: income exceeds expenses\n");
    } else if net < 0.0 {
        out.push_str("\n⚠️ Negative cash flow: expenses exceed income\n");
    } else {
        out.push_str("\nBalanced cash flow\n");
    }

    if totals.income_count > 0 && totals.expense_count > 0 {
        out.push_str(&format!(
            "\nAverage income: {}\n",
            fmt_money(totals.income_total / totals.income_count as f64)
        ));
        out.push_str(&format!(
            "Average expense: {}\n",
            fmt_money(totals.expense_total / totals.expense_count as f64)
        ));
        out.push_str(&format!(
            "Income/expense ratio: {:.2}\n",
            totals.income_total / totals.expense_total
        ));
    }
    out.trim_end().to_string()
}

/// Headline numbers for one period
pub fn period_analysis(transactions: &[Transaction], period: &str) -> String {
    if transactions.is_empty() {
        return format!("No transactions found for {}", period);
    }
    let summary = summarize_period(transactions);
    let mut out = format!("📊 Analysis for {}\n\n", period);
    out.push_str(&format!("Transactions: {}\n", summary.transaction_count));
    out.push_str(&format!("Income: {}\n", fmt_money(summary.total_income)));
    out.push_str(&format!("Expenses: {}\n", fmt_money(summary.total_expenses)));
    out.push_str(&format!("Balance: {}\n", fmt_money_signed(summary.balance())));
    out.push_str(&format!("Uncategorized: {}", summary.uncategorized_count));
    out
}

/// Numbered listing of records that still need a category
pub fn uncategorized_report(transactions: &[Transaction], period: &str) -> String {
    if transactions.is_empty() {
        return format!("✅ All transactions are categorized for {}", period);
    }
    format!(
        "🔍 Uncategorized transactions for {}\n\n{}",
        period,
        format_transaction_list(transactions, 50, true)
    )
}

/// Duplicate groups, one block per group with ids for cleanup
pub fn duplicates_report(transactions: &[Transaction], period: &str) -> String {
    let groups = find_duplicates(transactions);
    if groups.is_empty() {
        return format!("✅ No duplicates found for {}", period);
    }

    let mut out = format!(
        "🔍 Found {} duplicate group{} for {}\n",
        groups.len(),
        plural(groups.len()),
        period
    );
    for (i, group) in groups.iter().enumerate() {
        out.push_str(&format!("\nGroup {}:\n", i + 1));
        for t in group {
            let payee = t.payee.as_deref().unwrap_or("");
            out.push_str(&format!(
                "  {} | {:>14} | {} | ID: {}\n",
                t.date,
                fmt_money_signed(t.amount()),
                truncate(payee, 25),
                t.id
            ));
        }
    }
    out.trim_end().to_string()
}
