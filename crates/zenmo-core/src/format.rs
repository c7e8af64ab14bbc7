//! Text rendering for tool output
//!
//! Every tool returns plain text meant for a chat window. Amounts render
//! with thousands separators and a ruble suffix; lists are numbered and
//! truncated with an overflow line.

use std::collections::HashMap;

use crate::filter::TransactionFilter;
use crate::models::{Account, Category, Transaction, TransactionKind};

/// Two decimals with comma thousands separators, no currency suffix
pub fn fmt_number(amount: f64) -> String {
    let formatted = format!("{:.2}", amount);
    let (sign, rest) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some(parts) => parts,
        None => (rest, "00"),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Amount with the ruble suffix: `1,234.50 ₽`
pub fn fmt_money(amount: f64) -> String {
    format!("{} ₽", fmt_number(amount))
}

/// Like [`fmt_money`] but positive amounts carry an explicit `+`
pub fn fmt_money_signed(amount: f64) -> String {
    if amount > 0.0 {
        format!("+{} ₽", fmt_number(amount))
    } else {
        fmt_money(amount)
    }
}

/// Hard character cut, safe on multibyte payee names
pub fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Human description of the requested window, mirroring the filter
/// priority: explicit range first, then year/month/day, else "all time"
pub fn describe_period(filter: &TransactionFilter) -> String {
    match (&filter.date_from, &filter.date_to) {
        (Some(from), Some(to)) => return format!("{} to {}", from, to),
        (Some(from), None) => return format!("from {}", from),
        (None, Some(to)) => return format!("until {}", to),
        (None, None) => {}
    }
    if let Some(year) = filter.year {
        return match (filter.month, filter.day) {
            (Some(month), Some(day)) => format!("{}-{:02}-{:02}", year, month, day),
            (Some(month), None) => format!("{}-{:02}", year, month),
            _ => year.to_string(),
        };
    }
    "all time".to_string()
}

/// Numbered transaction list with a count header and overflow line
pub fn format_transaction_list(
    transactions: &[Transaction],
    limit: usize,
    show_ids: bool,
) -> String {
    if transactions.is_empty() {
        return "No transactions found".to_string();
    }
    let total = transactions.len();
    let plural = if total == 1 { "" } else { "s" };
    let mut out = format!("Found {} transaction{}:\n\n", total, plural);
    for (i, t) in transactions.iter().take(limit).enumerate() {
        let payee = t.payee.as_deref().unwrap_or("");
        out.push_str(&format!(
            "{:2}. {} | {:>14} | {}",
            i + 1,
            t.date,
            fmt_money_signed(t.amount()),
            truncate(payee, 25)
        ));
        if show_ids {
            out.push_str(&format!(" | ID: {}", t.id));
        }
        out.push('\n');
    }
    if total > limit {
        out.push_str(&format!("\n... and {} more\n", total - limit));
    }
    out.trim_end().to_string()
}

/// Two-level category tree: parents alphabetically with their children
/// indented, then categories whose parent reference resolves to nothing
pub fn format_categories(categories: &HashMap<String, Category>) -> String {
    if categories.is_empty() {
        return "No categories found".to_string();
    }

    let mut parents: Vec<&Category> = categories.values().filter(|c| c.is_parent()).collect();
    parents.sort_by(|a, b| a.title.cmp(&b.title));

    let mut children: HashMap<&str, Vec<&Category>> = HashMap::new();
    let mut orphans: Vec<&Category> = Vec::new();
    for cat in categories.values() {
        if let Some(parent) = &cat.parent {
            if categories.contains_key(parent) {
                children.entry(parent.as_str()).or_default().push(cat);
            } else {
                orphans.push(cat);
            }
        }
    }
    for list in children.values_mut() {
        list.sort_by(|a, b| a.title.cmp(&b.title));
    }
    orphans.sort_by(|a, b| a.title.cmp(&b.title));

    let child_count = categories.len() - parents.len();
    let mut out = format!(
        "📂 Categories ({} total: {} parents, {} children)\n\n",
        categories.len(),
        parents.len(),
        child_count
    );
    for parent in &parents {
        out.push_str(&format!("{} (ID: {})\n", parent.title, parent.id));
        if let Some(kids) = children.get(parent.id.as_str()) {
            for kid in kids {
                out.push_str(&format!("    └─ {} (ID: {})\n", kid.title, kid.id));
            }
        }
    }
    if !orphans.is_empty() {
        out.push_str("\nOrphaned categories (parent not found):\n");
        for cat in &orphans {
            out.push_str(&format!(
                "{} (ID: {}) [parent: {}]\n",
                cat.title,
                cat.id,
                cat.parent.as_deref().unwrap_or("?")
            ));
        }
    }
    out.trim_end().to_string()
}

/// Numbered account list with type, balance, and currency
pub fn format_accounts(accounts: &HashMap<String, Account>) -> String {
    if accounts.is_empty() {
        return "No accounts found".to_string();
    }
    let mut sorted: Vec<&Account> = accounts.values().collect();
    sorted.sort_by(|a, b| a.title.cmp(&b.title));
    let mut out = format!("💼 Accounts ({})\n\n", sorted.len());
    for (i, acc) in sorted.iter().enumerate() {
        out.push_str(&format!(
            "{:2}. {} ({}): {} {}\n",
            i + 1,
            acc.title,
            acc.kind,
            fmt_number(acc.balance),
            acc.currency
        ));
    }
    out.trim_end().to_string()
}

/// Fields parsed out of a fiscal-receipt QR query string
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Receipt {
    pub time: Option<String>,
    pub sum: Option<String>,
    pub fiscal_number: Option<String>,
    pub document: Option<String>,
    pub fiscal_sign: Option<String>,
}

/// Parse the `&`-separated receipt query string (`t=...&s=...&fn=...`).
/// Unknown keys and malformed segments are ignored.
pub fn parse_qr(qr: &str) -> Receipt {
    let mut receipt = Receipt::default();
    for segment in qr.split('&') {
        let Some((key, value)) = segment.split_once('=') else {
            continue;
        };
        match key {
            "t" => receipt.time = Some(value.to_string()),
            "s" => receipt.sum = Some(value.to_string()),
            "fn" => receipt.fiscal_number = Some(value.to_string()),
            "i" => receipt.document = Some(value.to_string()),
            "fp" => receipt.fiscal_sign = Some(value.to_string()),
            _ => {}
        }
    }
    receipt
}

fn account_title<'a>(accounts: &'a HashMap<String, Account>, id: &'a str) -> &'a str {
    accounts.get(id).map(|a| a.title.as_str()).unwrap_or(id)
}

/// Full field dump for one transaction
pub fn format_transaction_detail(
    t: &Transaction,
    categories: &HashMap<String, Category>,
    accounts: &HashMap<String, Account>,
) -> String {
    let mut out = String::from("📋 Transaction Details\n\n");
    out.push_str(&format!("ID: {}\n", t.id));
    out.push_str(&format!("Date: {}\n", t.date));
    let kind = match t.kind() {
        TransactionKind::Income => "Income",
        TransactionKind::Expense => "Expense",
        TransactionKind::Transfer => "Transfer between accounts",
        TransactionKind::Other => "Unclassified",
    };
    out.push_str(&format!("Type: {}\n", kind));
    if t.is_transfer() {
        out.push_str(&format!("Outcome: {}\n", fmt_money(t.outcome)));
        out.push_str(&format!("Income: {}\n", fmt_money(t.income)));
    } else {
        out.push_str(&format!("Amount: {}\n", fmt_money_signed(t.amount())));
    }
    if let Some(payee) = &t.payee {
        out.push_str(&format!("Payee: {}\n", payee));
    }
    if let Some(original) = &t.original_payee {
        if t.payee.as_deref() != Some(original.as_str()) {
            out.push_str(&format!("Original payee: {}\n", original));
        }
    }
    out.push_str(&format!("Category: {}\n", t.category_name(categories)));
    if let Some(id) = &t.account {
        out.push_str(&format!("Account: {}\n", account_title(accounts, id)));
    }
    if let Some(id) = &t.outcome_account {
        out.push_str(&format!("From account: {}\n", account_title(accounts, id)));
    }
    if let Some(id) = &t.income_account {
        out.push_str(&format!("To account: {}\n", account_title(accounts, id)));
    }
    if let Some(comment) = &t.comment {
        out.push_str(&format!("Comment: {}\n", comment));
    }
    if let Some(source) = &t.source {
        out.push_str(&format!("Source: {}\n", source));
    }
    if let Some(qr) = &t.qr_code {
        let receipt = parse_qr(qr);
        out.push_str("\n📄 Receipt:\n");
        if let Some(time) = &receipt.time {
            out.push_str(&format!("  Time: {}\n", time));
        }
        if let Some(sum) = &receipt.sum {
            out.push_str(&format!("  Sum: {}\n", sum));
        }
        if let Some(fiscal_number) = &receipt.fiscal_number {
            out.push_str(&format!("  Fiscal number: {}\n", fiscal_number));
        }
        if let Some(document) = &receipt.document {
            out.push_str(&format!("  Document: {}\n", document));
        }
        if let Some(fiscal_sign) = &receipt.fiscal_sign {
            out.push_str(&format!("  Fiscal sign: {}\n", fiscal_sign));
        }
    }
    if let (Some(lat), Some(lon)) = (t.latitude, t.longitude) {
        out.push_str(&format!("\n📍 Location: {}, {}\n", lat, lon));
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: &str, date: &str, income: f64, outcome: f64) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: date.to_string(),
            income,
            outcome,
            ..Default::default()
        }
    }

    #[test]
    fn test_fmt_number_groups_thousands() {
        assert_eq!(fmt_number(0.0), "0.00");
        assert_eq!(fmt_number(999.999), "1,000.00");
        assert_eq!(fmt_number(1234567.891), "1,234,567.89");
        assert_eq!(fmt_number(-1234.5), "-1,234.50");
        assert_eq!(fmt_number(100.0), "100.00");
    }

    #[test]
    fn test_fmt_money_signed() {
        assert_eq!(fmt_money_signed(1000.0), "+1,000.00 ₽");
        assert_eq!(fmt_money_signed(-500.0), "-500.00 ₽");
        assert_eq!(fmt_money_signed(0.0), "0.00 ₽");
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("Пятёрочка на Ленина", 9), "Пятёрочка");
        assert_eq!(truncate("short", 25), "short");
        assert_eq!(truncate("", 5), "");
    }

    #[test]
    fn test_describe_period() {
        let mut filter = TransactionFilter::default();
        assert_eq!(describe_period(&filter), "all time");

        filter.year = Some(2025);
        assert_eq!(describe_period(&filter), "2025");
        filter.month = Some(3);
        assert_eq!(describe_period(&filter), "2025-03");
        filter.day = Some(7);
        assert_eq!(describe_period(&filter), "2025-03-07");

        // A range bound silences the year fields
        filter.date_from = Some("2025-01-01".to_string());
        assert_eq!(describe_period(&filter), "from 2025-01-01");
        filter.date_to = Some("2025-06-30".to_string());
        assert_eq!(describe_period(&filter), "2025-01-01 to 2025-06-30");
        filter.date_from = None;
        assert_eq!(describe_period(&filter), "until 2025-06-30");
    }

    #[test]
    fn test_format_transaction_list() {
        let mut t1 = tx("t1", "2025-01-15", 0.0, 1000.0);
        t1.payee = Some("Store".to_string());
        let t2 = tx("t2", "2025-01-16", 250.0, 0.0);
        let out = format_transaction_list(&[t1, t2], 50, false);
        assert!(out.contains("Found 2 transactions:"));
        assert!(out.contains(" 1. 2025-01-15 |"));
        assert!(out.contains("-1,000.00 ₽ | Store"));
        assert!(out.contains(" 2. 2025-01-16 |"));
        assert!(out.contains("+250.00 ₽"));
        assert!(!out.contains("ID:"));
    }

    #[test]
    fn test_format_transaction_list_limit_and_ids() {
        let txs: Vec<Transaction> = (0..5)
            .map(|i| tx(&format!("t{}", i), "2025-01-01", 0.0, 10.0))
            .collect();
        let out = format_transaction_list(&txs, 3, true);
        assert!(out.contains("Found 5 transactions:"));
        assert!(out.contains("ID: t0"));
        assert!(out.contains("... and 2 more"));
        assert!(!out.contains("ID: t3"));
    }

    #[test]
    fn test_format_transaction_list_empty() {
        assert_eq!(format_transaction_list(&[], 50, false), "No transactions found");
    }

    #[test]
    fn test_parse_qr() {
        let receipt = parse_qr("t=20250915T1918&s=470.00&fn=7281000100203298&i=12345&fp=1364164281");
        assert_eq!(receipt.time.as_deref(), Some("20250915T1918"));
        assert_eq!(receipt.sum.as_deref(), Some("470.00"));
        assert_eq!(receipt.fiscal_number.as_deref(), Some("7281000100203298"));
        assert_eq!(receipt.document.as_deref(), Some("12345"));
        assert_eq!(receipt.fiscal_sign.as_deref(), Some("1364164281"));
    }

    #[test]
    fn test_parse_qr_ignores_garbage() {
        let receipt = parse_qr("s=100.00&noise&x=1");
        assert_eq!(receipt.sum.as_deref(), Some("100.00"));
        assert_eq!(receipt.time, None);
        assert_eq!(receipt.fiscal_sign, None);
        assert_eq!(parse_qr(""), Receipt::default());
    }

    fn category(id: &str, title: &str, parent: Option<&str>) -> Category {
        Category {
            id: id.to_string(),
            title: title.to_string(),
            parent: parent.map(|p| p.to_string()),
        }
    }

    #[test]
    fn test_format_categories_hierarchy() {
        let mut categories = HashMap::new();
        categories.insert("f".to_string(), category("f", "Food", None));
        categories.insert("t".to_string(), category("t", "Transport", None));
        categories.insert("r".to_string(), category("r", "Restaurants", Some("f")));
        categories.insert("g".to_string(), category("g", "Groceries", Some("f")));
        categories.insert("z".to_string(), category("z", "Coffee", Some("gone")));

        let out = format_categories(&categories);
        assert!(out.contains("📂 Categories (5 total: 2 parents, 3 children)"));
        let food = out.find("Food (ID: f)").unwrap();
        let transport = out.find("Transport (ID: t)").unwrap();
        assert!(food < transport);
        assert!(out.contains("    └─ Groceries (ID: g)"));
        assert!(out.contains("    └─ Restaurants (ID: r)"));
        assert!(out.contains("Orphaned categories (parent not found):"));
        assert!(out.contains("Coffee (ID: z) [parent: gone]"));
    }

    #[test]
    fn test_format_accounts() {
        let mut accounts = HashMap::new();
        accounts.insert(
            "a1".to_string(),
            Account {
                id: "a1".to_string(),
                title: "Card".to_string(),
                balance: 15250.5,
                kind: "ccard".to_string(),
                currency: "RUB".to_string(),
            },
        );
        let out = format_accounts(&accounts);
        assert!(out.contains("💼 Accounts (1)"));
        assert!(out.contains(" 1. Card (ccard): 15,250.50 RUB"));
    }

    #[test]
    fn test_format_transaction_detail() {
        let mut t = tx("abc", "2025-09-15", 0.0, 470.0);
        t.payee = Some("Samokat".to_string());
        t.original_payee = Some("SBER*5411*SAMOKAT".to_string());
        t.comment = Some("groceries run".to_string());
        t.qr_code = Some("t=20250915T1918&s=470.00&fp=1364164281".to_string());
        t.latitude = Some(55.751244);
        t.longitude = Some(37.618423);

        let out = format_transaction_detail(&t, &HashMap::new(), &HashMap::new());
        assert!(out.contains("Type: Expense"));
        assert!(out.contains("Amount: -470.00 ₽"));
        assert!(out.contains("Payee: Samokat"));
        assert!(out.contains("Original payee: SBER*5411*SAMOKAT"));
        assert!(out.contains("Category: Uncategorized"));
        assert!(out.contains("Comment: groceries run"));
        assert!(out.contains("📄 Receipt:"));
        assert!(out.contains("  Time: 20250915T1918"));
        assert!(out.contains("  Fiscal sign: 1364164281"));
        assert!(out.contains("📍 Location: 55.751244, 37.618423"));
    }

    #[test]
    fn test_detail_hides_matching_original_payee() {
        let mut t = tx("abc", "2025-09-15", 0.0, 470.0);
        t.payee = Some("Samokat".to_string());
        t.original_payee = Some("Samokat".to_string());
        let out = format_transaction_detail(&t, &HashMap::new(), &HashMap::new());
        assert!(!out.contains("Original payee:"));
    }

    #[test]
    fn test_detail_renders_transfer_accounts() {
        let mut accounts = HashMap::new();
        for (id, title) in [("a", "Checking"), ("b", "Savings")] {
            accounts.insert(
                id.to_string(),
                Account {
                    id: id.to_string(),
                    title: title.to_string(),
                    balance: 0.0,
                    kind: "checking".to_string(),
                    currency: "RUB".to_string(),
                },
            );
        }
        let mut t = tx("tr", "2025-02-01", 500.0, 500.0);
        t.outcome_account = Some("a".to_string());
        t.income_account = Some("b".to_string());

        let out = format_transaction_detail(&t, &HashMap::new(), &accounts);
        assert!(out.contains("Type: Transfer between accounts"));
        assert!(out.contains("From account: Checking"));
        assert!(out.contains("To account: Savings"));
        assert!(out.contains("Outcome: 500.00 ₽"));
        assert!(out.contains("Income: 500.00 ₽"));
    }
}
