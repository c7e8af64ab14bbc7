//! Input validation helpers
//!
//! Validation lives outside the filter engine: these helpers return
//! human-readable error lines and let callers decide whether to proceed.

use regex::Regex;

use crate::models::Transaction;

/// Fixed-width `YYYY-MM-DD` shape check. The filter engine relies on this
/// format for lexicographic date comparison and never re-validates.
pub fn is_valid_date(date: &str) -> bool {
    let re = Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex");
    re.is_match(date)
}

/// Sanity bounds on a requested reporting period
pub fn validate_period(year: Option<i32>, month: Option<u32>) -> Vec<String> {
    let mut errors = Vec::new();
    if let Some(year) = year {
        if !(2000..=2030).contains(&year) {
            errors.push(format!("Year must be between 2000 and 2030, got {}", year));
        }
    }
    if let Some(month) = month {
        if !(1..=12).contains(&month) {
            errors.push(format!("Month must be between 1 and 12, got {}", month));
        }
    }
    errors
}

/// Structural checks on a single transaction record
pub fn validate_transaction(transaction: &Transaction) -> Vec<String> {
    let mut errors = Vec::new();
    if transaction.id.is_empty() {
        errors.push("Transaction id is required".to_string());
    }
    if !is_valid_date(&transaction.date) {
        errors.push(format!(
            "Invalid date format: {} (expected YYYY-MM-DD)",
            transaction.date
        ));
    }
    if transaction.income < 0.0 {
        errors.push("Income cannot be negative".to_string());
    }
    if transaction.outcome < 0.0 {
        errors.push("Outcome cannot be negative".to_string());
    }
    if transaction.income > 0.0 && transaction.outcome > 0.0 && !transaction.is_transfer() {
        errors.push("Transaction cannot have both income and outcome".to_string());
    }
    if transaction.income == 0.0 && transaction.outcome == 0.0 {
        errors.push("Transaction must have an income or outcome amount".to_string());
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_dates() {
        assert!(is_valid_date("2025-01-15"));
        assert!(is_valid_date("2024-12-31"));
        assert!(is_valid_date("2000-01-01"));
    }

    #[test]
    fn test_invalid_dates() {
        assert!(!is_valid_date("2025-1-15"));
        assert!(!is_valid_date("25-01-15"));
        assert!(!is_valid_date("2025/01/15"));
        assert!(!is_valid_date("2025-01-15T10:00"));
        assert!(!is_valid_date("2025-01"));
        assert!(!is_valid_date(""));
        assert!(!is_valid_date("latest"));
    }

    #[test]
    fn test_validate_period_bounds() {
        assert!(validate_period(Some(2000), Some(1)).is_empty());
        assert!(validate_period(Some(2030), Some(12)).is_empty());
        assert!(validate_period(None, None).is_empty());

        let errors = validate_period(Some(1999), Some(13));
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("2000 and 2030"));
        assert!(errors[1].contains("1 and 12"));

        assert_eq!(validate_period(Some(2031), None).len(), 1);
        assert_eq!(validate_period(None, Some(0)).len(), 1);
    }

    #[test]
    fn test_validate_transaction() {
        let good = Transaction {
            id: "t1".to_string(),
            date: "2025-01-15".to_string(),
            outcome: 100.0,
            ..Default::default()
        };
        assert!(validate_transaction(&good).is_empty());

        let bad = Transaction {
            id: String::new(),
            date: "not-a-date".to_string(),
            ..Default::default()
        };
        let errors = validate_transaction(&bad);
        assert!(errors.iter().any(|e| e.contains("id is required")));
        assert!(errors.iter().any(|e| e.contains("Invalid date format")));
        assert!(errors.iter().any(|e| e.contains("income or outcome")));
    }

    #[test]
    fn test_validate_transaction_rejects_double_sided_amounts() {
        let wash = Transaction {
            id: "t1".to_string(),
            date: "2025-01-15".to_string(),
            income: 50.0,
            outcome: 50.0,
            ..Default::default()
        };
        let errors = validate_transaction(&wash);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("both income and outcome"));

        // A transfer legitimately carries both amounts
        let transfer = Transaction {
            income_account: Some("A".to_string()),
            outcome_account: Some("B".to_string()),
            ..wash
        };
        assert!(validate_transaction(&transfer).is_empty());
    }
}
