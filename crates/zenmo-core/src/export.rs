//! CSV and JSON export of filtered transactions
//!
//! Rows are flattened to plain fields with classified type; output is
//! wrapped in a fenced code block so chat clients render it verbatim.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Category, Transaction};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown export format: {} (expected csv or json)", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One flattened transaction for export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRow {
    pub id: String,
    pub date: String,
    pub income: f64,
    pub outcome: f64,
    pub amount: f64,
    pub payee: String,
    pub category: String,
    pub comment: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Keep records of one classified type. `all` or an unrecognized value
/// keeps everything, matching the lenient tool contract.
pub fn filter_by_type(transactions: &[Transaction], type_filter: &str) -> Vec<Transaction> {
    match type_filter {
        "income" => transactions.iter().filter(|t| t.is_income()).cloned().collect(),
        "expense" => transactions.iter().filter(|t| t.is_expense()).cloned().collect(),
        "transfer" => transactions.iter().filter(|t| t.is_transfer()).cloned().collect(),
        _ => transactions.to_vec(),
    }
}

/// Flatten transactions to export rows with resolved category titles
pub fn export_rows(
    transactions: &[Transaction],
    categories: &HashMap<String, Category>,
) -> Vec<ExportRow> {
    transactions
        .iter()
        .map(|t| ExportRow {
            id: t.id.clone(),
            date: t.date.clone(),
            income: t.income,
            outcome: t.outcome,
            amount: t.amount(),
            payee: t.payee.clone().unwrap_or_default(),
            category: t.category_name(categories),
            comment: t.comment.clone().unwrap_or_default(),
            kind: t.kind().as_str().to_string(),
        })
        .collect()
}

fn rows_to_csv(rows: &[ExportRow]) -> String {
    let mut csv = String::from("id,date,income,outcome,amount,payee,category,comment,type\n");
    for row in rows {
        csv.push_str(&format!(
            "{},{},{:.2},{:.2},{:.2},{},{},{},{}\n",
            row.id,
            row.date,
            row.income,
            row.outcome,
            row.amount,
            escape_csv_field(&row.payee),
            escape_csv_field(&row.category),
            escape_csv_field(&row.comment),
            row.kind
        ));
    }
    csv
}

fn rows_to_json(rows: &[ExportRow]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// Full export pipeline output: count line plus a fenced code block
pub fn render_export(
    transactions: &[Transaction],
    categories: &HashMap<String, Category>,
    format: ExportFormat,
) -> Result<String> {
    if transactions.is_empty() {
        return Ok("No transactions to export".to_string());
    }
    let rows = export_rows(transactions, categories);
    let body = match format {
        ExportFormat::Csv => rows_to_csv(&rows),
        ExportFormat::Json => rows_to_json(&rows)?,
    };
    let plural = if rows.len() == 1 { "" } else { "s" };
    Ok(format!(
        "📄 Export: {} transaction{}\n\n```{}\n{}\n```",
        rows.len(),
        plural,
        format.as_str(),
        body.trim_end()
    ))
}

/// Escape a field for CSV output
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
