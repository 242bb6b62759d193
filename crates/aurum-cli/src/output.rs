//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Formats and prints rows based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(&data),
        OutputFormat::Csv => print_csv(data),
    }
}

/// Prints any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Formats a fraction as a percentage.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn fmt_percent(value: &f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Formats a ratio with four decimals.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn fmt_ratio(value: &f64) -> String {
    format!("{value:.4}")
}

/// Formats an optional fraction as a percentage, or "n/a".
pub fn fmt_opt_percent(value: &Option<f64>) -> String {
    value.as_ref().map_or_else(|| "n/a".to_string(), fmt_percent)
}

/// Formats an optional ratio, or "n/a".
pub fn fmt_opt_ratio(value: &Option<f64>) -> String {
    value.as_ref().map_or_else(|| "n/a".to_string(), fmt_ratio)
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Flattens a JSON object into dotted key-value rows.
pub fn flatten_json(prefix: &str, value: &serde_json::Value, rows: &mut Vec<KeyValue>) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_json(&path, child, rows);
            }
        }
        serde_json::Value::String(s) => rows.push(KeyValue::new(prefix, s.as_str())),
        other => rows.push(KeyValue::new(prefix, other.to_string())),
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatters() {
        assert_eq!(fmt_percent(&0.0712), "7.12%");
        assert_eq!(fmt_ratio(&1.23456), "1.2346");
        assert_eq!(fmt_opt_ratio(&None), "n/a");
        assert_eq!(fmt_opt_percent(&Some(0.5)), "50.00%");
    }

    #[test]
    fn test_flatten_json() {
        let value = serde_json::json!({
            "analytics": {"risk_free_rate": 0.03, "parallel": {"enabled": true}},
            "esg": {"lookup_chain": ["isin", "cusip"]}
        });
        let mut rows = Vec::new();
        flatten_json("", &value, &mut rows);
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "analytics.parallel.enabled",
                "analytics.risk_free_rate",
                "esg.lookup_chain"
            ]
        );
        assert_eq!(rows[2].value, r#"["isin","cusip"]"#);
    }
}
