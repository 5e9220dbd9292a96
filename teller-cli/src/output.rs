//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use rust_decimal::Decimal;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message to stderr
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Print a menu heading preceded by a blank line
pub fn heading(title: &str) {
    println!();
    println!("{}", title.bold());
}

/// Create a styled table with the given column headers
pub fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

/// Format an amount with its currency code, e.g. `INR 1250.00`
pub fn money(currency: &str, amount: Decimal) -> String {
    format!("{} {}", currency, amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_keeps_minor_units() {
        assert_eq!(money("INR", Decimal::new(125000, 2)), "INR 1250.00");
    }

    #[test]
    fn test_table_has_header() {
        let rendered = table(&["Time", "Details"]).to_string();
        assert!(rendered.contains("Time"));
        assert!(rendered.contains("Details"));
    }
}
