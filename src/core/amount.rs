//! Decimal parsing and formatting shared by the extractors and exports.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a plain or scientific-notation decimal, ignoring surrounding whitespace.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Parse an amount written with `,` thousands separators, e.g. `1,250.50`.
pub fn parse_grouped_amount(s: &str) -> Option<Decimal> {
    parse_decimal(&s.replace(',', ""))
}

/// Render an amount for CSV and reports: trailing zeros dropped, but never
/// fewer than two decimals (`1160.00`, `75.50`, `160.016`).
pub fn format_decimal(amount: Decimal) -> String {
    let mut amount = amount.normalize();
    if amount.scale() < 2 {
        amount.rescale(2);
    }
    amount.to_string()
}
