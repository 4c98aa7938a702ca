//! Issue-date normalization.

use chrono::NaiveDate;

/// Cut an XML `Fecha` at the first `T`, keeping only the date part.
/// Values without a time separator pass through unchanged.
pub fn truncate_to_date(fecha: &str) -> &str {
    match fecha.split_once('T') {
        Some((date, _)) => date,
        None => fecha,
    }
}

/// Reformat a `DD/MM/YYYY` date as ISO `YYYY-MM-DD`.
/// Returns `None` for impossible calendar dates such as `31/02/2024`.
pub fn dmy_to_iso(dmy: &str) -> Option<String> {
    NaiveDate::parse_from_str(dmy.trim(), "%d/%m/%Y")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

/// Read a stored issue date: ISO date, ISO date-time (`T` or space
/// separated) or `DD/MM/YYYY`.
pub fn parse_issue_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let head = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .ok()
}
