//! Expense aggregation over normalized invoices.
//!
//! All sums are over the invoice `total`. Period groupings skip invoices
//! whose issue date cannot be read; the overall summary counts them.
//! Sums saturate at `Decimal::MAX` / `Decimal::MIN` instead of overflowing.
//!
//! # Example
//!
//! ```
//! use facturas::core::NormalizedInvoiceBuilder;
//! use facturas::report;
//! use rust_decimal_macros::dec;
//!
//! let invoices = vec![
//!     NormalizedInvoiceBuilder::for_xml().issue_date("2024-01-10").total(dec!(100)).build(),
//!     NormalizedInvoiceBuilder::for_xml().issue_date("2024-02-01").total(dec!(50)).build(),
//! ];
//! let by_year = report::totals_by_year(&invoices);
//! assert_eq!(by_year[&2024], dec!(150));
//! ```

mod csv_export;

pub use csv_export::to_csv;

use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::NormalizedInvoice;

/// Headline figures for a set of invoices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub invoice_count: usize,
    pub total_amount: Decimal,
    pub total_tax: Decimal,
    /// Number of distinct issuer RFCs.
    pub distinct_issuers: usize,
}

/// A calendar month, ordered chronologically. Displays as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Every grouping for one set of invoices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub summary: Summary,
    pub by_year: BTreeMap<i32, Decimal>,
    pub by_month: BTreeMap<YearMonth, Decimal>,
    pub by_issuer: BTreeMap<String, Decimal>,
}

pub fn summarize(invoices: &[NormalizedInvoice]) -> Summary {
    let issuers: BTreeSet<&str> = invoices.iter().map(|i| i.issuer_tax_id.as_str()).collect();
    Summary {
        invoice_count: invoices.len(),
        total_amount: saturating_sum(invoices.iter().map(|i| i.total)),
        total_tax: saturating_sum(invoices.iter().map(|i| i.tax_amount)),
        distinct_issuers: issuers.len(),
    }
}

fn saturating_sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}

fn group_totals<K: Ord>(
    invoices: &[NormalizedInvoice],
    key: impl Fn(&NormalizedInvoice) -> Option<K>,
) -> BTreeMap<K, Decimal> {
    let mut totals = BTreeMap::new();
    for inv in invoices {
        if let Some(k) = key(inv) {
            let sum = totals.entry(k).or_insert(Decimal::ZERO);
            *sum = sum.saturating_add(inv.total);
        }
    }
    totals
}

pub fn totals_by_year(invoices: &[NormalizedInvoice]) -> BTreeMap<i32, Decimal> {
    group_totals(invoices, |inv| inv.issue_date_parsed().map(|d| d.year()))
}

pub fn totals_by_month(invoices: &[NormalizedInvoice]) -> BTreeMap<YearMonth, Decimal> {
    group_totals(invoices, |inv| {
        inv.issue_date_parsed().map(|d| YearMonth {
            year: d.year(),
            month: d.month(),
        })
    })
}

/// Totals keyed by issuer RFC.
pub fn totals_by_issuer(invoices: &[NormalizedInvoice]) -> BTreeMap<String, Decimal> {
    group_totals(invoices, |inv| Some(inv.issuer_tax_id.clone()))
}

pub fn filter_by_issuer<'a>(
    invoices: &'a [NormalizedInvoice],
    issuer_tax_id: &str,
) -> Vec<&'a NormalizedInvoice> {
    invoices
        .iter()
        .filter(|inv| inv.issuer_tax_id == issuer_tax_id)
        .collect()
}

pub fn build_report(invoices: &[NormalizedInvoice]) -> Report {
    Report {
        summary: summarize(invoices),
        by_year: totals_by_year(invoices),
        by_month: totals_by_month(invoices),
        by_issuer: totals_by_issuer(invoices),
    }
}
