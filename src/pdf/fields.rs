//! Labelled field patterns for PDF invoice text.
//!
//! Every label must start at a word boundary: `Subtotal:` never counts as
//! `Total:`, and `MiEmpresa:` never counts as `Empresa:`.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

use crate::core::FacturaError;
use crate::core::amount::parse_grouped_amount;
use crate::core::date::dmy_to_iso;

lazy_static! {
    static ref COMPANY: Regex = Regex::new(r"(?i)\bEmpresa:\s*(.+)").unwrap();

    // RFC: 12 characters for companies, 13 for individuals
    static ref TAX_ID: Regex = Regex::new(r"(?i)\bRFC:\s*([A-Z0-9]{12,13})").unwrap();

    static ref DATE_ISO: Regex =
        Regex::new(r"(?i)\bFecha:\s*([0-9]{4}-[0-9]{2}-[0-9]{2})").unwrap();

    static ref DATE_DMY: Regex =
        Regex::new(r"(?i)\bFecha:\s*([0-9]{2}/[0-9]{2}/[0-9]{4})").unwrap();

    // "Subtotal:" must not satisfy this
    static ref TOTAL: Regex = Regex::new(r"(?i)\bTotal:\s*([0-9,.]+)").unwrap();
}

/// Fields recovered from PDF text. `None` means the label was not found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfFields {
    pub company_name: Option<String>,
    pub tax_id: Option<String>,
    /// ISO `YYYY-MM-DD`.
    pub issue_date: Option<String>,
    pub total: Option<Decimal>,
}

impl PdfFields {
    /// True when the text carried neither a company name nor a non-zero
    /// total.
    pub fn is_unrecognizable(&self) -> bool {
        self.company_name.is_none() && self.total.is_none_or(|t| t.is_zero())
    }
}

fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Run every label search over `text`. The searches are independent; each
/// takes its first match.
///
/// A `Total:` value that is present but not a number (e.g. `1,250.50.`)
/// fails the whole text rather than being read as zero.
pub fn extract_fields(text: &str) -> Result<PdfFields, FacturaError> {
    let issue_date = first_capture(&DATE_ISO, text).or_else(|| {
        let dmy = first_capture(&DATE_DMY, text)?;
        let iso = dmy_to_iso(&dmy);
        if iso.is_none() {
            debug!(fecha = %dmy, "discarding invalid calendar date");
        }
        iso
    });

    let total = first_capture(&TOTAL, text)
        .map(|raw| {
            parse_grouped_amount(&raw).ok_or_else(|| FacturaError::invalid_amount("Total", raw))
        })
        .transpose()?;

    Ok(PdfFields {
        company_name: first_capture(&COMPANY, text),
        tax_id: first_capture(&TAX_ID, text),
        issue_date,
        total,
    })
}
