use std::path::Path;

use chrono::{DateTime, Local, TimeZone};
use tracing::debug;

use super::fields::extract_fields;
use super::text::extract_text;
use crate::core::{FacturaError, NormalizedInvoice, NormalizedInvoiceBuilder};

/// Parse a PDF invoice file.
pub fn from_pdf_file(path: impl AsRef<Path>) -> Result<NormalizedInvoice, FacturaError> {
    let bytes = std::fs::read(path.as_ref())?;
    from_pdf_bytes(&bytes)
}

/// Parse PDF bytes held in memory.
pub fn from_pdf_bytes(pdf_bytes: &[u8]) -> Result<NormalizedInvoice, FacturaError> {
    let text = extract_text(pdf_bytes)?;
    from_pdf_text(&text)
}

/// Build an invoice from already-extracted PDF text, using the local clock
/// for the identifier and the fallback issue date.
pub fn from_pdf_text(text: &str) -> Result<NormalizedInvoice, FacturaError> {
    from_pdf_text_at(text, &Local::now())
}

/// As [`from_pdf_text`], with an explicit clock.
pub fn from_pdf_text_at<Tz: TimeZone>(
    text: &str,
    now: &DateTime<Tz>,
) -> Result<NormalizedInvoice, FacturaError> {
    let fields = extract_fields(text)?;
    if fields.is_unrecognizable() {
        return Err(FacturaError::NoRecognizableData);
    }
    debug!(?fields, "recovered PDF fields");

    let total = fields.total.unwrap_or_default();
    Ok(NormalizedInvoiceBuilder::for_pdf(now)
        .maybe(fields.company_name, |b, name| b.issuer_name(name))
        .maybe(fields.tax_id, |b, rfc| b.issuer_tax_id(rfc))
        .maybe(fields.issue_date, |b, date| b.issue_date(date))
        .subtotal(total)
        .total(total)
        .build())
}
