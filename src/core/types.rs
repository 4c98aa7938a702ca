use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::date::parse_issue_date;
use super::error::FacturaError;

/// Which extractor produced a record. Selects the defaulting rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    #[serde(rename = "XML")]
    Xml,
    #[serde(rename = "PDF")]
    Pdf,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xml => "XML",
            Self::Pdf => "PDF",
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Origin {
    type Err = FacturaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "XML" => Ok(Self::Xml),
            "PDF" => Ok(Self::Pdf),
            other => Err(FacturaError::Storage(format!("unknown origin '{other}'"))),
        }
    }
}

/// The canonical invoice record produced by both extractors.
///
/// Built through [`NormalizedInvoiceBuilder`](super::NormalizedInvoiceBuilder),
/// which always starts from a complete set of defaults, so a record is
/// never handed out half-filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedInvoice {
    /// Source document identifier. Fiscal UUID or `Folio` for XML,
    /// `PDF-<timestamp>` for PDF (not a stable identity).
    pub external_id: String,
    /// Provenance tag.
    pub origin: Origin,
    /// ISO 8601 date. For XML this is the raw `Fecha` with any time part cut off.
    pub issue_date: String,
    /// Issuer RFC.
    pub issuer_tax_id: String,
    pub issuer_name: String,
    /// Recipient RFC.
    pub recipient_tax_id: String,
    pub recipient_name: String,
    /// `UsoCFDI` tax-usage classification.
    pub usage_code: String,
    /// ISO 4217 currency code.
    pub currency: String,
    pub subtotal: Decimal,
    /// Sum of transferred taxes.
    pub tax_amount: Decimal,
    pub total: Decimal,
    /// `TipoDeComprobante` (I, E, T, N, P).
    pub document_type: String,
    /// CFDI `Version` attribute.
    pub schema_version: String,
    /// Description of the first line item.
    pub primary_line_item_description: String,
}

impl NormalizedInvoice {
    /// The issue date as a calendar date, if it can be read.
    pub fn issue_date_parsed(&self) -> Option<NaiveDate> {
        parse_issue_date(&self.issue_date)
    }
}

/// Serializable success/failure shape of a single parse call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice: Option<NormalizedInvoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<NormalizedInvoice, FacturaError>> for ParseOutcome {
    fn from(result: Result<NormalizedInvoice, FacturaError>) -> Self {
        match result {
            Ok(invoice) => Self {
                success: true,
                invoice: Some(invoice),
                error: None,
            },
            Err(e) => Self {
                success: false,
                invoice: None,
                error: Some(e.to_string()),
            },
        }
    }
}
