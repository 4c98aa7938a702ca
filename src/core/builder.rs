use chrono::{DateTime, TimeZone};
use rust_decimal::Decimal;

use super::types::*;

/// Currency assumed when a document does not name one.
pub const DEFAULT_CURRENCY: &str = "MXN";

/// Generic-public RFC used when a PDF names no issuer RFC.
pub const GENERIC_ISSUER_RFC: &str = "XAXX010101000";
/// Generic-foreign RFC used as the recipient of PDF invoices.
pub const GENERIC_RECIPIENT_RFC: &str = "XEXX010101000";
pub const PDF_ISSUER_NAME: &str = "Empresa desde PDF";
pub const PDF_RECIPIENT_NAME: &str = "Cliente genérico";
pub const PDF_DOCUMENT_TYPE: &str = "I";
pub const PDF_SCHEMA_VERSION: &str = "PDF";
pub const PDF_LINE_ITEM_DESCRIPTION: &str = "Gasto leído desde PDF";

/// Builder for [`NormalizedInvoice`].
///
/// Starts from a complete record of defaults for the given origin and only
/// overwrites a field when the extractor recovered a value for it.
///
/// ```
/// use facturas::core::*;
/// use rust_decimal_macros::dec;
///
/// let invoice = NormalizedInvoiceBuilder::for_xml()
///     .issuer("AAA010101AAA", "ACME SA de CV")
///     .total(dec!(116))
///     .build();
///
/// assert_eq!(invoice.currency, "MXN");
/// assert_eq!(invoice.recipient_name, "");
/// ```
#[derive(Debug, Clone)]
pub struct NormalizedInvoiceBuilder {
    invoice: NormalizedInvoice,
}

impl NormalizedInvoiceBuilder {
    /// Defaults for XML origin: empty strings, zero amounts, `MXN`.
    pub fn for_xml() -> Self {
        Self {
            invoice: NormalizedInvoice {
                external_id: String::new(),
                origin: Origin::Xml,
                issue_date: String::new(),
                issuer_tax_id: String::new(),
                issuer_name: String::new(),
                recipient_tax_id: String::new(),
                recipient_name: String::new(),
                usage_code: String::new(),
                currency: DEFAULT_CURRENCY.to_string(),
                subtotal: Decimal::ZERO,
                tax_amount: Decimal::ZERO,
                total: Decimal::ZERO,
                document_type: String::new(),
                schema_version: String::new(),
                primary_line_item_description: String::new(),
            },
        }
    }

    /// Defaults for PDF origin: generic parties, sentinel metadata, and an
    /// identifier and issue date taken from `now`.
    ///
    /// The identifier is `PDF-<unix seconds>.<microseconds>`. Two documents
    /// parsed within the same microsecond get the same id.
    pub fn for_pdf<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self {
            invoice: NormalizedInvoice {
                external_id: format!(
                    "PDF-{}.{:06}",
                    now.timestamp(),
                    now.timestamp_subsec_micros()
                ),
                origin: Origin::Pdf,
                issue_date: now.date_naive().format("%Y-%m-%d").to_string(),
                issuer_tax_id: GENERIC_ISSUER_RFC.to_string(),
                issuer_name: PDF_ISSUER_NAME.to_string(),
                recipient_tax_id: GENERIC_RECIPIENT_RFC.to_string(),
                recipient_name: PDF_RECIPIENT_NAME.to_string(),
                usage_code: String::new(),
                currency: DEFAULT_CURRENCY.to_string(),
                subtotal: Decimal::ZERO,
                tax_amount: Decimal::ZERO,
                total: Decimal::ZERO,
                document_type: PDF_DOCUMENT_TYPE.to_string(),
                schema_version: PDF_SCHEMA_VERSION.to_string(),
                primary_line_item_description: PDF_LINE_ITEM_DESCRIPTION.to_string(),
            },
        }
    }

    /// Apply `set` only when `value` was recovered.
    pub fn maybe<T>(self, value: Option<T>, set: impl FnOnce(Self, T) -> Self) -> Self {
        match value {
            Some(v) => set(self, v),
            None => self,
        }
    }

    pub fn external_id(mut self, id: impl Into<String>) -> Self {
        self.invoice.external_id = id.into();
        self
    }

    pub fn issue_date(mut self, date: impl Into<String>) -> Self {
        self.invoice.issue_date = date.into();
        self
    }

    pub fn issuer(mut self, tax_id: impl Into<String>, name: impl Into<String>) -> Self {
        self.invoice.issuer_tax_id = tax_id.into();
        self.invoice.issuer_name = name.into();
        self
    }

    pub fn issuer_tax_id(mut self, tax_id: impl Into<String>) -> Self {
        self.invoice.issuer_tax_id = tax_id.into();
        self
    }

    pub fn issuer_name(mut self, name: impl Into<String>) -> Self {
        self.invoice.issuer_name = name.into();
        self
    }

    pub fn recipient(mut self, tax_id: impl Into<String>, name: impl Into<String>) -> Self {
        self.invoice.recipient_tax_id = tax_id.into();
        self.invoice.recipient_name = name.into();
        self
    }

    pub fn usage_code(mut self, code: impl Into<String>) -> Self {
        self.invoice.usage_code = code.into();
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.invoice.currency = code.into();
        self
    }

    pub fn subtotal(mut self, amount: Decimal) -> Self {
        self.invoice.subtotal = amount;
        self
    }

    pub fn tax_amount(mut self, amount: Decimal) -> Self {
        self.invoice.tax_amount = amount;
        self
    }

    pub fn total(mut self, amount: Decimal) -> Self {
        self.invoice.total = amount;
        self
    }

    pub fn document_type(mut self, code: impl Into<String>) -> Self {
        self.invoice.document_type = code.into();
        self
    }

    pub fn schema_version(mut self, version: impl Into<String>) -> Self {
        self.invoice.schema_version = version.into();
        self
    }

    pub fn primary_line_item_description(mut self, description: impl Into<String>) -> Self {
        self.invoice.primary_line_item_description = description.into();
        self
    }

    pub fn build(self) -> NormalizedInvoice {
        self.invoice
    }
}
