//! CSV export of stored invoices.
//!
//! Comma-separated with a header row and `\r\n` line endings. Text fields
//! are quoted only when they contain a comma, quote or line break; amounts
//! are written with at least two decimals.

use crate::core::amount::format_decimal;
use crate::store::StoredInvoice;

const HEADER: [&str; 16] = [
    "id",
    "uuid",
    "origen",
    "fecha",
    "rfc_emisor",
    "nombre_emisor",
    "rfc_receptor",
    "nombre_receptor",
    "uso_cfdi",
    "moneda",
    "subtotal",
    "impuestos",
    "total",
    "tipo_comprobante",
    "version_cfdi",
    "concepto_principal",
];

pub fn to_csv(rows: &[StoredInvoice]) -> String {
    let mut out = HEADER.join(",");
    out.push_str("\r\n");

    for row in rows {
        let inv = &row.invoice;
        let fields = [
            row.id.to_string(),
            inv.external_id.clone(),
            inv.origin.to_string(),
            inv.issue_date.clone(),
            inv.issuer_tax_id.clone(),
            inv.issuer_name.clone(),
            inv.recipient_tax_id.clone(),
            inv.recipient_name.clone(),
            inv.usage_code.clone(),
            inv.currency.clone(),
            format_decimal(inv.subtotal),
            format_decimal(inv.tax_amount),
            format_decimal(inv.total),
            inv.document_type.clone(),
            inv.schema_version.clone(),
            inv.primary_line_item_description.clone(),
        ];
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            csv_field(&mut out, field);
        }
        out.push_str("\r\n");
    }
    out
}

fn csv_field(out: &mut String, value: &str) {
    if !value.contains([',', '"', '\n', '\r']) {
        out.push_str(value);
        return;
    }
    out.push('"');
    for ch in value.chars() {
        if ch == '"' {
            out.push_str("\"\"");
        } else {
            out.push(ch);
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting() {
        let mut out = String::new();
        csv_field(&mut out, "plain");
        out.push(';');
        csv_field(&mut out, "ACME, S.A. de C.V.");
        out.push(';');
        csv_field(&mut out, r#"say "hi""#);
        assert_eq!(out, r#"plain;"ACME, S.A. de C.V.";"say ""hi""""#);
    }

    #[test]
    fn header_only_for_no_rows() {
        let csv = to_csv(&[]);
        assert!(csv.starts_with("id,uuid,origen,fecha,"));
        assert_eq!(csv.lines().count(), 1);
    }
}
