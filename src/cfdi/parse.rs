use rust_decimal::Decimal;
use tracing::debug;

use super::lookup::{LookupChain, any_child};
use super::tree::{self, Element};
use crate::core::amount::parse_decimal;
use crate::core::date::truncate_to_date;
use crate::core::{FacturaError, NormalizedInvoice, NormalizedInvoiceBuilder};

/// Parse a CFDI XML document into a [`NormalizedInvoice`].
///
/// Missing parties, line items or tax nodes yield empty strings and zero
/// amounts. Malformed XML, and a `SubTotal` or `Total` that is present but
/// not a number, fail the whole document.
pub fn from_cfdi_xml(xml: &[u8]) -> Result<NormalizedInvoice, FacturaError> {
    let root = tree::parse_document(xml)?;
    let lookup = LookupChain::for_root(&root);

    let subtotal = required_amount(&root, "SubTotal")?;
    let total = required_amount(&root, "Total")?;
    let tax_amount = transferred_tax_total(&root, &lookup)?;
    let fecha = root.attr("Fecha").or_else(|| root.attr("fecha")).unwrap_or("");

    let emisor = lookup.child(&root, "Emisor");
    let receptor = lookup.child(&root, "Receptor");
    let first_concepto = lookup
        .child(&root, "Conceptos")
        .and_then(|conceptos| conceptos.children.first());

    let invoice = NormalizedInvoiceBuilder::for_xml()
        .external_id(external_id(&root, &lookup))
        .issue_date(truncate_to_date(fecha))
        .issuer(attr_or_empty(emisor, "Rfc"), attr_or_empty(emisor, "Nombre"))
        .recipient(
            attr_or_empty(receptor, "Rfc"),
            attr_or_empty(receptor, "Nombre"),
        )
        .usage_code(attr_or_empty(receptor, "UsoCFDI"))
        .maybe(root.attr("Moneda"), |b, moneda| b.currency(moneda))
        .subtotal(subtotal)
        .tax_amount(tax_amount)
        .total(total)
        .document_type(root.attr("TipoDeComprobante").unwrap_or(""))
        .schema_version(root.attr("Version").unwrap_or(""))
        .primary_line_item_description(attr_or_empty(first_concepto, "Descripcion"))
        .build();

    debug!(
        external_id = %invoice.external_id,
        issuer = %invoice.issuer_tax_id,
        total = %invoice.total,
        "parsed CFDI XML"
    );
    Ok(invoice)
}

fn attr_or_empty<'e>(element: Option<&'e Element>, name: &str) -> &'e str {
    element.and_then(|e| e.attr(name)).unwrap_or("")
}

/// Absent → zero; present but unparsable → error.
fn required_amount(root: &Element, name: &str) -> Result<Decimal, FacturaError> {
    match root.attr(name) {
        None => Ok(Decimal::ZERO),
        Some(raw) => parse_decimal(raw).ok_or_else(|| FacturaError::invalid_amount(name, raw)),
    }
}

/// Sum of `Importe` over `Impuestos/Traslados/*`. Entries with an
/// unparsable amount are skipped; a sum outside the `Decimal` range is an
/// error.
fn transferred_tax_total(root: &Element, lookup: &LookupChain) -> Result<Decimal, FacturaError> {
    let Some(traslados) = lookup.path(root, &["Impuestos", "Traslados"]) else {
        return Ok(Decimal::ZERO);
    };

    traslados
        .children
        .iter()
        .filter_map(|traslado| {
            let raw = traslado.attr("Importe").unwrap_or("0");
            let amount = parse_decimal(raw);
            if amount.is_none() {
                debug!(importe = raw, "skipping transferred tax with unparsable amount");
            }
            amount.map(|a| (raw, a))
        })
        .try_fold(Decimal::ZERO, |sum, (raw, amount)| {
            sum.checked_add(amount)
                .ok_or_else(|| FacturaError::invalid_amount("Importe", raw))
        })
}

/// Fiscal UUID from the stamp complement, else `Folio`, else empty.
fn external_id(root: &Element, lookup: &LookupChain) -> String {
    lookup
        .child(root, "Complemento")
        .and_then(|c| any_child(c, "TimbreFiscalDigital"))
        .and_then(|tfd| tfd.attr("UUID"))
        .or_else(|| root.attr("Folio"))
        .unwrap_or("")
        .to_string()
}
