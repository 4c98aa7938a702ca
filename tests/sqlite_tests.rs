#![cfg(all(feature = "sqlite", feature = "ingest"))]

use facturas::config::{Config, ConfigBuilder};
use facturas::core::*;
use facturas::ingest::{IngestStatus, Ingestor};
use facturas::store::{InvoiceStore, SqliteStore};
use rust_decimal_macros::dec;

const XML: &str = r#"<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/4"
    Version="4.0" Folio="9" Fecha="2024-02-29T08:00:00" SubTotal="100.00" Total="116.00">
  <cfdi:Emisor Rfc="AAA010101AAA" Nombre="ACME"/>
  <cfdi:Receptor Rfc="XYZ020202XYZ" Nombre="Cliente" UsoCFDI="G03"/>
  <cfdi:Conceptos><cfdi:Concepto Descripcion="Papelería"/></cfdi:Conceptos>
  <cfdi:Impuestos><cfdi:Traslados><cfdi:Traslado Importe="16.00"/></cfdi:Traslados></cfdi:Impuestos>
</cfdi:Comprobante>"#;

#[test]
fn rows_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("facturas.db");

    let expected = {
        let mut store = SqliteStore::open(&db).unwrap();
        let outcome = Ingestor::new(&mut store, Config::default()).ingest_bytes("f.xml", XML.as_bytes());
        assert_eq!(outcome.status, IngestStatus::Stored { id: 1 });
        store.invoices().unwrap().remove(0)
    };

    let config = ConfigBuilder::new().db_path(&db).build();
    let store = SqliteStore::from_config(&config).unwrap();
    let rows = store.list().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, 1);
    assert_eq!(rows[0].invoice, expected);
    assert_eq!(rows[0].invoice.origin, Origin::Xml);
    assert_eq!(rows[0].invoice.total, dec!(116.00));
    assert_eq!(rows[0].invoice.primary_line_item_description, "Papelería");
}

#[test]
fn clear_removes_everything_and_ids_keep_growing() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let inv = NormalizedInvoiceBuilder::for_xml().external_id("A").build();

    store.insert(&inv).unwrap();
    store.insert(&inv).unwrap();
    assert_eq!(store.clear().unwrap(), 2);
    assert!(store.list().unwrap().is_empty());

    assert_eq!(store.insert(&inv).unwrap(), 3);
}

#[test]
fn pdf_origin_round_trips() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let now = chrono::Utc::now();
    let inv = NormalizedInvoiceBuilder::for_pdf(&now).total(dec!(42.5)).build();

    store.insert(&inv).unwrap();
    let back = store.invoices().unwrap();
    assert_eq!(back, vec![inv]);
}
