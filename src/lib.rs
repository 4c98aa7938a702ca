//! # facturas
//!
//! Ingestion of Mexican business invoices into a single normalized record,
//! with pluggable storage and expense reports.
//!
//! Two inputs are supported: SAT CFDI XML (versions 3.3 and 4.0, with or
//! without namespace declarations) and free-form text PDFs carrying
//! `Empresa:` / `RFC:` / `Fecha:` / `Total:` labels. Both produce a
//! [`NormalizedInvoice`](crate::core::NormalizedInvoice).
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use facturas::cfdi;
//! use facturas::report;
//! use facturas::store::{InvoiceStore, MemoryStore};
//! use rust_decimal_macros::dec;
//!
//! let xml = br#"<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/4"
//!     Version="4.0" Fecha="2024-06-15T12:00:00" SubTotal="1000.00" Total="1160.00">
//!   <cfdi:Emisor Rfc="AAA010101AAA" Nombre="ACME SA de CV"/>
//!   <cfdi:Impuestos><cfdi:Traslados>
//!     <cfdi:Traslado Impuesto="002" Importe="160.00"/>
//!   </cfdi:Traslados></cfdi:Impuestos>
//! </cfdi:Comprobante>"#;
//!
//! let invoice = cfdi::from_cfdi_xml(xml).unwrap();
//! assert_eq!(invoice.tax_amount, dec!(160));
//!
//! let mut store = MemoryStore::new();
//! store.insert(&invoice).unwrap();
//!
//! let summary = report::summarize(&store.invoices().unwrap());
//! assert_eq!(summary.total_amount, dec!(1160));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` | Record, builder, errors, config, storage trait, in-memory store |
//! | `xml` | CFDI XML extraction |
//! | `pdf` | PDF text extraction |
//! | `report` | Totals by year / month / issuer, CSV export |
//! | `ingest` | Batch ingestion of `.xml` / `.pdf` files into a store |
//! | `sqlite` | SQLite store |
//! | `all` | Everything |
//!
//! Everything except `sqlite` is on by default.

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod config;

#[cfg(feature = "core")]
pub mod store;

#[cfg(feature = "xml")]
pub mod cfdi;

#[cfg(feature = "pdf")]
pub mod pdf;

#[cfg(feature = "report")]
pub mod report;

#[cfg(feature = "ingest")]
pub mod ingest;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
