//! CFDI XML extraction.
//!
//! Reads SAT CFDI 3.3 / 4.0 documents (namespaced or exported without
//! namespace declarations) into a [`NormalizedInvoice`](crate::core::NormalizedInvoice).
//!
//! # Example
//!
//! ```
//! let xml = br#"<Comprobante Fecha="2024-03-15T10:00:00" SubTotal="100" Total="116">
//!     <Emisor Rfc="AAA010101AAA" Nombre="ACME"/>
//! </Comprobante>"#;
//!
//! let invoice = facturas::cfdi::from_cfdi_xml(xml).unwrap();
//! assert_eq!(invoice.issue_date, "2024-03-15");
//! assert_eq!(invoice.issuer_name, "ACME");
//! ```

mod lookup;
mod parse;
mod tree;

pub use parse::from_cfdi_xml;

/// CFDI 4.0 namespace URI.
pub const CFDI_V4_NS: &str = "http://www.sat.gob.mx/cfd/4";

/// CFDI 3.3 namespace URI.
pub const CFDI_V3_NS: &str = "http://www.sat.gob.mx/cfd/3";

/// Timbre Fiscal Digital (stamp complement) namespace URI.
pub const TFD_NS: &str = "http://www.sat.gob.mx/TimbreFiscalDigital";

/// Local name of the CFDI root element.
pub const ROOT_ELEMENT: &str = "Comprobante";
